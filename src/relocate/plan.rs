//! Relocation planning.
//!
//! Turns a chosen steamapps directory plus a destination base into the ordered
//! list of link/target pairs to process. Planning validates the source and
//! scaffolds the destination directories, but creates no links itself.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::RelinkError;

/// Fallback name for the destination root when the steamapps directory has no
/// usable parent name (e.g. a filesystem root).
const LIBRARY_NAME_FALLBACK: &str = "steam_library";

/// Subdirectories of steamapps eligible for relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocationTarget {
    /// Active download area; always relocated.
    Downloading,
    /// Scratch area Steam uses while unpacking; opt-in.
    Temp,
}

impl RelocationTarget {
    /// On-disk directory name under steamapps.
    pub fn dir_name(&self) -> &'static str {
        match self {
            RelocationTarget::Downloading => "downloading",
            RelocationTarget::Temp => "temp",
        }
    }
}

impl fmt::Display for RelocationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// One planned link: `link_path` (inside steamapps) should end up as a
/// symlink to `target_path` (on the destination volume).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationOperation {
    pub target: RelocationTarget,
    pub link_path: PathBuf,
    pub target_path: PathBuf,
}

/// The full plan for one run.
#[derive(Debug, Clone)]
pub struct RelocationPlan {
    pub steamapps: PathBuf,
    pub dest_root: PathBuf,
    pub operations: Vec<RelocationOperation>,
}

impl RelocationPlan {
    /// Human-readable summary lines, shown before asking the user to proceed.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Library steamapps: {}", self.steamapps.display()),
            format!("Target root: {}", self.dest_root.display()),
        ];
        for op in &self.operations {
            lines.push(format!(
                "  - {}: {} -> {}",
                op.target,
                op.link_path.display(),
                op.target_path.display()
            ));
        }
        lines
    }
}

/// Destination root for a library: `<dest_base>/<parent-of-steamapps>_symlink`.
fn derive_dest_root(steamapps: &Path, dest_base: &Path) -> PathBuf {
    let lib_name = steamapps
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(LIBRARY_NAME_FALLBACK);
    dest_base.join(format!("{lib_name}_symlink"))
}

/// Build the relocation plan for one steamapps directory.
///
/// Fails with `InvalidSource` when `steamapps` is missing or not a directory;
/// that check runs before any filesystem mutation. The destination base and
/// the derived per-library root are created if absent (the plan's only side
/// effects).
pub fn plan_relocation(
    steamapps: &Path,
    dest_base: &Path,
    link_temp: bool,
) -> anyhow::Result<RelocationPlan> {
    if !steamapps.is_dir() {
        return Err(RelinkError::InvalidSource(steamapps.to_path_buf()).into());
    }

    fs::create_dir_all(dest_base).map_err(|e| RelinkError::MoveFailed {
        src: steamapps.to_path_buf(),
        dest: dest_base.to_path_buf(),
        reason: format!("cannot create destination base: {e}"),
    })?;

    let dest_root = derive_dest_root(steamapps, dest_base);
    fs::create_dir_all(&dest_root).map_err(|e| RelinkError::MoveFailed {
        src: steamapps.to_path_buf(),
        dest: dest_root.clone(),
        reason: format!("cannot create destination root: {e}"),
    })?;
    debug!(dest_root = %dest_root.display(), "destination root ready");

    let mut targets = vec![RelocationTarget::Downloading];
    if link_temp {
        targets.push(RelocationTarget::Temp);
    }

    let operations = targets
        .into_iter()
        .map(|target| RelocationOperation {
            target,
            link_path: steamapps.join(target.dir_name()),
            target_path: dest_root.join(target.dir_name()),
        })
        .collect();

    info!(steamapps = %steamapps.display(), dest_root = %dest_root.display(), "relocation planned");
    Ok(RelocationPlan {
        steamapps: steamapps.to_path_buf(),
        dest_root,
        operations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn dest_root_uses_parent_name() {
        let sa = Path::new("/mnt/hdd/SteamLibrary/steamapps");
        let base = Path::new("/mnt/ssd/cache");
        assert_eq!(
            derive_dest_root(sa, base),
            PathBuf::from("/mnt/ssd/cache/SteamLibrary_symlink")
        );
    }

    #[test]
    fn dest_root_falls_back_without_parent_name() {
        let sa = Path::new("/steamapps");
        let base = Path::new("/mnt/ssd");
        assert_eq!(
            derive_dest_root(sa, base),
            PathBuf::from("/mnt/ssd/steam_library_symlink")
        );
    }

    #[test]
    fn invalid_source_rejected_before_any_mutation() {
        let td = tempdir().unwrap();
        let missing = td.path().join("SteamLibrary/steamapps");
        let base = td.path().join("ssd");

        let err = plan_relocation(&missing, &base, true).unwrap_err();
        let relink = err.downcast_ref::<RelinkError>().expect("typed error");
        assert_eq!(relink.code(), "invalid_source");
        // Planning must not have scaffolded anything for an invalid source.
        assert!(!base.exists());
    }

    #[test]
    fn plan_scaffolds_destination_and_orders_targets() {
        let td = tempdir().unwrap();
        let sa = td.path().join("SteamLibrary/steamapps");
        std::fs::create_dir_all(&sa).unwrap();
        let base = td.path().join("ssd");

        let plan = plan_relocation(&sa, &base, true).unwrap();
        let expected_root = base.join("SteamLibrary_symlink");
        assert_eq!(plan.dest_root, expected_root);
        assert!(expected_root.is_dir(), "destination root created if absent");

        let names: Vec<_> = plan.operations.iter().map(|o| o.target.dir_name()).collect();
        assert_eq!(names, vec!["downloading", "temp"]);
        assert_eq!(plan.operations[0].link_path, sa.join("downloading"));
        assert_eq!(
            plan.operations[0].target_path,
            expected_root.join("downloading")
        );
    }

    #[test]
    fn temp_is_opt_in() {
        let td = tempdir().unwrap();
        let sa = td.path().join("Lib/steamapps");
        std::fs::create_dir_all(&sa).unwrap();

        let plan = plan_relocation(&sa, &td.path().join("ssd"), false).unwrap();
        assert_eq!(plan.operations.len(), 1);
        assert_eq!(plan.operations[0].target, RelocationTarget::Downloading);
    }
}
