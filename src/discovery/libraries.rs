//! Steam library discovery.
//!
//! Merges well-known per-platform install locations with the libraries listed
//! in every libraryfolders.vdf we can find, and returns the set of existing
//! `steamapps` directories. Read-only; repeated calls recompute from disk.

use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::debug;

use super::vdf::library_roots_from_file;

/// Well-known steamapps locations for the host platform (not checked for
/// existence here).
pub fn default_steamapps_dirs() -> Vec<PathBuf> {
    let mut out = Vec::new();

    #[cfg(target_os = "linux")]
    if let Some(home) = dirs::home_dir() {
        out.push(home.join(".local/share/Steam/steamapps"));
        out.push(home.join(".steam/steam/steamapps"));
        // Flatpak Steam keeps its own data root.
        out.push(home.join(".var/app/com.valvesoftware.Steam/.local/share/Steam/steamapps"));
    }

    #[cfg(target_os = "macos")]
    if let Some(home) = dirs::home_dir() {
        out.push(home.join("Library/Application Support/Steam/steamapps"));
    }

    #[cfg(target_os = "windows")]
    {
        out.push(PathBuf::from(r"C:\Program Files (x86)\Steam\steamapps"));
        out.push(PathBuf::from(r"C:\Program Files\Steam\steamapps"));
    }

    out
}

/// Plausible libraryfolders.vdf locations for the host platform. Each default
/// steamapps dir carries one.
pub fn libraryfolders_candidates() -> Vec<PathBuf> {
    default_steamapps_dirs()
        .into_iter()
        .map(|sa| sa.join("libraryfolders.vdf"))
        .collect()
}

/// Core discovery seam: merge explicit candidate lists. `defaults` are taken
/// as steamapps directories directly; each entry of `vdf_files` is parsed and
/// its library roots have `steamapps` appended. Only existing directories
/// survive; the result is deduplicated and lexicographically sorted for
/// stable presentation.
pub fn discover_from(defaults: &[PathBuf], vdf_files: &[PathBuf]) -> Vec<PathBuf> {
    let mut found: BTreeSet<PathBuf> = BTreeSet::new();

    for sa in defaults {
        if sa.is_dir() {
            found.insert(sa.clone());
        }
    }

    for vdf in vdf_files {
        if !vdf.is_file() {
            continue;
        }
        for root in library_roots_from_file(vdf) {
            let sa = root.join("steamapps");
            if sa.is_dir() {
                found.insert(sa);
            } else {
                debug!(root = %root.display(), "library root has no steamapps directory");
            }
        }
    }

    found.into_iter().collect()
}

/// Discover every existing steamapps directory on this host.
pub fn discover_steamapps_dirs() -> Vec<PathBuf> {
    discover_from(&default_steamapps_dirs(), &libraryfolders_candidates())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn merges_defaults_and_vdf_libraries_sorted_and_deduped() {
        let td = tempfile::tempdir().unwrap();

        // A default location that exists.
        let native = td.path().join("native/Steam/steamapps");
        fs::create_dir_all(&native).unwrap();

        // A second library referenced from the vdf.
        let extra_root = td.path().join("z-extra/SteamLibrary");
        fs::create_dir_all(extra_root.join("steamapps")).unwrap();

        // The vdf also repeats the native library root -> must dedupe.
        let native_root = td.path().join("native/Steam");
        let vdf = native.join("libraryfolders.vdf");
        fs::write(
            &vdf,
            format!(
                "\"libraryfolders\"\n{{\n  \"0\" {{ \"path\" \"{}\" }}\n  \"1\" {{ \"path\" \"{}\" }}\n}}\n",
                extra_root.display(),
                native_root.display()
            ),
        )
        .unwrap();

        let got = discover_from(&[native.clone()], &[vdf]);
        let mut expected = vec![native, extra_root.join("steamapps")];
        expected.sort();
        assert_eq!(got, expected);
    }

    #[test]
    fn missing_defaults_and_vdfs_are_ignored() {
        let td = tempfile::tempdir().unwrap();
        let got = discover_from(
            &[td.path().join("not-there/steamapps")],
            &[td.path().join("not-there.vdf")],
        );
        assert!(got.is_empty());
    }

    #[test]
    fn library_root_without_steamapps_is_skipped() {
        let td = tempfile::tempdir().unwrap();
        let bare_root = td.path().join("BareLibrary");
        fs::create_dir_all(&bare_root).unwrap();
        let vdf = td.path().join("libraryfolders.vdf");
        fs::write(
            &vdf,
            format!(
                "\"libraryfolders\"\n{{\n  \"0\" {{ \"path\" \"{}\" }}\n}}\n",
                bare_root.display()
            ),
        )
        .unwrap();

        assert!(discover_from(&[], &[vdf]).is_empty());
    }

    #[test]
    fn default_candidates_pair_with_vdf_files() {
        let defaults = default_steamapps_dirs();
        let vdfs = libraryfolders_candidates();
        assert_eq!(defaults.len(), vdfs.len());
        for (sa, vdf) in defaults.iter().zip(&vdfs) {
            assert_eq!(vdf.parent(), Some(sa.as_path()));
        }
    }
}
