//! Sibling temp-file naming for atomic config writes.

use std::path::{Path, PathBuf};

/// Create a unique hidden sibling name next to `target` for temp+rename
/// writes. Uniqueness comes from pid + nanos; collisions within one process
/// in the same nanosecond are not a realistic concern for a config file.
pub(super) fn tmp_config_sibling_name(target: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let name = format!(".steam_relink.config.tmp.{pid}.{nanos}");
    target
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_stays_in_parent_and_is_hidden() {
        let t = tmp_config_sibling_name(Path::new("/etc/steam_relink/config.xml"));
        assert_eq!(t.parent(), Some(Path::new("/etc/steam_relink")));
        let name = t.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(".steam_relink.config.tmp."));
    }
}
