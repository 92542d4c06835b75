//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/log paths and detects symlinked ancestors
//! for safety.

use anyhow::{Result, anyhow};
use dirs::{config_dir, data_dir};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// OS-appropriate default config path.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(mut base) = config_dir() {
        base.push("steam_relink");
        base.push("config.xml");
        return Ok(base);
    }
    std::env::var("HOME")
        .map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join("steam_relink")
                .join("config.xml")
        })
        .map_err(|_| anyhow!("cannot determine a config directory (no config dir, no HOME)"))
}

/// OS-appropriate default log file path (data dir).
pub fn default_log_path() -> Result<PathBuf> {
    if let Some(mut base) = data_dir() {
        base.push("steam_relink");
        base.push("steam_relink.log");
        return Ok(base);
    }
    std::env::var("HOME")
        .map(|h| {
            PathBuf::from(h)
                .join(".local")
                .join("share")
                .join("steam_relink")
                .join("steam_relink.log")
        })
        .map_err(|_| anyhow!("cannot determine a data directory (no data dir, no HOME)"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_end_with_expected_names() {
        let cfg = default_config_path().unwrap();
        assert!(cfg.ends_with("steam_relink/config.xml") || cfg.ends_with("steam_relink\\config.xml"));
        let log = default_log_path().unwrap();
        assert_eq!(log.file_name().unwrap(), "steam_relink.log");
    }

    #[cfg(unix)]
    #[test]
    fn detects_symlinked_ancestor() {
        use std::os::unix::fs::symlink;
        let td = tempfile::tempdir().unwrap();
        let real = td.path().join("real");
        fs::create_dir_all(&real).unwrap();
        let alias = td.path().join("alias");
        symlink(&real, &alias).unwrap();

        assert!(path_has_symlink_ancestor(&alias.join("config.xml")).unwrap());
        assert!(!path_has_symlink_ancestor(&real.join("config.xml")).unwrap());
    }
}
