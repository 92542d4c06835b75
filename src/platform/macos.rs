//! macOS implementations of platform helpers.
//! Split from the generic Unix module to allow future macOS-specific
//! extensions (APFS clone-aware copies, notably).

use super::common_unix::{self, atomic_write_0600};
use anyhow::Result;
use std::fs::{self, File};
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

pub use common_unix::{create_dir_symlink, free_space_bytes, privilege_notice};

/// Open log file for appending; 0600 on create, existing permissions kept.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    common_unix::open_log_file_secure_append(path)
}

/// Write config atomically: temp file (0600) + fsync + rename + fsync dir.
pub fn write_config_secure_new_0600(path: &Path, contents: &[u8]) -> Result<()> {
    atomic_write_0600(path, contents)
}

/// POSIX chmod 0700 for directories.
pub fn set_dir_mode_0700(path: &Path) -> io::Result<()> {
    let perm = fs::Permissions::from_mode(0o700);
    fs::set_permissions(path, perm)
}

/// POSIX chmod 0600 for files.
pub fn set_file_mode_0600(path: &Path) -> io::Result<()> {
    let perm = fs::Permissions::from_mode(0o600);
    fs::set_permissions(path, perm)
}
