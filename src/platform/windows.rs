//! Windows implementations of platform helpers (best-effort, minimal ACL awareness).
//!
//! Notes:
//! - Windows lacks POSIX mode semantics; we do not attempt ACL management here.
//! - Directory symlinks require either Administrator rights or Developer Mode;
//!   error 1314 is surfaced as a distinct variant so callers can show the
//!   remediation steps.
//! - Config writes are done via temp + rename to be atomic.

use anyhow::{Result, bail};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::iter::once;
use std::os::windows::ffi::OsStrExt;
use std::path::Path;

use super::temp::tmp_config_sibling_name;
use crate::errors::RelinkError;

/// Win32 ERROR_PRIVILEGE_NOT_HELD, returned for unprivileged symlink creation.
const ERROR_PRIVILEGE_NOT_HELD: i32 = 1314;

/// Create a directory symbolic link at `link` pointing to `target`.
/// Uses directory-link semantics (required for directories on Windows).
pub fn create_dir_symlink(link: &Path, target: &Path) -> Result<(), RelinkError> {
    std::os::windows::fs::symlink_dir(target, link).map_err(|e| {
        if e.raw_os_error() == Some(ERROR_PRIVILEGE_NOT_HELD) {
            RelinkError::InsufficientPrivilege {
                link: link.to_path_buf(),
                target: target.to_path_buf(),
            }
        } else {
            RelinkError::LinkCreationFailed {
                link: link.to_path_buf(),
                target: target.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Up-front warning so users learn about the privilege requirement before the
/// first failed operation.
pub fn privilege_notice() -> Option<&'static str> {
    Some(
        "Windows symlink requirements: creating symbolic links needs either \
         running as Administrator or Developer Mode enabled \
         (Settings > Update & Security > For developers > Developer Mode).",
    )
}

/// Free bytes available to the caller on the volume holding `path`.
pub fn free_space_bytes(path: &Path) -> io::Result<u64> {
    use windows_sys::Win32::Storage::FileSystem::GetDiskFreeSpaceExW;

    let wide: Vec<u16> = path.as_os_str().encode_wide().chain(once(0)).collect();
    let mut free_avail: u64 = 0;
    let mut _total: u64 = 0;
    let mut _total_free: u64 = 0;
    let ok = unsafe {
        GetDiskFreeSpaceExW(
            wide.as_ptr(),
            &mut free_avail as *mut u64,
            &mut _total as *mut u64,
            &mut _total_free as *mut u64,
        )
    };
    if ok == 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(free_avail)
}

/// Open log file for appending (best-effort; no symlink defense available via std on Windows).
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Write a new config file atomically (create_new) using a temp file + rename.
/// Fails if the target already exists. Best-effort security (no ACL changes).
pub fn write_config_secure_new_0600(path: &Path, contents: &[u8]) -> Result<()> {
    if path.exists() {
        bail!("Config file already exists: {}", path.display());
    }
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "config path has no parent"))?;
    fs::create_dir_all(parent)?;

    // Create a unique sibling temp file, write, fsync, then rename into place.
    let tmp = tmp_config_sibling_name(path);
    let mut f = OpenOptions::new().write(true).create_new(true).open(&tmp)?;
    f.write_all(contents)?;
    f.sync_all()?; // ensure data is on disk before renaming
    fs::rename(&tmp, path)?;
    // Note: On Windows, fsync of the parent directory is not generally supported via std.
    Ok(())
}

/// No-op on Windows; POSIX-style directory modes are not applicable.
pub fn set_dir_mode_0700(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// No-op on Windows; POSIX-style file modes are not applicable.
pub fn set_file_mode_0600(_path: &Path) -> io::Result<()> {
    Ok(())
}
