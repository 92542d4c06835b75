//! Common Unix helpers shared by macOS and other Unix targets.
//! Symlink creation, statvfs free-space queries, and atomic 0600 writes.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use super::temp::tmp_config_sibling_name;
use crate::errors::RelinkError;

/// Create a symbolic link at `link` pointing to `target`. Unix symlinks do
/// not distinguish file and directory links, and creation needs no special
/// privileges, so the privilege variant is unreachable here.
pub fn create_dir_symlink(link: &Path, target: &Path) -> Result<(), RelinkError> {
    std::os::unix::fs::symlink(target, link).map_err(|e| RelinkError::LinkCreationFailed {
        link: link.to_path_buf(),
        target: target.to_path_buf(),
        source: e,
    })
}

/// Platform notice shown before a run; Unix needs none.
pub fn privilege_notice() -> Option<&'static str> {
    None
}

/// Free bytes available to unprivileged users on the filesystem holding `path`.
pub fn free_space_bytes(path: &Path) -> io::Result<u64> {
    let mut s: libc::statvfs = unsafe { std::mem::zeroed() };
    let cpath = std::ffi::CString::new(path.as_os_str().as_bytes())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains NUL"))?;
    let rc = unsafe { libc::statvfs(cpath.as_ptr(), &mut s) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok((s.f_bavail as u64).saturating_mul(s.f_frsize as u64))
}

/// Atomically write `contents` to `path` with 0600 permissions on the file,
/// ensuring durability by fsync-ing the temp file and the parent directory.
///
/// Steps:
/// - Ensure parent directory exists
/// - Create unique hidden temp sibling with mode 0600 and O_EXCL semantics
/// - Write contents, fsync temp, rename to destination, fsync parent dir
/// - On failure, remove the temp file best-effort and return the error
pub fn atomic_write_0600(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "config path has no parent"))?;
    fs::create_dir_all(parent).with_context(|| format!("create parent '{}'", parent.display()))?;

    let tmp = tmp_config_sibling_name(path);

    let mut f = OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(&tmp)
        .with_context(|| format!("create temp '{}'", tmp.display()))?;
    f.write_all(contents).context("write temp")?;
    f.sync_all().context("fsync temp")?;
    drop(f);

    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e)
            .with_context(|| format!("rename '{}' -> '{}'", tmp.display(), path.display()));
    }

    let dir_file =
        File::open(parent).with_context(|| format!("open dir '{}'", parent.display()))?;
    dir_file.sync_all().context("fsync parent dir")?;
    Ok(())
}

/// Open log file for appending; set 0600 only when creating a new file.
/// If the file already exists, its permissions are preserved so administrator
/// adjustments (e.g. group-readable for log shipping) stay intact.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::PermissionsExt;

    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let existed = path.exists();
    let f = OpenOptions::new()
        .create(true)
        .append(true)
        .mode(0o600) // applies on create
        .open(path)?;
    if !existed {
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    Ok(f)
}
