//! Moving directory contents across volumes.
//!
//! Each entry of the source directory is renamed into the destination first;
//! when the destination sits on another filesystem (the normal case for this
//! tool) the rename fails and we fall back to a tree copy (parallelized for
//! files) followed by removal of the source entry. File mtimes are carried
//! over in the copy path so Steam's cache validation isn't confused by
//! fresh timestamps.

use anyhow::{Context, Result, anyhow};
use filetime::FileTime;
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::platform;

/// Extra free space demanded beyond the measured source size.
const SPACE_CUSHION: u64 = 4 * 1024 * 1024;

/// Sum of file sizes under `dir` (directories and symlinks contribute 0).
fn tree_size_bytes(dir: &Path) -> u64 {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter_map(|e| e.metadata().ok())
        .filter(|m| m.is_file())
        .map(|m| m.len())
        .sum()
}

/// Verify the destination volume can hold the source contents before any
/// entry is moved. Partial moves are much worse to clean up than an early
/// refusal.
pub fn ensure_space_for_move(src: &Path, dest_dir: &Path) -> Result<()> {
    let required = tree_size_bytes(src);
    let available = platform::free_space_bytes(dest_dir)
        .with_context(|| format!("stat filesystem for '{}'", dest_dir.display()))?;
    if available < required.saturating_add(SPACE_CUSHION) {
        return Err(crate::errors::RelinkError::InsufficientSpace {
            required: required as u128,
            available: available as u128,
            dest: dest_dir.to_path_buf(),
        }
        .into());
    }
    debug!(required, available, dest = %dest_dir.display(), "space preflight ok");
    Ok(())
}

/// Move every entry of `src` into `dest` (created if needed), then remove the
/// now-empty `src`, falling back to a recursive removal if stray entries
/// remain. `src` itself is kept only as an empty shell to be replaced by the
/// caller's symlink.
pub fn move_dir_contents(src: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)
        .with_context(|| format!("create destination '{}'", dest.display()))?;

    for entry in fs::read_dir(src).with_context(|| format!("read '{}'", src.display()))? {
        let entry = entry?;
        let from = entry.path();
        let name = entry.file_name();
        let to = dest.join(&name);
        move_entry(&from, &to)?;
    }

    // src should be empty now; tolerate entries that appeared mid-move.
    if let Err(e) = fs::remove_dir(src) {
        debug!(src = %src.display(), error = %e, "remove_dir failed; falling back to remove_dir_all");
        fs::remove_dir_all(src)
            .with_context(|| format!("remove source directory '{}'", src.display()))?;
    }

    info!(src = %src.display(), dest = %dest.display(), "moved directory contents");
    Ok(())
}

/// Move a single entry: rename when possible, copy+remove across filesystems.
fn move_entry(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }

    let meta = fs::symlink_metadata(from)
        .with_context(|| format!("stat '{}'", from.display()))?;
    if meta.is_dir() {
        copy_tree(from, to)?;
        fs::remove_dir_all(from)
            .with_context(|| format!("remove '{}' after copy", from.display()))?;
    } else if meta.is_file() {
        copy_file_with_mtime(from, to)?;
        fs::remove_file(from)
            .with_context(|| format!("remove '{}' after copy", from.display()))?;
    } else {
        // Symlinks and special files inside a download cache are unexpected;
        // refuse rather than flatten them through a copy.
        return Err(anyhow!(
            "refusing to move non-regular entry '{}'",
            from.display()
        ));
    }
    Ok(())
}

/// Copy a directory tree: create the directory skeleton first, then copy file
/// payloads in parallel.
fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    WalkDir::new(src)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_dir())
        .try_for_each(|d| -> Result<()> {
            let rel = d.path().strip_prefix(src)?;
            fs::create_dir_all(dest.join(rel))
                .with_context(|| format!("create directory '{}'", dest.join(rel).display()))?;
            Ok(())
        })?;

    let files: Vec<_> = WalkDir::new(src)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();

    files.par_iter().try_for_each(|path| -> Result<()> {
        let rel = path.strip_prefix(src)?;
        copy_file_with_mtime(path, &dest.join(rel))
    })?;
    Ok(())
}

fn copy_file_with_mtime(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory '{}'", parent.display()))?;
    }
    fs::copy(from, to)
        .with_context(|| format!("copy '{}' -> '{}'", from.display(), to.display()))?;
    if let Ok(meta) = fs::metadata(from) {
        let mtime = FileTime::from_last_modification_time(&meta);
        let _ = filetime::set_file_mtime(to, mtime);
    }
    Ok(())
}
