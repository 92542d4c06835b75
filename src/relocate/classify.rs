//! On-disk state classification for a planned link path.
//!
//! The executor dispatches on this enum through one exhaustive match, so a new
//! state cannot be silently ignored.

use std::fs;
use std::io;
use std::path::Path;

/// Mutually exclusive, exhaustive states a link path can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    /// Nothing exists at the link path.
    Missing,
    /// A symlink that already resolves to the intended target.
    SymlinkCorrect,
    /// A symlink pointing somewhere else (or broken; remediation is the same).
    SymlinkWrong,
    /// An existing directory with no entries.
    EmptyDirectory,
    /// An existing directory with contents that would need moving.
    NonEmptyDirectory,
    /// A regular file or other non-directory entry; unsafe to touch.
    NonDirectoryFile,
}

/// Canonicalize without the `\\?\` prefix Windows would otherwise produce,
/// so link targets compare equal to user-supplied paths.
fn canonical(path: &Path) -> io::Result<std::path::PathBuf> {
    dunce::canonicalize(path)
}

/// Classify the current state of `link_path` relative to the intended
/// `target_path`. Total: every reachable filesystem state maps to exactly one
/// variant, and resolution failures degrade to `SymlinkWrong` rather than
/// propagating (the safe remediation, offering a replace, is identical).
pub fn classify(link_path: &Path, target_path: &Path) -> PathState {
    let meta = match fs::symlink_metadata(link_path) {
        Ok(m) => m,
        Err(_) => return PathState::Missing,
    };

    if meta.file_type().is_symlink() {
        return match (canonical(link_path), canonical(target_path)) {
            (Ok(a), Ok(b)) if a == b => PathState::SymlinkCorrect,
            _ => PathState::SymlinkWrong,
        };
    }

    if meta.is_dir() {
        let empty = match fs::read_dir(link_path) {
            Ok(mut it) => it.next().is_none(),
            // Unreadable directory: treat as non-empty so we never delete it.
            Err(_) => false,
        };
        return if empty {
            PathState::EmptyDirectory
        } else {
            PathState::NonEmptyDirectory
        };
    }

    PathState::NonDirectoryFile
}
