//! Typed error definitions for steam_relink.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelinkError {
    #[error("Source is not an existing directory: {}", .0.display())]
    InvalidSource(PathBuf),

    #[error(
        "Failed to create symlink due to insufficient privileges.\n\
         To fix this, either:\n\
         1. Run this application as Administrator, OR\n\
         2. Enable Developer Mode in Windows Settings:\n\
         \x20  Settings > Update & Security > For developers > Developer Mode\n\n\
         Target: {} -> {}",
        .link.display(), .target.display()
    )]
    InsufficientPrivilege { link: PathBuf, target: PathBuf },

    #[error(
        "Failed to create symlink: {source}\nTarget: {} -> {}",
        .link.display(), .target.display()
    )]
    LinkCreationFailed {
        link: PathBuf,
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move contents of '{}' to '{}': {reason}", .src.display(), .dest.display())]
    MoveFailed {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    #[error(
        "Insufficient disk space for destination {}: need {required} bytes, have {available} bytes",
        .dest.display()
    )]
    InsufficientSpace {
        required: u128,
        available: u128,
        dest: PathBuf,
    },

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl RelinkError {
    /// Stable machine-readable code, used as a structured field in logs.
    pub fn code(&self) -> &'static str {
        match self {
            RelinkError::InvalidSource(_) => "invalid_source",
            RelinkError::InsufficientPrivilege { .. } => "insufficient_privilege",
            RelinkError::LinkCreationFailed { .. } => "link_creation_failed",
            RelinkError::MoveFailed { .. } => "move_failed",
            RelinkError::InsufficientSpace { .. } => "insufficient_space",
            RelinkError::Interrupted => "interrupted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn privilege_error_carries_remediation_guidance() {
        let err = RelinkError::InsufficientPrivilege {
            link: PathBuf::from("C:/SteamLibrary/steamapps/downloading"),
            target: PathBuf::from("D:/fast/SteamLibrary_symlink/downloading"),
        };
        let text = err.to_string();
        assert!(text.contains("Administrator"));
        assert!(text.contains("Developer Mode"));
        assert!(text.contains("downloading"));
        assert_eq!(err.code(), "insufficient_privilege");
    }

    #[test]
    fn codes_are_distinct_and_stable() {
        let errs = [
            RelinkError::InvalidSource(PathBuf::from("/x")),
            RelinkError::Interrupted,
        ];
        assert_eq!(errs[0].code(), "invalid_source");
        assert_eq!(errs[1].code(), "interrupted");
    }
}
