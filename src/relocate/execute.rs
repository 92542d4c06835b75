//! Relocation execution.
//!
//! One operation at a time: classify the link path, perform the
//! state-appropriate transition, and record the outcome. Failures are
//! isolated per operation; a broken "downloading" never prevents "temp" from
//! being attempted.

use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::errors::RelinkError;
use crate::platform;
use crate::shutdown;

use super::classify::{PathState, classify};
use super::confirm::Confirm;
use super::move_contents::{ensure_space_for_move, move_dir_contents};
use super::plan::{RelocationOperation, RelocationPlan};

/// What happened to a single operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Link already pointed at the right target; nothing done.
    AlreadyLinked,
    /// Fresh link created (missing or empty-directory path).
    Linked,
    /// An existing wrong link was replaced.
    Replaced,
    /// Directory contents were moved, then the link created.
    MovedAndLinked,
    /// User declined; nothing mutated.
    Skipped,
    /// The operation failed; see the message.
    Failed,
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed)
    }
}

/// Record of one executed operation.
#[derive(Debug)]
pub struct OperationReport {
    pub operation: RelocationOperation,
    pub outcome: Outcome,
    pub message: String,
    /// Typed error for failures that have one (privilege, link, move).
    pub error: Option<RelinkError>,
}

impl OperationReport {
    fn ok(operation: &RelocationOperation, outcome: Outcome, message: String) -> Self {
        Self {
            operation: operation.clone(),
            outcome,
            message,
            error: None,
        }
    }

    fn failed(operation: &RelocationOperation, message: String, error: Option<RelinkError>) -> Self {
        Self {
            operation: operation.clone(),
            outcome: Outcome::Failed,
            message,
            error,
        }
    }

    /// The user-facing log line: informational, or `ERROR:`-prefixed.
    pub fn log_line(&self) -> String {
        if self.outcome.is_failure() {
            format!("ERROR: {}", self.message)
        } else {
            self.message.clone()
        }
    }
}

/// Execute every operation in the plan sequentially. Each operation is
/// classified and handled independently; the returned reports line up with
/// `plan.operations`. A requested shutdown stops before the next operation
/// begins, never mid-move.
pub fn execute_plan(
    plan: &RelocationPlan,
    confirm: &dyn Confirm,
    dry_run: bool,
) -> Vec<OperationReport> {
    plan.operations
        .iter()
        .map(|op| {
            if shutdown::is_requested() {
                return OperationReport::failed(
                    op,
                    format!("{}: {}", op.link_path.display(), RelinkError::Interrupted),
                    Some(RelinkError::Interrupted),
                );
            }
            let report = execute_operation(op, confirm, dry_run);
            match report.outcome {
                Outcome::Failed => {
                    warn!(code = report.error.as_ref().map(|e| e.code()).unwrap_or("unknown"),
                          link = %op.link_path.display(), "operation failed")
                }
                _ => info!(outcome = ?report.outcome, link = %op.link_path.display(), "operation done"),
            }
            report
        })
        .collect()
}

/// Handle one operation according to the current on-disk state.
pub fn execute_operation(
    op: &RelocationOperation,
    confirm: &dyn Confirm,
    dry_run: bool,
) -> OperationReport {
    let link = &op.link_path;
    let target = &op.target_path;

    match classify(link, target) {
        PathState::SymlinkCorrect => OperationReport::ok(
            op,
            Outcome::AlreadyLinked,
            format!("OK: {} already linked to {}", link.display(), target.display()),
        ),

        PathState::SymlinkWrong => {
            if !confirm.confirm(
                "Replace symlink",
                &format!(
                    "{} is a symlink to a different target. Replace it?",
                    link.display()
                ),
            ) {
                return OperationReport::ok(
                    op,
                    Outcome::Skipped,
                    format!("Skipped replacing symlink: {}", link.display()),
                );
            }
            if dry_run {
                return OperationReport::ok(
                    op,
                    Outcome::Skipped,
                    format!("Dry-run: would replace symlink {}", link.display()),
                );
            }
            if let Err(e) = remove_link(link) {
                return OperationReport::failed(op, e.to_string(), None);
            }
            match link_to_target(link, target) {
                Ok(()) => OperationReport::ok(
                    op,
                    Outcome::Replaced,
                    format!("Replaced symlink: {} -> {}", link.display(), target.display()),
                ),
                Err(e) => {
                    let msg = e.to_string();
                    OperationReport::failed(op, msg, Some(e))
                }
            }
        }

        PathState::EmptyDirectory => {
            if dry_run {
                return OperationReport::ok(
                    op,
                    Outcome::Skipped,
                    format!("Dry-run: would link empty directory {}", link.display()),
                );
            }
            if let Err(e) = fs::remove_dir(link) {
                return OperationReport::failed(
                    op,
                    format!("Failed to remove empty directory '{}': {e}", link.display()),
                    None,
                );
            }
            match link_to_target(link, target) {
                Ok(()) => OperationReport::ok(
                    op,
                    Outcome::Linked,
                    format!(
                        "Linked (empty replaced): {} -> {}",
                        link.display(),
                        target.display()
                    ),
                ),
                Err(e) => {
                    let msg = e.to_string();
                    OperationReport::failed(op, msg, Some(e))
                }
            }
        }

        PathState::NonEmptyDirectory => {
            if !confirm.confirm(
                "Move contents?",
                &format!(
                    "{} is a non-empty directory. Move its contents to {} and replace with a symlink?",
                    link.display(),
                    target.display()
                ),
            ) {
                return OperationReport::ok(
                    op,
                    Outcome::Skipped,
                    format!("Skipped: left existing directory: {}", link.display()),
                );
            }
            if dry_run {
                return OperationReport::ok(
                    op,
                    Outcome::Skipped,
                    format!(
                        "Dry-run: would move contents of {} to {}",
                        link.display(),
                        target.display()
                    ),
                );
            }
            if let Err(e) = ensure_space_for_move(link, &parent_or_self(target)) {
                let typed = e.downcast::<RelinkError>().ok();
                return OperationReport::failed(
                    op,
                    typed
                        .as_ref()
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| format!("Space check failed for {}", target.display())),
                    typed,
                );
            }
            if let Err(e) = move_dir_contents(link, target) {
                let err = RelinkError::MoveFailed {
                    src: link.clone(),
                    dest: target.clone(),
                    reason: format!("{e:#}"),
                };
                let msg = err.to_string();
                return OperationReport::failed(op, msg, Some(err));
            }
            match link_to_target(link, target) {
                Ok(()) => OperationReport::ok(
                    op,
                    Outcome::MovedAndLinked,
                    format!(
                        "Moved contents and linked: {} -> {}",
                        link.display(),
                        target.display()
                    ),
                ),
                Err(e) => {
                    let msg = e.to_string();
                    OperationReport::failed(op, msg, Some(e))
                }
            }
        }

        PathState::NonDirectoryFile => OperationReport::failed(
            op,
            format!("Path exists and is not a directory: {}", link.display()),
            None,
        ),

        PathState::Missing => {
            if dry_run {
                return OperationReport::ok(
                    op,
                    Outcome::Skipped,
                    format!("Dry-run: would link {} -> {}", link.display(), target.display()),
                );
            }
            match link_to_target(link, target) {
                Ok(()) => OperationReport::ok(
                    op,
                    Outcome::Linked,
                    format!("Linked: {} -> {}", link.display(), target.display()),
                ),
                Err(e) => {
                    let msg = e.to_string();
                    OperationReport::failed(op, msg, Some(e))
                }
            }
        }
    }
}

/// Ensure the target directory exists, then create the symlink. The single
/// link primitive for every state transition.
fn link_to_target(link: &Path, target: &Path) -> Result<(), RelinkError> {
    fs::create_dir_all(target).map_err(|e| RelinkError::LinkCreationFailed {
        link: link.to_path_buf(),
        target: target.to_path_buf(),
        source: e,
    })?;
    platform::create_dir_symlink(link, target)
}

fn remove_link(link: &Path) -> std::io::Result<()> {
    // On Windows a directory symlink is removed with remove_dir; on Unix it's
    // a plain file-level unlink.
    #[cfg(windows)]
    {
        fs::remove_dir(link).or_else(|_| fs::remove_file(link))
    }
    #[cfg(not(windows))]
    {
        fs::remove_file(link)
    }
}

fn parent_or_self(path: &Path) -> std::path::PathBuf {
    path.parent()
        .filter(|p| p.exists())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relocate::confirm::AssumeYes;
    use crate::relocate::plan::plan_relocation;
    use tempfile::tempdir;

    #[test]
    fn requested_shutdown_fails_remaining_operations() {
        let td = tempdir().unwrap();
        let sa = td.path().join("Lib/steamapps");
        std::fs::create_dir_all(&sa).unwrap();
        let plan = plan_relocation(&sa, &td.path().join("ssd"), true).unwrap();

        shutdown::request();
        let reports = execute_plan(&plan, &AssumeYes, false);
        shutdown::reset();

        assert_eq!(reports.len(), 2);
        for report in &reports {
            assert_eq!(report.outcome, Outcome::Failed);
            assert_eq!(
                report.error.as_ref().map(|e| e.code()),
                Some("interrupted")
            );
        }
        assert!(
            !sa.join("downloading").exists(),
            "no link may be created after an interrupt"
        );
    }
}
