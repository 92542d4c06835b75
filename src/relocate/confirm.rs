//! Confirmation seam.
//!
//! The executor never talks to a terminal directly; it asks an abstract
//! `Confirm` for yes/no answers so the core stays testable and scriptable.

use std::io::{self, BufRead, Write};

use crate::output as out;

/// A synchronous yes/no question with a short title and a longer message.
pub trait Confirm {
    fn confirm(&self, title: &str, message: &str) -> bool;
}

/// Approve everything. Used for `--yes` runs and tests.
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _title: &str, _message: &str) -> bool {
        true
    }
}

/// Decline everything. Used for non-interactive runs without `--yes`, where
/// silently mutating a Steam library would be worse than doing nothing.
#[derive(Debug, Default)]
pub struct DeclineAll;

impl Confirm for DeclineAll {
    fn confirm(&self, title: &str, _message: &str) -> bool {
        out::print_warn(&format!(
            "{title}: declined (not a terminal; pass --yes to approve automatically)"
        ));
        false
    }
}

/// Interactive [y/N] prompt on stdin/stdout.
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, title: &str, message: &str) -> bool {
        println!("{title}");
        println!("{message}");
        print!("Proceed? [y/N] ");
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assume_yes_approves() {
        assert!(AssumeYes.confirm("t", "m"));
    }

    #[test]
    fn decline_all_declines() {
        assert!(!DeclineAll.confirm("t", "m"));
    }
}
