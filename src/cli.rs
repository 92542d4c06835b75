//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - --steamapps takes precedence over the positional STEAMAPPS.
//! - --debug is a shorthand for --log-level debug.
//! - With no steamapps argument at all, the first discovered library is used.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// CLI wrapper for the steam_relink library.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Relocate Steam download folders to another drive and symlink them back"
)]
pub struct Args {
    /// steamapps directory to modify (positional; defaults to the first
    /// discovered library).
    #[arg(value_name = "STEAMAPPS", value_hint = ValueHint::DirPath)]
    pub steamapps_pos: Option<PathBuf>,

    /// Explicit steamapps directory option; overrides the positional.
    #[arg(
        long = "steamapps",
        short = 's',
        value_name = "DIR",
        value_hint = ValueHint::DirPath,
        help = "steamapps directory to modify (overrides positional)"
    )]
    pub steamapps: Option<PathBuf>,

    /// Destination base folder on the fast drive.
    #[arg(long, value_hint = ValueHint::DirPath, help = "Destination base folder on the fast drive")]
    pub dest_base: Option<PathBuf>,

    /// List discovered steamapps directories and exit.
    #[arg(long, help = "List discovered steamapps directories and exit")]
    pub list: bool,

    /// Do not relocate steamapps/temp (relocated by default).
    #[arg(long, help = "Only relocate steamapps/downloading, leave steamapps/temp alone")]
    pub skip_temp: bool,

    /// Answer yes to every confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Approve all confirmation prompts")]
    pub assume_yes: bool,

    /// Dry-run: log actions but do not modify the filesystem.
    #[arg(
        long,
        help = "Show what would be done, but do not modify files/directories"
    )]
    pub dry_run: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Print where steam_relink will look for the config file (or
    /// STEAM_RELINK_CONFIG if set), then exit.
    #[arg(
        long,
        help = "Print the config file location used by steam_relink and exit"
    )]
    pub print_config: bool,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

impl Args {
    /// Effective steamapps path: `--steamapps` if provided, else positional.
    pub fn resolved_steamapps(&self) -> Option<PathBuf> {
        if let Some(p) = &self.steamapps {
            return Some(Self::sanitize_path(p));
        }
        self.steamapps_pos.as_deref().map(Self::sanitize_path)
    }

    /// Trim quote characters and one trailing separator that shell quoting
    /// mistakes commonly leave behind (PowerShell single quotes especially).
    fn sanitize_path(p: &std::path::Path) -> PathBuf {
        let s = p.to_string_lossy();
        let trimmed = s.trim();
        let mut inner = if (trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() > 1)
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'') && trimmed.len() > 1)
        {
            trimmed[1..trimmed.len() - 1].to_string()
        } else {
            trimmed.trim_matches(|c| c == '\'' || c == '"').to_string()
        };
        inner.retain(|c| c != '\'' && c != '"');

        if (inner.ends_with('\\') || inner.ends_with('/')) && inner.len() > 1 {
            inner.pop();
        }

        PathBuf::from(inner)
    }

    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(db) = &self.dest_base {
            cfg.dest_base = Some(db.clone());
        }
        if self.skip_temp {
            cfg.link_temp = false;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if self.assume_yes {
            cfg.assume_yes = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
