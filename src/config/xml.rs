//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Creates a secure template if missing (unless STEAM_RELINK_CONFIG is set).
//!
//! Notes:
//! - This module only reads/writes the config file; the destination base is
//!   validated at plan time, not here.
//! - Unknown XML fields are rejected (serde deny_unknown_fields) to surface
//!   misconfigurations early.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::CONFIG_ENV_VAR;
use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use crate::platform::{set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "dest_base")]
    dest_base: Option<String>,
    #[serde(rename = "link_temp")]
    link_temp: Option<bool>,
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
}

/// Map XmlConfig -> Config, trimming whitespace and dropping empty strings.
fn xml_to_config(parsed: XmlConfig) -> Config {
    let mut cfg = Config::default();

    if let Some(s) = parsed.dest_base.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.dest_base = Some(PathBuf::from(trimmed));
        }
    }
    if let Some(v) = parsed.link_temp {
        cfg.link_temp = v;
    }
    if let Some(s) = parsed.log_level.as_deref()
        && let Ok(level) = s.trim().parse::<LogLevel>()
    {
        cfg.log_level = level;
    }
    if let Some(s) = parsed.log_file.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(PathBuf::from(trimmed));
        }
    }

    cfg
}

/// Load a Config from a specific XML file path (quick_xml).
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    Ok(xml_to_config(parsed))
}

/// Load the effective file config: STEAM_RELINK_CONFIG wins, else the default
/// path if a file exists there. Ok(None) when no config file is present.
pub fn load_config() -> Result<Option<Config>> {
    if let Some(p) = env::var_os(CONFIG_ENV_VAR) {
        let path = PathBuf::from(p);
        debug!(path = %path.display(), "loading config from {CONFIG_ENV_VAR}");
        return load_config_from_xml_path(&path).map(Some);
    }

    let path = default_config_path().context("resolve default config path")?;
    if !path.exists() {
        return Ok(None);
    }
    debug!(path = %path.display(), "loading config from default path");
    load_config_from_xml_path(&path).map(Some)
}

/// Create default template config file and parent directory (best-effort permissions).
/// Uses secure creation to avoid following attacker-controlled symlinks on Unix.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        return Err(anyhow::anyhow!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        ));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        let _ = set_dir_mode_0700(parent);
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/steam_relink.log".into());

    let content = format!(
        "<!--\n  steam_relink configuration (XML)\n\n  Fields:\n    dest_base  -> base directory on the destination drive; a\n                  <library>_symlink folder is created below it\n    link_temp  -> also relocate steamapps/temp (true/false)\n    log_level  -> quiet | normal | info | debug\n    log_file   -> path to log file (optional; stdout/stderr still used)\n\n  Notes:\n    - CLI flags override XML values.\n-->\n<config>\n  <dest_base></dest_base>\n  <link_temp>true</link_temp>\n  <log_level>normal</log_level>\n  <log_file>{}</log_file>\n</config>\n",
        suggested_log
    );

    // Atomic, secure write (O_NOFOLLOW + create_new on Unix), then tighten perms.
    write_config_secure_new_0600(path, content.as_bytes())?;
    let _ = set_file_mode_0600(path);

    info!("Created template config at {}", path.display());
    Ok(())
}

/// Create default config if STEAM_RELINK_CONFIG not set; return created path
/// so the CLI can inform the user.
pub fn ensure_default_config_exists() -> Option<PathBuf> {
    if env::var_os(CONFIG_ENV_VAR).is_some() {
        return None;
    }

    let cfg_path = match default_config_path() {
        Ok(p) => p,
        Err(_) => return None,
    };

    if cfg_path.exists() {
        return None;
    }

    match create_template_config(&cfg_path) {
        Ok(()) => Some(cfg_path),
        Err(e) => {
            eprintln!(
                "Failed to create template config at {}: {}",
                cfg_path.display(),
                e
            );
            None
        }
    }
}
