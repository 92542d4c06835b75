//! Tolerant libraryfolders.vdf scanning.
//!
//! Steam's libraryfolders.vdf is a nested key-value text format, but the only
//! thing we need from it is the flat list of `"path" "<value>"` leaves, so a
//! regex scan over the raw text is deliberately used instead of a full VDF
//! parse. It handles both the old and the new file layout.
//!
//! Discovery must be best-effort: unreadable or malformed files yield an
//! empty result, never an error.

use regex::Regex;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

fn path_value_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""path"\s+"([^"]+)""#).expect("static regex"))
}

fn env_var_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{(\w+)\}|\$(\w+)").expect("static regex"))
}

/// Extract every `"path"` value from VDF text, in order of appearance.
/// Values are returned raw (no expansion, no existence filtering).
pub fn extract_path_values(text: &str) -> Vec<String> {
    path_value_re()
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

/// Expand a leading `~` and any `$VAR`/`${VAR}` references in a raw path value.
/// Unset variables expand to an empty string, matching shell behavior closely
/// enough for config values.
pub fn expand_user_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();

    let with_home = if trimmed == "~" {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(trimmed))
    } else if let Some(rest) = trimmed.strip_prefix("~/") {
        match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(trimmed),
        }
    } else {
        PathBuf::from(trimmed)
    };

    let s = with_home.to_string_lossy();
    if !s.contains('$') {
        return with_home;
    }
    let expanded = env_var_re().replace_all(&s, |caps: &regex::Captures<'_>| {
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or("");
        env::var(name).unwrap_or_default()
    });
    PathBuf::from(expanded.into_owned())
}

/// Parse a libraryfolders.vdf on disk and return the library root paths that
/// currently exist. Read failures are absorbed: the rest of discovery must
/// never be blocked by one broken file.
pub fn library_roots_from_file(vdf_path: &Path) -> Vec<PathBuf> {
    let text = match fs::read_to_string(vdf_path) {
        Ok(t) => t,
        Err(e) => {
            debug!(path = %vdf_path.display(), error = %e, "skipping unreadable libraryfolders file");
            return Vec::new();
        }
    };

    extract_path_values(&text)
        .iter()
        .map(|raw| expand_user_path(raw))
        .filter(|p| p.exists())
        .collect()
}
