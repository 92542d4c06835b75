//! Config module.
//! Provides configuration types, default paths, XML loading, and the
//! first-run template.

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{create_template_config, ensure_default_config_exists, load_config_from_xml_path};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "STEAM_RELINK_CONFIG";

/// Destination base suggestions probed when nothing is configured. Mount
/// points where a second drive typically appears on Linux.
pub const DEST_BASE_HINTS: &[&str] = &["/mnt", "/media", "/run/media"];
