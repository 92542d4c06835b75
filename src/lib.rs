//! Core library for `steam_relink`.
//!
//! Relocates the churn-heavy subdirectories of a Steam `steamapps` directory
//! ("downloading", optionally "temp") onto another volume and leaves symlinks
//! behind so the original paths keep working. The library carries the whole
//! engine: discovering libraries from well-known locations and
//! libraryfolders.vdf files, classifying what currently sits at each link
//! path, planning the link/target pairs, and executing each transition with
//! per-operation failure isolation. The binary in `main.rs` is a thin CLI
//! over these pieces.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod errors;
pub mod output;
pub mod platform;
pub mod relocate;
pub mod shutdown;

pub use config::{
    Config, LogLevel, default_config_path, default_log_path, load_config_from_xml_path,
    path_has_symlink_ancestor,
};
pub use discovery::discover_steamapps_dirs;
pub use errors::RelinkError;
pub use relocate::{
    OperationReport, Outcome, PathState, RelocationOperation, RelocationPlan, RelocationTarget,
    classify, execute_plan, plan_relocation,
};
