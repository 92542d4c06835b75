//! Library discovery: find every steamapps directory on the host.

pub mod libraries;
pub mod vdf;

pub use libraries::{default_steamapps_dirs, discover_from, discover_steamapps_dirs};
pub use vdf::{expand_user_path, extract_path_values, library_roots_from_file};
