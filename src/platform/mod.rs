//! Platform-specific helpers.
//! This module hides OS differences (Unix/macOS/Windows) behind a uniform API
//! so the rest of the codebase can remain platform-agnostic.

#[cfg(unix)]
mod common_unix;
#[cfg(target_os = "macos")]
mod macos;
mod temp;
#[cfg(all(unix, not(target_os = "macos")))]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(all(unix, not(target_os = "macos")))]
pub use unix::{
    create_dir_symlink, free_space_bytes, open_log_file_secure_append, privilege_notice,
    set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600,
};

#[cfg(target_os = "macos")]
pub use macos::{
    create_dir_symlink, free_space_bytes, open_log_file_secure_append, privilege_notice,
    set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600,
};

#[cfg(not(unix))]
pub use windows::{
    create_dir_symlink, free_space_bytes, open_log_file_secure_append, privilege_notice,
    set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600,
};
