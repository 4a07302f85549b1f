//! Shared utilities across cygwin-builder modules.

pub mod paths;
pub mod temp;

pub use paths::{app_directory, copy_dir_all, default_template_dir};
pub use temp::Workspace;
