//! CLI command handlers.
//!
//! - `build` - run the whole installer pipeline
//! - `mirrors` - print the Cygwin mirror list
//! - `preflight` - run preflight checks only

pub mod build;
mod mirrors;
mod preflight;

pub use build::{cmd_build, BuildOptions};
pub use mirrors::cmd_list_mirrors;
pub use preflight::cmd_preflight;
