//! Build artifacts - the Cygwin archive and the NSIS installer.
//!
//! - `archive` - zips the provisioned root with the bundled 7-Zip
//! - `nsis` - fills the NSIS template and runs `makensis`

pub mod archive;
pub mod nsis;

pub use archive::zip_cygwin;
pub use nsis::{compile_script, make_installer};
