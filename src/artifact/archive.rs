//! Archive creation for the provisioned Cygwin root.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::process::Cmd;

/// Zip everything under `cygwin_root` into `archive` with 7-Zip.
///
/// 7-Zip runs with `cygwin_root` as its working directory so the archive
/// holds paths relative to the root.
pub fn zip_cygwin(sevenzip: &Path, cygwin_root: &Path, archive: &Path) -> Result<PathBuf> {
    tracing::info!("zipping {}", cygwin_root.display());

    Cmd::path(sevenzip)
        .args(["a", "-ssw", "-r", "-tzip"])
        .arg_path(archive)
        .arg("*")
        .dir(cygwin_root)
        .run()?;

    Ok(archive.to_path_buf())
}
