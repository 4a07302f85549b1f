//! The per-run build workspace.
//!
//! A [`Workspace`] owns a fresh temporary directory holding a copy of the
//! template tree. Dropping it removes the whole directory, so cleanup happens
//! on every exit path without an exit hook.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::paths::{copy_dir_all, TEMPLATE_DIR_NAME};

/// Scratch directory for one build.
pub struct Workspace {
    // Removed recursively on drop.
    _temp_dir: TempDir,
    root: PathBuf,
}

impl Workspace {
    /// Create a unique temp directory and seed `buildenv/` in it from `template`.
    pub fn create(template: &Path) -> Result<Self> {
        tracing::info!("creating temp directory");
        let temp_dir = tempfile::Builder::new()
            .prefix("cygwin-builder")
            .tempdir()
            .context("Failed to create temp directory")?;
        let root = temp_dir.path().join(TEMPLATE_DIR_NAME);
        tracing::info!("temp directory = \"{}\"", root.display());

        copy_dir_all(template, &root)?;

        Ok(Self {
            _temp_dir: temp_dir,
            root,
        })
    }

    /// The `buildenv` directory every build step works in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the bootstrap installer is stored.
    pub fn installer_path(&self) -> PathBuf {
        self.root.join("cygwin_installer.exe")
    }

    /// Install root handed to the bootstrap installer.
    pub fn cygwin_root(&self) -> PathBuf {
        self.root.join("cygwin")
    }

    /// Bundled 7-Zip executable.
    pub fn sevenzip(&self) -> PathBuf {
        self.root.join("7z").join("7z.exe")
    }

    /// Archive of the provisioned root consumed by the NSIS script.
    pub fn archive_path(&self) -> PathBuf {
        self.root.join("cygwin.zip")
    }
}
