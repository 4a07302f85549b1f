//! Build command - produces the custom Cygwin installer.
//!
//! Steps, in order: preflight, workspace, fetch installer, provision
//! packages, fill NSIS script, zip the root, run `makensis`, copy the
//! installer out. The workspace is dropped (and deleted) when this returns,
//! whatever the outcome.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::artifact::{self, nsis::TEMPLATE_SCRIPT};
use crate::common::Workspace;
use crate::config::Settings;
use crate::download;
use crate::preflight;
use crate::provision;
use crate::timing::Timer;

/// Everything a build needs besides the network and the external tools.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub settings: Settings,
    /// Template tree copied into the workspace
    pub template_dir: PathBuf,
    /// Directory the finished installer is copied into
    pub output_dir: PathBuf,
    /// Prepended to the detected Cygwin version, joined with `-`
    pub version_suffix: Option<String>,
}

/// Execute the build. Returns the path of the installer in `output_dir`.
pub fn cmd_build(options: &BuildOptions) -> Result<PathBuf> {
    let build_start = Instant::now();
    let settings = &options.settings;
    let packages = settings.packages()?;

    preflight::run_preflight_or_fail(settings, &options.template_dir, &options.output_dir)?;

    let workspace = Workspace::create(&options.template_dir)?;

    let timer = Timer::start("Fetch installer");
    let installer = workspace.installer_path();
    download::fetch_installer(&settings.installer, &installer)?;
    if let Some(expected) = &settings.installer_sha256 {
        download::verify_checksum(&installer, expected)?;
    }
    timer.finish();

    let timer = Timer::start("Provision packages");
    let provisioned =
        provision::install_packages(&installer, packages, &settings.mirror, &workspace.cygwin_root())?;
    timer.finish();

    let version = full_version(options.version_suffix.as_deref(), &provisioned.version);
    let script = artifact::compile_script(workspace.root(), &version, TEMPLATE_SCRIPT)?;

    let timer = Timer::start("Archive");
    artifact::zip_cygwin(&workspace.sevenzip(), &provisioned.root, &workspace.archive_path())?;
    timer.finish();

    let timer = Timer::start("Compile installer");
    let built = artifact::make_installer(&settings.makensis, &script)?;
    timer.finish();

    let installed = copy_to_output(&built, &options.output_dir)?;

    tracing::info!(
        "build finished in {:.1}s",
        build_start.elapsed().as_secs_f64()
    );
    Ok(installed)
}

/// Version string substituted into the NSIS script.
pub fn full_version(suffix: Option<&str>, cygwin_version: &str) -> String {
    match suffix {
        Some(suffix) => format!("{}-{}", suffix, cygwin_version),
        None => cygwin_version.to_string(),
    }
}

/// Copy the installer into `output_dir`. Nothing is copied when `makensis`
/// already wrote it there; copying a file onto itself truncates it.
fn copy_to_output(built: &Path, output_dir: &Path) -> Result<PathBuf> {
    let name = built
        .file_name()
        .with_context(|| format!("Installer path has no file name: {}", built.display()))?;
    let dest = output_dir.join(name);
    if same_file(built, &dest) {
        tracing::debug!("installer already in {}", output_dir.display());
        return Ok(dest);
    }
    fs::copy(built, &dest)
        .with_context(|| format!("Failed to copy {} to {}", built.display(), dest.display()))?;
    Ok(dest)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
