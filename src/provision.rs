//! Package provisioning with the Cygwin bootstrap installer.
//!
//! Runs `setup-x86_64.exe` unattended into the workspace, then asks the
//! freshly installed `cygcheck` which packages landed and which Cygwin
//! version was installed.

use anyhow::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::BuildError;
use crate::process::Cmd;

/// Packages every generated installer ships, whatever the settings say.
pub const MANDATORY_PACKAGES: &[&str] = &["cygrunsrv", "openssh", "dos2unix"];

/// Number of banner/header lines `cygcheck --check-setup` prints before the
/// package table.
const CHECK_SETUP_HEADER_LINES: usize = 2;

/// A provisioned Cygwin root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provisioned {
    /// Cygwin DLL version reported by `cygcheck --version`
    pub version: String,
    /// Absolute path of the install root
    pub root: PathBuf,
}

/// The package list handed to the installer: `requested` without duplicates,
/// followed by any mandatory package it lacks.
pub fn with_mandatory(requested: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut packages: Vec<String> = requested
        .iter()
        .filter(|p| seen.insert(p.as_str()))
        .cloned()
        .collect();

    for mandatory in MANDATORY_PACKAGES {
        if !packages.iter().any(|p| p == mandatory) {
            packages.push((*mandatory).to_string());
        }
    }
    packages
}

/// Run the bootstrap installer and verify the result.
///
/// `root` is created by the installer; it should not exist beforehand.
pub fn install_packages(
    installer: &Path,
    requested: &[String],
    site: &str,
    root: &Path,
) -> Result<Provisioned> {
    let packages = with_mandatory(requested);

    tracing::info!("running cygwin installer");
    Cmd::path(installer)
        .args(["--no-admin", "--no-shortcuts", "--quiet-mode", "--root"])
        .arg_path(root)
        .args(["--site", site, "--packages"])
        .arg(packages.join(","))
        .run()?;

    let cygcheck = root.join("bin").join("cygcheck.exe");

    if !packages.is_empty() {
        tracing::info!("looking for installed packages");
        let result = Cmd::path(&cygcheck).arg("--check-setup").run()?;
        verify_installed(&packages, &result.stdout)?;
    }

    let result = Cmd::path(&cygcheck).arg("--version").run()?;
    let version = parse_version(&result.stdout).ok_or(BuildError::VersionNotFound)?;
    tracing::info!("Cygwin version is {}", version);

    Ok(Provisioned {
        version,
        root: root.to_path_buf(),
    })
}

/// Check `cygcheck --check-setup` output against the requested packages.
///
/// The first two lines are the banner and the column header. Every other
/// line starts with a package name.
pub fn verify_installed(packages: &[String], check_output: &str) -> Result<(), BuildError> {
    let mut lines = check_output.lines();

    let header: Vec<&str> = lines.by_ref().take(CHECK_SETUP_HEADER_LINES).collect();
    let header_ok = header
        .get(1)
        .and_then(|line| line.split_whitespace().next())
        .is_some_and(|first| first == "Package");
    if !header_ok {
        tracing::warn!(
            "unexpected cygcheck header, package table may be misread: {:?}",
            header
        );
    }

    let mut pending: HashSet<&str> = packages.iter().map(String::as_str).collect();
    for line in lines {
        if pending.is_empty() {
            break;
        }
        if let Some(name) = line.split_whitespace().next() {
            pending.remove(name);
        }
    }

    if pending.is_empty() {
        return Ok(());
    }

    let missing: Vec<String> = packages
        .iter()
        .filter(|p| pending.contains(p.as_str()))
        .cloned()
        .collect();
    tracing::error!("missing packages: {}", missing.join(","));
    Err(BuildError::MissingPackages(missing))
}

/// Last whitespace-separated field of the first line of `cygcheck --version`.
pub fn parse_version(version_output: &str) -> Option<String> {
    version_output
        .lines()
        .next()?
        .split_whitespace()
        .last()
        .map(|v| v.trim().to_string())
}
