//! Preflight checks for a Cygwin installer build.
//!
//! Validates the template tree, the output directory and the configured
//! tools before the slow steps start. Run alone with `--preflight`.

mod environment;
mod host_tools;
mod types;

use std::path::Path;

use anyhow::Result;

use crate::config::Settings;
use crate::error::BuildError;

pub use types::{CheckResult, CheckStatus, PreflightReport};

/// Run all preflight checks.
pub fn run_preflight(
    settings: &Settings,
    template_dir: &Path,
    output_dir: &Path,
) -> PreflightReport {
    let mut checks = Vec::new();

    tracing::info!("running preflight checks");
    checks.extend(environment::check_template(template_dir));
    checks.push(environment::check_output_dir(output_dir));
    checks.extend(host_tools::check_host_tools(settings));

    for check in &checks {
        match check.status {
            CheckStatus::Pass => tracing::debug!("preflight ok: {}", check.summary()),
            CheckStatus::Warn => tracing::warn!("preflight: {}", check.summary()),
            CheckStatus::Fail => tracing::error!("preflight failed: {}", check.summary()),
        }
    }

    PreflightReport { checks }
}

/// Run preflight and fail with a build error if any check fails.
pub fn run_preflight_or_fail(
    settings: &Settings,
    template_dir: &Path,
    output_dir: &Path,
) -> Result<()> {
    let report = run_preflight(settings, template_dir, output_dir);
    if !report.all_passed() {
        let failures = report.failures().map(CheckResult::summary).collect();
        return Err(BuildError::Preflight(failures).into());
    }
    Ok(())
}
