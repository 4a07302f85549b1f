//! External tool availability checks.

use std::path::Path;

use crate::config::Settings;
use crate::download;

use super::types::CheckResult;

/// Check `makensis` and the bootstrap installer source.
pub fn check_host_tools(settings: &Settings) -> Vec<CheckResult> {
    vec![
        check_makensis(&settings.makensis),
        check_installer_source(settings),
    ]
}

/// `makensis` may be a path or a program name looked up on `PATH`.
fn check_makensis(makensis: &str) -> CheckResult {
    if Path::new(makensis).is_file() {
        return CheckResult::pass_with("makensis", makensis);
    }
    match which::which(makensis) {
        Ok(path) => CheckResult::pass_with("makensis", &path.display().to_string()),
        Err(_) => CheckResult::fail(
            "makensis",
            &format!(
                "\"{}\" not found. Install NSIS or set \"makensis\" in the settings.",
                makensis
            ),
        ),
    }
}

fn check_installer_source(settings: &Settings) -> CheckResult {
    let name = "cygwin installer";
    if download::is_remote(&settings.installer) {
        return match settings.installer_sha256 {
            Some(_) => CheckResult::pass_with(name, &settings.installer),
            None => CheckResult::warn(
                name,
                &format!("{} (no installer_sha256 pinned)", settings.installer),
            ),
        };
    }
    if Path::new(&settings.installer).is_file() {
        CheckResult::pass_with(name, &settings.installer)
    } else {
        CheckResult::fail(name, &format!("{} does not exist", settings.installer))
    }
}
