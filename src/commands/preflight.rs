//! Preflight command - runs all checks and prints the report.

use std::path::Path;

use crate::config::Settings;
use crate::preflight;

/// Run preflight checks. Returns whether every check passed.
pub fn cmd_preflight(settings: &Settings, template_dir: &Path, output_dir: &Path) -> bool {
    let report = preflight::run_preflight(settings, template_dir, output_dir);
    println!("{}", report);
    report.all_passed()
}
