//! Build environment checks: template tree and output directory.

use std::path::Path;

use crate::artifact::nsis::TEMPLATE_SCRIPT;

use super::types::CheckResult;

/// Check the template tree holds what the build steps read from it.
pub fn check_template(template_dir: &Path) -> Vec<CheckResult> {
    if !template_dir.is_dir() {
        return vec![CheckResult::fail(
            "template directory",
            &format!("{} not found", template_dir.display()),
        )];
    }

    let mut results = vec![CheckResult::pass_with(
        "template directory",
        &template_dir.display().to_string(),
    )];
    for (name, relative) in [
        ("NSIS template", Path::new(TEMPLATE_SCRIPT).to_path_buf()),
        ("7-Zip", Path::new("7z").join("7z.exe")),
    ] {
        let path = template_dir.join(&relative);
        if path.is_file() {
            results.push(CheckResult::pass(name));
        } else {
            results.push(CheckResult::fail(
                name,
                &format!("{} missing from template directory", relative.display()),
            ));
        }
    }
    results
}

/// Check the final installer can be copied into `output_dir`.
pub fn check_output_dir(output_dir: &Path) -> CheckResult {
    let name = "output directory writable";
    if !output_dir.is_dir() {
        return CheckResult::fail(name, &format!("{} is not a directory", output_dir.display()));
    }
    match tempfile::tempfile_in(output_dir) {
        Ok(_) => CheckResult::pass(name),
        Err(e) => CheckResult::fail(
            name,
            &format!("Cannot write to {}: {}", output_dir.display(), e),
        ),
    }
}
