//! Utilities for locating and copying directory trees.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the template tree bundled next to the executable.
pub const TEMPLATE_DIR_NAME: &str = "buildenv";

/// Directory containing the running executable.
///
/// Falls back to the current directory if the executable path can't be
/// determined.
pub fn app_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .map(|exe| exe.canonicalize().unwrap_or(exe))
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Default template tree: `buildenv/` next to the executable.
pub fn default_template_dir() -> PathBuf {
    app_directory().join(TEMPLATE_DIR_NAME)
}

/// Recursively copy `src` to `dst`, preserving the directory structure.
///
/// `dst` must not exist yet.
pub fn copy_dir_all(src: &Path, dst: &Path) -> Result<()> {
    if !src.is_dir() {
        bail!("Template directory not found: {}", src.display());
    }
    if dst.exists() {
        bail!("Destination already exists: {}", dst.display());
    }

    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.with_context(|| format!("Failed to walk {}", src.display()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .context("walkdir yielded a path outside the source tree")?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
        } else {
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_dir_all_preserves_structure() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("7z")).unwrap();
        fs::create_dir_all(src.join("empty")).unwrap();
        fs::write(src.join("Cygwin.nsi"), "Name cygwin\n").unwrap();
        fs::write(src.join("7z/7z.exe"), "bin").unwrap();

        let dst = dir.path().join("dst");
        copy_dir_all(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst.join("Cygwin.nsi")).unwrap(), "Name cygwin\n");
        assert_eq!(fs::read_to_string(dst.join("7z/7z.exe")).unwrap(), "bin");
        assert!(dst.join("empty").is_dir());
    }

    #[test]
    fn test_copy_dir_all_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = copy_dir_all(&dir.path().join("nope"), &dir.path().join("dst")).unwrap_err();
        assert!(err.to_string().contains("Template directory not found"));
    }

    #[test]
    fn test_default_template_dir_name() {
        assert!(default_template_dir().ends_with(TEMPLATE_DIR_NAME));
    }
}
