//! NSIS script generation and compilation.
//!
//! The template script carries a version placeholder. It is filled in line by
//! line into `Cygwin-Compiled.nsi`, which `makensis` then turns into the
//! final installer. `makensis` reports where it wrote the installer with an
//! `Output: "<path>"` line.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::BuildError;
use crate::process::Cmd;

/// Template shipped in the `buildenv` tree.
pub const TEMPLATE_SCRIPT: &str = "Cygwin.nsi";

/// Script written next to the template and passed to `makensis`.
pub const COMPILED_SCRIPT: &str = "Cygwin-Compiled.nsi";

/// Token replaced with the Cygwin version.
pub const VERSION_PLACEHOLDER: &str = "TMPL_MyCygwinVersion";

/// Fill `dir/template` with `version` and write `dir/Cygwin-Compiled.nsi`.
pub fn compile_script(dir: &Path, version: &str, template: &str) -> Result<PathBuf> {
    tracing::info!("compiling nsi file");

    let template_path = dir.join(template);
    let output_path = dir.join(COMPILED_SCRIPT);

    let reader = File::open(&template_path)
        .with_context(|| format!("Failed to open {}", template_path.display()))?;
    let writer = File::create(&output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;

    substitute_version(BufReader::new(reader), BufWriter::new(writer), version)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    Ok(output_path)
}

/// Copy `reader` to `writer`, replacing every placeholder with `version`.
///
/// Line terminators are carried over unchanged.
pub fn substitute_version<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    version: &str,
) -> std::io::Result<()> {
    tracing::debug!("-------------------------------");
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let new_line = line.replace(VERSION_PLACEHOLDER, version);
        tracing::debug!("{}", new_line.trim_end_matches(['\r', '\n']));
        writer.write_all(new_line.as_bytes())?;
    }
    tracing::debug!("-------------------------------");
    writer.flush()
}

/// Run `makensis` on `script` and return the path of the installer it built.
///
/// `makensis` runs in the script's directory; a relative `Output:` path is
/// resolved against it.
pub fn make_installer(makensis: &str, script: &Path) -> Result<PathBuf> {
    tracing::info!("Creating the custom cygwin installer");

    let work_dir = script.parent().unwrap_or_else(|| Path::new("."));
    let result = Cmd::new(makensis).arg_path(script).dir(work_dir).run()?;

    let output = find_output_path(&result.stdout).ok_or(BuildError::ArtifactNameNotFound)?;
    tracing::info!("installer name is: \"{}\"", output);

    Ok(work_dir.join(output))
}

/// Path from the first line of the form `Output: "<path>"`.
pub fn find_output_path(stdout: &str) -> Option<String> {
    stdout.lines().find_map(|line| {
        let rest = line.strip_prefix("Output: \"")?;
        let end = rest.rfind('"')?;
        tracing::debug!("{}", line);
        Some(rest[..end].to_string())
    })
}
