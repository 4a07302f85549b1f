//! Error types the top level needs to tell apart.
//!
//! [`BuildError`] is a recognized build failure: it is printed as a
//! `Build Error:` block and the process exits 1. [`ConfigError`] means the
//! settings document could not be used; usage help is printed. Anything else
//! travels as a plain `anyhow::Error` and is reported with its full chain.

use std::path::PathBuf;

use thiserror::Error;

/// A recognized failure of one of the build steps.
#[derive(Error, Debug)]
pub enum BuildError {
    /// An external tool exited non-zero.
    #[error("command \"{command}\" returned with exit={code}\n{stdout}\n\n{stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stdout: String,
        stderr: String,
    },

    /// Packages that were requested but not reported by `cygcheck`.
    #[error("missing packages: {}", .0.join(","))]
    MissingPackages(Vec<String>),

    /// `cygcheck --version` printed nothing usable.
    #[error("could not determine the Cygwin version from cygcheck output")]
    VersionNotFound,

    /// `makensis` succeeded but never printed its `Output:` line.
    #[error("could not find the name of the installer !")]
    ArtifactNameNotFound,

    /// The downloaded bootstrap installer does not match `installer_sha256`.
    #[error("checksum mismatch for {path}\n  Expected: {expected}\n  Got: {actual}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// One or more preflight checks failed.
    #[error("preflight failed: {}", .0.join("; "))]
    Preflight(Vec<String>),
}

/// The settings document could not be read or parsed.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Error reading json file \"{path}\"\n{source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error reading json file \"{path}\"\n{source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
