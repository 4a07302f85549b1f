//! Download management for cygwin-builder.
//!
//! Fetches the Cygwin bootstrap installer from a URL or copies it from a
//! local path, and optionally pins it to a SHA-256 digest. Blocking, single
//! attempt: a failed fetch fails the build.

use anyhow::{bail, Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::BuildError;

/// Timeout for fetching the bootstrap installer.
pub const INSTALLER_TIMEOUT: Duration = Duration::from_secs(60);

const REMOTE_SCHEMES: &[&str] = &["http://", "https://", "ftp://"];

/// Whether `source` names a network location rather than a local path.
pub fn is_remote(source: &str) -> bool {
    REMOTE_SCHEMES.iter().any(|scheme| source.starts_with(scheme))
}

/// Put the bootstrap installer at `dest`, overwriting anything there.
pub fn fetch_installer(source: &str, dest: &Path) -> Result<()> {
    if is_remote(source) {
        tracing::info!("downloading cygwin installer into \"{}\"", dest.display());
        let body = http_get(source, INSTALLER_TIMEOUT)?;
        fs::write(dest, &body)
            .with_context(|| format!("Failed to write {}", dest.display()))?;
        return Ok(());
    }

    tracing::info!("copying cygwin installer from \"{}\"", source);
    fs::copy(source, dest)
        .with_context(|| format!("Failed to copy {} to {}", source, dest.display()))?;
    Ok(())
}

/// Fetch `url` and return the whole response body.
pub fn http_get(url: &str, timeout: Duration) -> Result<Vec<u8>> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("cygwin-builder/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .context("Failed to create HTTP client")?;

    let response = client
        .get(url)
        .send()
        .with_context(|| format!("HTTP request failed: {}", url))?;

    let status = response.status();
    if !status.is_success() {
        bail!(
            "HTTP {} for {}: {}",
            status.as_u16(),
            url,
            status.canonical_reason().unwrap_or("Unknown error")
        );
    }

    let body = response
        .bytes()
        .with_context(|| format!("Failed to read response body from {}", url))?;
    Ok(body.to_vec())
}

/// Compute the lowercase hex SHA-256 of a file.
pub fn sha256_file(path: &Path) -> Result<String> {
    let content =
        fs::read(path).with_context(|| format!("Failed to read {} for hashing", path.display()))?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Verify SHA-256 checksum of a fetched file.
pub fn verify_checksum(path: &Path, expected_sha256: &str) -> Result<()> {
    tracing::info!("verifying SHA256 checksum of {}", path.display());
    let actual = sha256_file(path)?;
    if !actual.eq_ignore_ascii_case(expected_sha256.trim()) {
        return Err(BuildError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected: expected_sha256.trim().to_string(),
            actual,
        }
        .into());
    }
    tracing::debug!("checksum verified OK");
    Ok(())
}
