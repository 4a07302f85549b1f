//! Configuration management for cygwin-builder.
//!
//! Reads the JSON settings document given on the command line and fills in
//! defaults for the keys that have one. Unknown keys are ignored.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Default bootstrap installer location.
pub const DEFAULT_INSTALLER: &str = "http://cygwin.com/setup-x86_64.exe";

/// Default package site handed to the bootstrap installer.
pub const DEFAULT_MIRROR: &str = "http://mirror.isoc.org.il/pub/cygwin/";

/// Default location of the NSIS compiler.
pub const DEFAULT_MAKENSIS: &str = r"c:\Program Files (x86)\NSIS\makensis.exe";

/// Settings document as written by the user. Every key is optional here.
#[derive(Debug, Deserialize)]
struct RawSettings {
    installer: Option<String>,
    mirror: Option<String>,
    makensis: Option<String>,
    packages: Option<Vec<String>>,
    installer_sha256: Option<String>,
}

/// Build settings after defaults have been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// URL or local path of the Cygwin bootstrap installer
    pub installer: String,
    /// Package site passed to the bootstrap installer
    pub mirror: String,
    /// Path (or program name) of `makensis`
    pub makensis: String,
    /// Requested packages, in order. Has no default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<String>>,
    /// Expected SHA-256 of the bootstrap installer, if pinned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installer_sha256: Option<String>,
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Ok(pretty) = serde_json::to_string_pretty(&settings) {
            tracing::debug!("{}", pretty);
        }
        Ok(settings)
    }

    /// Parse settings from a JSON string, filling in defaults.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let raw: RawSettings = serde_json::from_str(content)?;
        Ok(Self::with_defaults(raw))
    }

    fn with_defaults(raw: RawSettings) -> Self {
        Self {
            installer: or_default(raw.installer, "installer", DEFAULT_INSTALLER),
            mirror: or_default(raw.mirror, "mirror", DEFAULT_MIRROR),
            makensis: or_default(raw.makensis, "makensis", DEFAULT_MAKENSIS),
            packages: raw.packages,
            installer_sha256: raw.installer_sha256,
        }
    }

    /// Requested packages. A missing `packages` key only fails here, when the
    /// build actually needs the list.
    pub fn packages(&self) -> anyhow::Result<&[String]> {
        self.packages
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("settings do not define \"packages\""))
    }
}

fn or_default(value: Option<String>, key: &str, default: &str) -> String {
    value.unwrap_or_else(|| {
        tracing::warn!("missing \"{}\" using default \"{}\"", key, default);
        default.to_string()
    })
}
