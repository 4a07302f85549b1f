//! Cygwin mirror list, grouped by continent.

use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::download::http_get;

/// Official list of Cygwin mirrors.
pub const MIRROR_LIST_URL: &str = "https://cygwin.com/mirrors.lst";

/// Timeout for fetching the mirror list.
pub const MIRROR_LIST_TIMEOUT: Duration = Duration::from_secs(5);

/// Continent name to mirror URLs, in list order.
pub type MirrorDirectory = BTreeMap<String, Vec<String>>;

/// Fetch and group the official mirror list.
pub fn fetch_mirrors() -> Result<MirrorDirectory> {
    let body = http_get(MIRROR_LIST_URL, MIRROR_LIST_TIMEOUT)?;
    let text = String::from_utf8_lossy(&body);
    parse_mirror_list(&text)
}

/// Group `url;fqdn;continent;state` records by continent.
pub fn parse_mirror_list(text: &str) -> Result<MirrorDirectory> {
    let mut mirrors = MirrorDirectory::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(';').collect();
        let [url, _fqdn, continent, _state] = fields.as_slice() else {
            bail!("malformed mirror list line {}: {:?}", index + 1, line);
        };
        mirrors
            .entry((*continent).to_string())
            .or_default()
            .push((*url).to_string());
    }
    Ok(mirrors)
}

/// Render the directory as JSON indented by four spaces.
pub fn render(mirrors: &MirrorDirectory) -> Result<String> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    serde::Serialize::serialize(mirrors, &mut serializer)
        .context("Failed to serialize mirror list")?;
    String::from_utf8(out).context("mirror list is not valid UTF-8")
}
