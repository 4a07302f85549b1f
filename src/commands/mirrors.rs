//! Mirror list command - prints mirrors grouped by continent.

use anyhow::Result;

use crate::mirrors;

/// Fetch the mirror list and print it as indented JSON.
pub fn cmd_list_mirrors() -> Result<()> {
    let directory = mirrors::fetch_mirrors()?;
    println!("{}", mirrors::render(&directory)?);
    Ok(())
}
