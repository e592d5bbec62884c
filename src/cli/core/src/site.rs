/* src/cli/core/src/site.rs */

use std::path::Path;

use anyhow::{Context, Result};
use hashpage_core::{parse_site, Site};

use crate::ui;

pub const SITE_FILE: &str = "site.toml";

/// Load `<dir>/site.toml`, falling back to the built-in site when the file is absent.
pub fn load_site(dir: &Path) -> Result<Site> {
  let path = dir.join(SITE_FILE);
  if !path.is_file() {
    ui::warn(&format!("{} not found, using built-in routes", path.display()));
    return Ok(Site::default());
  }
  let content =
    std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
  let site = parse_site(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  Ok(site)
}
