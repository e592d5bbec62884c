/* src/client/core/rust/src/config.rs */

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::errors::HashpageError;
use crate::route::{builtin_pages, PageDescriptor, RouteTable, DEFAULT_ROUTE};

pub const DEFAULT_PLACEHOLDER: &str = "<p>Error loading content. Please refresh the page.</p>";

/// Raw `site.toml` contents. Every section is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
  #[serde(default)]
  pub site: SiteSection,
  #[serde(default)]
  pub chrome: ChromeSection,
  #[serde(default)]
  pub form: FormSection,
  /// Replaces the built-in page list entirely when present.
  #[serde(default = "builtin_pages")]
  pub pages: BTreeMap<String, PageDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSection {
  #[serde(default = "default_route")]
  pub default_route: String,
  #[serde(default = "default_header")]
  pub header: String,
  #[serde(default = "default_footer")]
  pub footer: String,
  #[serde(default = "default_placeholder")]
  pub placeholder: String,
}

impl Default for SiteSection {
  fn default() -> Self {
    Self {
      default_route: default_route(),
      header: default_header(),
      footer: default_footer(),
      placeholder: default_placeholder(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChromeSection {
  /// Pixels scrolled before the back-to-top button appears.
  #[serde(default = "default_threshold")]
  pub back_to_top_threshold: f64,
}

impl Default for ChromeSection {
  fn default() -> Self {
    Self { back_to_top_threshold: default_threshold() }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormSection {
  #[serde(default = "default_submit_delay_ms")]
  pub submit_delay_ms: u64,
}

impl Default for FormSection {
  fn default() -> Self {
    Self { submit_delay_ms: default_submit_delay_ms() }
  }
}

fn default_route() -> String {
  DEFAULT_ROUTE.to_string()
}

fn default_header() -> String {
  "templates/header.html".to_string()
}

fn default_footer() -> String {
  "templates/footer.html".to_string()
}

fn default_placeholder() -> String {
  DEFAULT_PLACEHOLDER.to_string()
}

fn default_threshold() -> f64 {
  300.0
}

fn default_submit_delay_ms() -> u64 {
  1000
}

impl Default for SiteConfig {
  fn default() -> Self {
    Self {
      site: SiteSection::default(),
      chrome: ChromeSection::default(),
      form: FormSection::default(),
      pages: builtin_pages(),
    }
  }
}

impl SiteConfig {
  pub fn from_toml_str(content: &str) -> Result<Self, HashpageError> {
    Ok(toml::from_str(content)?)
  }

  /// Validate and freeze into the immutable `Site` handed to the loader.
  pub fn build(self) -> Result<Site, HashpageError> {
    if self.site.header.is_empty() || self.site.footer.is_empty() {
      return Err(HashpageError::invalid_config("site.header and site.footer must be set"));
    }
    if !self.chrome.back_to_top_threshold.is_finite() || self.chrome.back_to_top_threshold < 0.0 {
      return Err(HashpageError::invalid_config(
        "chrome.back_to_top_threshold must be a non-negative number",
      ));
    }
    let routes = RouteTable::new(self.site.default_route, self.pages)?;
    Ok(Site {
      routes,
      header_path: self.site.header,
      footer_path: self.site.footer,
      placeholder: self.site.placeholder,
      back_to_top_threshold: self.chrome.back_to_top_threshold,
      submit_delay: Duration::from_millis(self.form.submit_delay_ms),
    })
  }
}

/// Parse and validate `site.toml` in one step.
pub fn parse_site(content: &str) -> Result<Site, HashpageError> {
  SiteConfig::from_toml_str(content)?.build()
}

/// Validated, immutable site configuration shared by every navigation.
#[derive(Debug, Clone)]
pub struct Site {
  pub routes: RouteTable,
  pub header_path: String,
  pub footer_path: String,
  pub placeholder: String,
  pub back_to_top_threshold: f64,
  pub submit_delay: Duration,
}

impl Default for Site {
  fn default() -> Self {
    Self {
      routes: RouteTable::default(),
      header_path: default_header(),
      footer_path: default_footer(),
      placeholder: default_placeholder(),
      back_to_top_threshold: default_threshold(),
      submit_delay: Duration::from_millis(default_submit_delay_ms()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_file_yields_builtin_site() {
    let site = parse_site("").unwrap();
    let builtin = Site::default();
    assert_eq!(site.routes, builtin.routes);
    assert_eq!(site.header_path, "templates/header.html");
    assert_eq!(site.footer_path, "templates/footer.html");
    assert_eq!(site.placeholder, DEFAULT_PLACEHOLDER);
    assert_eq!(site.back_to_top_threshold, 300.0);
    assert_eq!(site.submit_delay, Duration::from_millis(1000));
  }

  #[test]
  fn pages_section_replaces_builtin_pages() {
    let site = parse_site(
      r#"
[site]
default_route = "index"

[pages.index]
title = "Index"
template = "t/index.html"

[pages.signup]
title = "Sign up"
template = "t/signup.html"
form = true
"#,
    )
    .unwrap();
    assert_eq!(site.routes.len(), 2);
    assert_eq!(site.routes.resolve("about").title, "Index");
    assert!(site.routes.resolve("signup").form);
    assert!(!site.routes.resolve("index").form);
  }

  #[test]
  fn partial_sections_keep_defaults() {
    let site = parse_site(
      r#"
[site]
header = "parts/top.html"

[form]
submit_delay_ms = 250
"#,
    )
    .unwrap();
    assert_eq!(site.header_path, "parts/top.html");
    assert_eq!(site.footer_path, "templates/footer.html");
    assert_eq!(site.submit_delay, Duration::from_millis(250));
  }

  #[test]
  fn default_route_must_exist() {
    let err = parse_site(
      r#"
[site]
default_route = "landing"
"#,
    )
    .unwrap_err();
    assert_eq!(err.code(), "MISSING_DEFAULT_ROUTE");
  }

  #[test]
  fn malformed_toml_is_invalid_config() {
    let err = parse_site("[site\nheader = 1").unwrap_err();
    assert_eq!(err.code(), "INVALID_CONFIG");
  }

  #[test]
  fn negative_threshold_rejected() {
    let err = parse_site("[chrome]\nback_to_top_threshold = -1.0").unwrap_err();
    assert_eq!(err.code(), "INVALID_CONFIG");
  }

  #[test]
  fn page_missing_title_rejected() {
    let err = parse_site("[pages.home]\ntemplate = \"h.html\"").unwrap_err();
    assert_eq!(err.code(), "INVALID_CONFIG");
  }
}
