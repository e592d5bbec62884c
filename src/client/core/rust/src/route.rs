/* src/client/core/rust/src/route.rs */

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::HashpageError;

pub const DEFAULT_ROUTE: &str = "home";

/// Static metadata for one page of the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDescriptor {
  pub title: String,
  /// Location of the page body fragment, relative to the site root.
  #[serde(rename = "template")]
  pub fragment_path: String,
  /// Page carries the contact form and needs the submission handler wired.
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub form: bool,
}

impl PageDescriptor {
  pub fn new(title: impl Into<String>, fragment_path: impl Into<String>) -> Self {
    Self { title: title.into(), fragment_path: fragment_path.into(), form: false }
  }

  pub fn with_form(mut self) -> Self {
    self.form = true;
    self
  }
}

/// Route key -> page descriptor, fixed for the lifetime of the process.
/// Construction guarantees the default key is present, so `resolve` is total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
  pages: BTreeMap<String, PageDescriptor>,
  default_key: String,
}

impl RouteTable {
  pub fn new<I>(default_key: impl Into<String>, pages: I) -> Result<Self, HashpageError>
  where
    I: IntoIterator<Item = (String, PageDescriptor)>,
  {
    let default_key = default_key.into();
    let mut map = BTreeMap::new();
    for (key, page) in pages {
      if key.is_empty() {
        return Err(HashpageError::invalid_route("route key must not be empty"));
      }
      if page.fragment_path.is_empty() {
        return Err(HashpageError::invalid_route(format!("route \"{key}\" has no template")));
      }
      if map.contains_key(&key) {
        return Err(HashpageError::invalid_route(format!("duplicate route key \"{key}\"")));
      }
      map.insert(key, page);
    }
    if !map.contains_key(&default_key) {
      return Err(HashpageError::missing_default_route(&default_key));
    }
    Ok(Self { pages: map, default_key })
  }

  /// Look up `key`, substituting the default page on a miss.
  pub fn resolve(&self, key: &str) -> &PageDescriptor {
    self.resolve_entry(key).1
  }

  /// Like `resolve`, but also returns the key that actually matched.
  pub fn resolve_entry(&self, key: &str) -> (&str, &PageDescriptor) {
    if let Some((k, page)) = self.pages.get_key_value(key) {
      return (k.as_str(), page);
    }
    debug!(key, fallback = %self.default_key, "unknown route, using default");
    match self.pages.get_key_value(&self.default_key) {
      Some((k, page)) => (k.as_str(), page),
      // new() rejects tables without the default entry
      None => unreachable!("route table without default entry"),
    }
  }

  pub fn contains(&self, key: &str) -> bool {
    self.pages.contains_key(key)
  }

  pub fn default_key(&self) -> &str {
    &self.default_key
  }

  /// Registered keys in sorted order.
  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.pages.keys().map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &PageDescriptor)> {
    self.pages.iter().map(|(k, v)| (k.as_str(), v))
  }

  pub fn len(&self) -> usize {
    self.pages.len()
  }

  pub fn is_empty(&self) -> bool {
    self.pages.is_empty()
  }
}

/// Pages of the built-in site.
pub fn builtin_pages() -> BTreeMap<String, PageDescriptor> {
  [
    ("home", PageDescriptor::new("AI Pedagogy - WPI", "templates/home.html")),
    ("about", PageDescriptor::new("About - AI Pedagogy - WPI", "templates/about.html")),
    ("resources", PageDescriptor::new("Resources - AI Pedagogy - WPI", "templates/resources.html")),
    ("news", PageDescriptor::new("News - AI Pedagogy - WPI", "templates/news.html")),
    (
      "contact",
      PageDescriptor::new("Contact - AI Pedagogy - WPI", "templates/contact.html").with_form(),
    ),
  ]
  .into_iter()
  .map(|(k, v)| (k.to_string(), v))
  .collect()
}

impl Default for RouteTable {
  fn default() -> Self {
    Self { pages: builtin_pages(), default_key: DEFAULT_ROUTE.to_string() }
  }
}

/// Normalize a raw location hash (`"#news"`, `"news"`, `""`) to a route key.
pub fn route_key_from_hash(hash: &str, default_key: &str) -> String {
  let key = hash.strip_prefix('#').unwrap_or(hash);
  if key.is_empty() { default_key.to_string() } else { key.to_string() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn registered_keys_resolve_to_their_descriptor() {
    let table = RouteTable::default();
    for (key, page) in builtin_pages() {
      assert_eq!(table.resolve(&key), &page);
    }
  }

  #[test]
  fn resources_title() {
    let table = RouteTable::default();
    let page = table.resolve("resources");
    assert_eq!(page.title, "Resources - AI Pedagogy - WPI");
    assert_eq!(page.fragment_path, "templates/resources.html");
  }

  #[test]
  fn unknown_key_falls_back_to_home() {
    let table = RouteTable::default();
    assert_eq!(table.resolve("bogus"), table.resolve("home"));
    assert_eq!(table.resolve(""), table.resolve("home"));
    assert_eq!(table.resolve_entry("bogus").0, "home");
  }

  #[test]
  fn keys_are_case_sensitive() {
    let table = RouteTable::default();
    assert_eq!(table.resolve_entry("About").0, "home");
  }

  #[test]
  fn only_contact_has_form() {
    let table = RouteTable::default();
    let forms: Vec<&str> = table.iter().filter(|(_, p)| p.form).map(|(k, _)| k).collect();
    assert_eq!(forms, vec!["contact"]);
  }

  #[test]
  fn new_requires_default_entry() {
    let pages = vec![("about".to_string(), PageDescriptor::new("About", "a.html"))];
    let err = RouteTable::new("home", pages).unwrap_err();
    assert_eq!(err.code(), "MISSING_DEFAULT_ROUTE");
  }

  #[test]
  fn new_rejects_duplicates() {
    let pages = vec![
      ("home".to_string(), PageDescriptor::new("Home", "h.html")),
      ("home".to_string(), PageDescriptor::new("Home again", "h2.html")),
    ];
    let err = RouteTable::new("home", pages).unwrap_err();
    assert_eq!(err.code(), "INVALID_ROUTE");
  }

  #[test]
  fn new_rejects_empty_key_and_template() {
    let empty_key = vec![("".to_string(), PageDescriptor::new("x", "x.html"))];
    assert_eq!(RouteTable::new("home", empty_key).unwrap_err().code(), "INVALID_ROUTE");

    let empty_template = vec![("home".to_string(), PageDescriptor::new("Home", ""))];
    assert_eq!(RouteTable::new("home", empty_template).unwrap_err().code(), "INVALID_ROUTE");
  }

  #[test]
  fn custom_default_key() {
    let pages = vec![
      ("start".to_string(), PageDescriptor::new("Start", "s.html")),
      ("faq".to_string(), PageDescriptor::new("FAQ", "f.html")),
    ];
    let table = RouteTable::new("start", pages).unwrap();
    assert_eq!(table.resolve("missing").title, "Start");
    assert_eq!(table.keys().collect::<Vec<_>>(), vec!["faq", "start"]);
  }

  #[test]
  fn hash_normalization() {
    assert_eq!(route_key_from_hash("#news", "home"), "news");
    assert_eq!(route_key_from_hash("news", "home"), "news");
    assert_eq!(route_key_from_hash("#", "home"), "home");
    assert_eq!(route_key_from_hash("", "home"), "home");
  }
}
