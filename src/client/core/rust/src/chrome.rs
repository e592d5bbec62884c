/* src/client/core/rust/src/chrome.rs */

// Page-chrome decisions kept free of DOM types so both the browser
// bindings and tests share them.

use std::cell::Cell;

pub const NAV_LINK_SELECTOR: &str = ".nav-links a";
pub const NAV_ACTIVE_BORDER: &str = "2px solid white";
pub const NAV_INACTIVE_BORDER: &str = "none";

pub const BACK_TO_TOP_CLASS: &str = "back-to-top";
pub const BACK_TO_TOP_LABEL: &str = "Back to top";
pub const BACK_TO_TOP_GLYPH: &str = "\u{2191}";
pub const BACK_TO_TOP_STYLE: &str = "position: fixed; bottom: 20px; right: 20px; \
  background: #AC2B37; color: white; border: none; border-radius: 50%; width: 50px; \
  height: 50px; font-size: 24px; cursor: pointer; box-shadow: 0 4px 12px rgba(0,0,0,0.2); \
  transition: all 0.3s; z-index: 1000;";
pub const BACK_TO_TOP_HOVER_TRANSFORM: &str = "scale(1.1)";
pub const BACK_TO_TOP_REST_TRANSFORM: &str = "scale(1)";

/// Marker attribute set on a form once its submit handler is attached.
pub const FORM_WIRED_ATTR: &str = "data-hashpage-wired";

/// Border style for a nav link given its `data-page` value.
pub fn nav_border(link_page: Option<&str>, active_key: &str) -> &'static str {
  if link_page == Some(active_key) { NAV_ACTIVE_BORDER } else { NAV_INACTIVE_BORDER }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
  /// Route link: set `location.hash` to the page key.
  Navigate(String),
  /// In-page anchor: smooth-scroll to the element matching the selector.
  ScrollTo(String),
  /// Let the browser handle it.
  Ignore,
}

/// Decide what a click on an anchor means. `data_page` wins over `href`.
pub fn classify_click(data_page: Option<&str>, href: Option<&str>) -> ClickAction {
  if let Some(page) = data_page {
    return ClickAction::Navigate(page.to_string());
  }
  match href {
    Some(h) if h.starts_with('#') && h.len() > 1 => ClickAction::ScrollTo(h.to_string()),
    _ => ClickAction::Ignore,
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonChange {
  Show,
  Hide,
}

/// Visibility of the back-to-top button as a function of scroll offset.
#[derive(Debug)]
pub struct BackToTop {
  threshold: f64,
  visible: Cell<bool>,
}

impl BackToTop {
  pub fn new(threshold: f64) -> Self {
    Self { threshold, visible: Cell::new(false) }
  }

  pub fn is_visible(&self) -> bool {
    self.visible.get()
  }

  /// Returns a change only on transitions across the threshold.
  pub fn on_scroll(&self, offset: f64) -> Option<ButtonChange> {
    let want = offset > self.threshold;
    if want == self.visible.get() {
      return None;
    }
    self.visible.set(want);
    Some(if want { ButtonChange::Show } else { ButtonChange::Hide })
  }

  /// Forget the button, e.g. after it was removed from the DOM externally.
  pub fn reset(&self) {
    self.visible.set(false);
  }
}

/// One-shot registration flag for listeners that must be attached once.
#[derive(Debug, Default)]
pub struct AttachGuard {
  attached: Cell<bool>,
}

impl AttachGuard {
  pub fn new() -> Self {
    Self::default()
  }

  /// True for the first caller only.
  pub fn claim(&self) -> bool {
    !self.attached.replace(true)
  }

  pub fn is_attached(&self) -> bool {
    self.attached.get()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn nav_border_marks_only_active() {
    assert_eq!(nav_border(Some("news"), "news"), NAV_ACTIVE_BORDER);
    assert_eq!(nav_border(Some("about"), "news"), NAV_INACTIVE_BORDER);
    assert_eq!(nav_border(None, "news"), NAV_INACTIVE_BORDER);
  }

  #[test]
  fn route_links_navigate() {
    assert_eq!(
      classify_click(Some("about"), Some("#about")),
      ClickAction::Navigate("about".to_string())
    );
  }

  #[test]
  fn anchors_scroll() {
    assert_eq!(classify_click(None, Some("#team")), ClickAction::ScrollTo("#team".to_string()));
  }

  #[test]
  fn bare_hash_and_external_links_ignored() {
    assert_eq!(classify_click(None, Some("#")), ClickAction::Ignore);
    assert_eq!(classify_click(None, Some("")), ClickAction::Ignore);
    assert_eq!(classify_click(None, Some("https://www.wpi.edu")), ClickAction::Ignore);
    assert_eq!(classify_click(None, None), ClickAction::Ignore);
  }

  #[test]
  fn back_to_top_transitions() {
    let btn = BackToTop::new(300.0);
    assert_eq!(btn.on_scroll(10.0), None);
    assert_eq!(btn.on_scroll(300.0), None);
    assert_eq!(btn.on_scroll(301.0), Some(ButtonChange::Show));
    assert!(btn.is_visible());
    assert_eq!(btn.on_scroll(900.0), None);
    assert_eq!(btn.on_scroll(300.0), Some(ButtonChange::Hide));
    assert_eq!(btn.on_scroll(0.0), None);
    assert!(!btn.is_visible());
  }

  #[test]
  fn back_to_top_reset() {
    let btn = BackToTop::new(300.0);
    btn.on_scroll(500.0);
    btn.reset();
    assert_eq!(btn.on_scroll(500.0), Some(ButtonChange::Show));
  }

  #[test]
  fn attach_guard_claims_once() {
    let guard = AttachGuard::new();
    assert!(!guard.is_attached());
    assert!(guard.claim());
    assert!(!guard.claim());
    assert!(guard.is_attached());
  }
}
