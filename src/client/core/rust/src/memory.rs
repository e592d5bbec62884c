/* src/client/core/rust/src/memory.rs */

// In-memory document and form, used by tests and the CLI route checker.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::chrome::AttachGuard;
use crate::document::{Document, Region};
use crate::form::{FormSurface, StatusKind, Submission};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSnapshot {
  pub title: Option<String>,
  pub regions: BTreeMap<Region, String>,
  pub highlighted: Option<String>,
}

#[derive(Debug, Default)]
struct DocState {
  snapshot: DocumentSnapshot,
  writes: Vec<(Region, String)>,
  scroll_to_top: usize,
  chrome_install_calls: usize,
  chrome_listeners: usize,
  form_wired_for_content: bool,
  forms_wired: usize,
}

#[derive(Debug, Default)]
pub struct MemoryDocument {
  state: RefCell<DocState>,
  chrome: AttachGuard,
}

impl MemoryDocument {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn title(&self) -> Option<String> {
    self.state.borrow().snapshot.title.clone()
  }

  pub fn region(&self, region: Region) -> Option<String> {
    self.state.borrow().snapshot.regions.get(&region).cloned()
  }

  pub fn highlighted(&self) -> Option<String> {
    self.state.borrow().snapshot.highlighted.clone()
  }

  pub fn snapshot(&self) -> DocumentSnapshot {
    self.state.borrow().snapshot.clone()
  }

  /// Every region replacement, oldest first.
  pub fn writes(&self) -> Vec<(Region, String)> {
    self.state.borrow().writes.clone()
  }

  pub fn scroll_to_top_count(&self) -> usize {
    self.state.borrow().scroll_to_top
  }

  pub fn chrome_install_calls(&self) -> usize {
    self.state.borrow().chrome_install_calls
  }

  /// Listener sets actually attached; stays at 1 however often chrome is installed.
  pub fn chrome_listener_count(&self) -> usize {
    self.state.borrow().chrome_listeners
  }

  pub fn forms_wired(&self) -> usize {
    self.state.borrow().forms_wired
  }
}

impl Document for MemoryDocument {
  fn set_title(&self, title: &str) {
    self.state.borrow_mut().snapshot.title = Some(title.to_string());
  }

  fn replace_region(&self, region: Region, html: &str) {
    let mut state = self.state.borrow_mut();
    state.snapshot.regions.insert(region, html.to_string());
    state.writes.push((region, html.to_string()));
    if region == Region::Content {
      state.form_wired_for_content = false;
    }
  }

  fn scroll_to_top(&self) {
    self.state.borrow_mut().scroll_to_top += 1;
  }

  fn highlight_nav(&self, active_key: &str) {
    self.state.borrow_mut().snapshot.highlighted = Some(active_key.to_string());
  }

  fn install_chrome(&self) {
    let mut state = self.state.borrow_mut();
    state.chrome_install_calls += 1;
    if self.chrome.claim() {
      state.chrome_listeners += 1;
    }
  }

  fn wire_form(&self) {
    let mut state = self.state.borrow_mut();
    if !state.form_wired_for_content {
      state.form_wired_for_content = true;
      state.forms_wired += 1;
    }
  }
}

#[derive(Debug, Default)]
struct FormState {
  fields: Submission,
  status: Option<(StatusKind, String)>,
  busy: bool,
  busy_transitions: Vec<bool>,
}

/// Form surface backed by a field map.
#[derive(Debug, Default)]
pub struct MemoryForm {
  state: RefCell<FormState>,
}

impl MemoryForm {
  pub fn new(fields: Submission) -> Self {
    Self { state: RefCell::new(FormState { fields, ..FormState::default() }) }
  }

  pub fn status(&self) -> Option<(StatusKind, String)> {
    self.state.borrow().status.clone()
  }

  pub fn is_busy(&self) -> bool {
    self.state.borrow().busy
  }

  pub fn busy_transitions(&self) -> Vec<bool> {
    self.state.borrow().busy_transitions.clone()
  }
}

impl FormSurface for MemoryForm {
  fn collect(&self) -> Submission {
    self.state.borrow().fields.clone()
  }

  fn set_busy(&self, busy: bool) {
    let mut state = self.state.borrow_mut();
    state.busy = busy;
    state.busy_transitions.push(busy);
  }

  fn show_status(&self, kind: StatusKind, message: &str) {
    self.state.borrow_mut().status = Some((kind, message.to_string()));
  }

  fn clear(&self) {
    self.state.borrow_mut().fields = Submission::new();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn chrome_listeners_attach_once() {
    let doc = MemoryDocument::new();
    doc.install_chrome();
    doc.install_chrome();
    doc.install_chrome();
    assert_eq!(doc.chrome_install_calls(), 3);
    assert_eq!(doc.chrome_listener_count(), 1);
  }

  #[test]
  fn form_wiring_is_per_content() {
    let doc = MemoryDocument::new();
    doc.replace_region(Region::Content, "<form></form>");
    doc.wire_form();
    doc.wire_form();
    assert_eq!(doc.forms_wired(), 1);
    doc.replace_region(Region::Content, "<form></form>");
    doc.wire_form();
    assert_eq!(doc.forms_wired(), 2);
  }
}
