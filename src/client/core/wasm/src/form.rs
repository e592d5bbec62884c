/* src/client/core/wasm/src/form.rs */

use std::time::Duration;

use hashpage_core::form::{BUSY_LABEL, STATUS_ELEMENT_ID};
use hashpage_core::{FormSurface, LocalBoxFuture, StatusKind, Submission, Timer};
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, FormData, HtmlButtonElement, HtmlFormElement, Window};

use crate::fetch::js_message;

const LABEL_ATTR: &str = "data-label";

/// `setTimeout` wrapped in a promise.
pub struct BrowserTimer {
  window: Window,
}

impl BrowserTimer {
  pub fn new(window: Window) -> Self {
    Self { window }
  }
}

impl Timer for BrowserTimer {
  fn sleep(&self, duration: Duration) -> LocalBoxFuture<'_, ()> {
    let ms = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
      if let Err(err) =
        self.window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
      {
        warn!(error = %js_message(&err), "setTimeout failed, resolving immediately");
        let _ = resolve.call0(&JsValue::NULL);
      }
    });
    Box::pin(async move {
      let _ = JsFuture::from(promise).await;
    })
  }
}

/// The contact form element plus its status region.
pub struct WebForm {
  form: HtmlFormElement,
  document: Document,
}

impl WebForm {
  pub fn new(form: HtmlFormElement, document: Document) -> Self {
    Self { form, document }
  }

  fn submit_button(&self) -> Option<HtmlButtonElement> {
    let button = self.form.query_selector("button[type=\"submit\"], button:not([type])").ok()??;
    button.dyn_into().ok()
  }
}

impl FormSurface for WebForm {
  fn collect(&self) -> Submission {
    let mut submission = Submission::new();
    let data = match FormData::new_with_form(&self.form) {
      Ok(data) => data,
      Err(err) => {
        warn!(error = %js_message(&err), "could not read form data");
        return submission;
      }
    };
    if let Ok(Some(entries)) = js_sys::try_iter(&data) {
      for entry in entries.flatten() {
        let pair: js_sys::Array = entry.unchecked_into();
        if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
          submission.insert(name, value);
        }
      }
    }
    submission
  }

  fn set_busy(&self, busy: bool) {
    let Some(button) = self.submit_button() else {
      return;
    };
    if busy {
      let label = button.text_content().unwrap_or_default();
      let _ = button.set_attribute(LABEL_ATTR, &label);
      button.set_text_content(Some(BUSY_LABEL));
    } else if let Some(label) = button.get_attribute(LABEL_ATTR) {
      button.set_text_content(Some(&label));
      let _ = button.remove_attribute(LABEL_ATTR);
    }
    button.set_disabled(busy);
  }

  fn show_status(&self, kind: StatusKind, message: &str) {
    match self.document.get_element_by_id(STATUS_ELEMENT_ID) {
      Some(status) => {
        status.set_text_content(Some(message));
        status.set_class_name(kind.class_name());
      }
      None => warn!(id = STATUS_ELEMENT_ID, "form status element missing"),
    }
  }

  fn clear(&self) {
    self.form.reset();
  }
}
