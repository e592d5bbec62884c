/* src/client/core/wasm/src/fetch.rs */

use hashpage_core::{FragmentFetcher, HashpageError, LocalBoxFuture};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Window};

/// Best-effort human-readable text for a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
  if let Some(s) = value.as_string() {
    return s;
  }
  if let Some(err) = value.dyn_ref::<js_sys::Error>() {
    return String::from(err.message());
  }
  format!("{value:?}")
}

/// Same-origin GET through `window.fetch`.
pub struct WebFetcher {
  window: Window,
}

impl WebFetcher {
  pub fn new(window: Window) -> Self {
    Self { window }
  }
}

impl FragmentFetcher for WebFetcher {
  fn fetch<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<String, HashpageError>> {
    Box::pin(async move {
      let value = JsFuture::from(self.window.fetch_with_str(path))
        .await
        .map_err(|e| HashpageError::fetch_failed(format!("{path}: {}", js_message(&e))))?;
      let response: Response = value
        .dyn_into()
        .map_err(|_| HashpageError::fetch_failed(format!("{path}: fetch did not yield a Response")))?;
      if !response.ok() {
        return Err(HashpageError::http_status(response.status(), path));
      }
      let text = response
        .text()
        .map_err(|e| HashpageError::fetch_failed(format!("{path}: {}", js_message(&e))))?;
      let body = JsFuture::from(text)
        .await
        .map_err(|e| HashpageError::fetch_failed(format!("{path}: {}", js_message(&e))))?;
      body
        .as_string()
        .ok_or_else(|| HashpageError::fetch_failed(format!("{path}: response body is not text")))
    })
  }
}
