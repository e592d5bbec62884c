/* src/client/core/rust/src/errors.rs */

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashpageError {
  code: String,
  message: String,
  status: Option<u16>,
}

impl HashpageError {
  pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
    Self { code: code.into(), message: message.into(), status: None }
  }

  /// Network-level failure: the request never produced a response.
  pub fn fetch_failed(msg: impl Into<String>) -> Self {
    Self::new("FETCH_FAILED", msg)
  }

  /// The server answered, but not with a success status.
  pub fn http_status(status: u16, path: &str) -> Self {
    Self {
      code: "HTTP_STATUS".to_string(),
      message: format!("{path} returned {status}"),
      status: Some(status),
    }
  }

  pub fn invalid_config(msg: impl Into<String>) -> Self {
    Self::new("INVALID_CONFIG", msg)
  }

  pub fn missing_default_route(key: &str) -> Self {
    Self::new("MISSING_DEFAULT_ROUTE", format!("default route \"{key}\" is not in the route table"))
  }

  pub fn invalid_route(msg: impl Into<String>) -> Self {
    Self::new("INVALID_ROUTE", msg)
  }

  pub fn submit_failed(msg: impl Into<String>) -> Self {
    Self::new("SUBMIT_FAILED", msg)
  }

  pub fn code(&self) -> &str {
    &self.code
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  pub fn status(&self) -> Option<u16> {
    self.status
  }
}

impl fmt::Display for HashpageError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code, self.message)
  }
}

impl std::error::Error for HashpageError {}

impl From<toml::de::Error> for HashpageError {
  fn from(err: toml::de::Error) -> Self {
    Self::invalid_config(err.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn http_status_carries_code() {
    let err = HashpageError::http_status(404, "templates/nope.html");
    assert_eq!(err.code(), "HTTP_STATUS");
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.message(), "templates/nope.html returned 404");
  }

  #[test]
  fn network_failure_has_no_status() {
    let err = HashpageError::fetch_failed("connection refused");
    assert_eq!(err.code(), "FETCH_FAILED");
    assert_eq!(err.status(), None);
  }

  #[test]
  fn display_format() {
    let err = HashpageError::missing_default_route("home");
    assert_eq!(
      err.to_string(),
      "MISSING_DEFAULT_ROUTE: default route \"home\" is not in the route table"
    );
  }
}
