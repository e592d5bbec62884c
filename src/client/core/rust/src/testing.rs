/* src/client/core/rust/src/testing.rs */

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::HashpageError;
use crate::fetch::{FragmentFetcher, LocalBoxFuture};
use crate::form::Timer;

#[derive(Clone)]
struct Script {
  response: Result<String, HashpageError>,
  delay: Duration,
}

/// Fetcher with canned responses and per-path latency. Unscripted paths 404.
#[derive(Default)]
pub(crate) struct ScriptedFetcher {
  scripts: HashMap<String, Script>,
  requests: RefCell<Vec<String>>,
}

impl ScriptedFetcher {
  pub fn new() -> Self {
    Self::default()
  }

  fn respond(mut self, path: &str, response: Result<String, HashpageError>) -> Self {
    let delay = self.scripts.get(path).map(|s| s.delay).unwrap_or_default();
    self.scripts.insert(path.to_string(), Script { response, delay });
    self
  }

  pub fn ok(self, path: &str, body: &str) -> Self {
    self.respond(path, Ok(body.to_string()))
  }

  pub fn status(self, path: &str, status: u16) -> Self {
    self.respond(path, Err(HashpageError::http_status(status, path)))
  }

  pub fn network_error(self, path: &str) -> Self {
    self.respond(path, Err(HashpageError::fetch_failed("connection refused")))
  }

  pub fn delay(mut self, path: &str, delay: Duration) -> Self {
    if let Some(script) = self.scripts.get_mut(path) {
      script.delay = delay;
    }
    self
  }

  pub fn requests(&self) -> Vec<String> {
    self.requests.borrow().clone()
  }
}

impl FragmentFetcher for ScriptedFetcher {
  fn fetch<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<String, HashpageError>> {
    self.requests.borrow_mut().push(path.to_string());
    let script = self.scripts.get(path).cloned();
    Box::pin(async move {
      let Some(script) = script else {
        return Err(HashpageError::http_status(404, path));
      };
      if !script.delay.is_zero() {
        tokio::time::sleep(script.delay).await;
      }
      script.response
    })
  }
}

pub(crate) struct TokioTimer;

impl Timer for TokioTimer {
  fn sleep(&self, duration: Duration) -> LocalBoxFuture<'_, ()> {
    Box::pin(tokio::time::sleep(duration))
  }
}
