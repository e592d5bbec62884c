/* src/client/core/rust/src/form.rs */

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::{info, warn};

use crate::errors::HashpageError;
use crate::fetch::LocalBoxFuture;

pub const FORM_ELEMENT_ID: &str = "contact-form";
pub const STATUS_ELEMENT_ID: &str = "form-status";
pub const EMAIL_FIELD: &str = "email";
pub const BUSY_LABEL: &str = "Sending...";
pub const ERROR_MESSAGE: &str = "Sorry, something went wrong. Please try again.";

pub fn success_message(email: &str) -> String {
  format!("Thank you! Your message has been received. We'll reply to {email}.")
}

/// Async sleep provided by the host (browser timers, tokio in tests).
pub trait Timer {
  fn sleep(&self, duration: Duration) -> LocalBoxFuture<'_, ()>;
}

/// Field values collected from the form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
  fields: BTreeMap<String, String>,
}

impl Submission {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.insert(name, value);
    self
  }

  pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.fields.insert(name.into(), value.into());
  }

  pub fn get(&self, name: &str) -> Option<&str> {
    self.fields.get(name).map(String::as_str)
  }

  pub fn email(&self) -> &str {
    self.get(EMAIL_FIELD).unwrap_or_default()
  }

  pub fn len(&self) -> usize {
    self.fields.len()
  }

  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
  pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
  Success,
  Error,
}

impl StatusKind {
  pub fn class_name(self) -> &'static str {
    match self {
      Self::Success => "form-status success",
      Self::Error => "form-status error",
    }
  }
}

/// The form as seen by the submission flow.
pub trait FormSurface {
  fn collect(&self) -> Submission;
  fn set_busy(&self, busy: bool);
  fn show_status(&self, kind: StatusKind, message: &str);
  fn clear(&self);
}

/// Stand-in for a real submission endpoint: waits `delay`, then accepts.
pub async fn submit_stub<T>(
  timer: &T,
  delay: Duration,
  submission: &Submission,
) -> Result<Receipt, HashpageError>
where
  T: Timer + ?Sized,
{
  timer.sleep(delay).await;
  info!(email = submission.email(), fields = submission.len(), "contact form submitted");
  Ok(Receipt { email: submission.email().to_string() })
}

/// Full submit flow: busy state, simulated send, status message, reset.
pub async fn handle_submit<S, T>(
  surface: &S,
  timer: &T,
  delay: Duration,
) -> Result<Receipt, HashpageError>
where
  S: FormSurface + ?Sized,
  T: Timer + ?Sized,
{
  let submission = surface.collect();
  surface.set_busy(true);
  let result = submit_stub(timer, delay, &submission).await;
  match &result {
    Ok(receipt) => {
      surface.show_status(StatusKind::Success, &success_message(&receipt.email));
      surface.clear();
    }
    Err(err) => {
      warn!(error = %err, "contact form submission failed");
      surface.show_status(StatusKind::Error, ERROR_MESSAGE);
    }
  }
  surface.set_busy(false);
  result
}
