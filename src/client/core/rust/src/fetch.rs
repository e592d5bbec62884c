/* src/client/core/rust/src/fetch.rs */

use std::future::Future;
use std::pin::Pin;

use tracing::error;

use crate::errors::HashpageError;

/// Non-`Send` boxed future. Browser futures are tied to the JS event loop thread.
pub type LocalBoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Retrieves raw fragment markup by site-relative path.
pub trait FragmentFetcher {
  fn fetch<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<String, HashpageError>>;
}

impl<F: FragmentFetcher + ?Sized> FragmentFetcher for &F {
  fn fetch<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<String, HashpageError>> {
    (**self).fetch(path)
  }
}

/// Fetch one fragment, never failing: errors are logged and replaced by `placeholder`.
pub async fn fetch_fragment<F>(fetcher: &F, path: &str, placeholder: &str) -> String
where
  F: FragmentFetcher + ?Sized,
{
  match fetcher.fetch(path).await {
    Ok(body) => body,
    Err(err) => {
      error!(path, code = err.code(), error = %err, "error loading fragment");
      placeholder.to_string()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::ScriptedFetcher;

  #[tokio::test]
  async fn success_returns_body() {
    let fetcher = ScriptedFetcher::new().ok("templates/home.html", "<h1>Home</h1>");
    let body = fetch_fragment(&fetcher, "templates/home.html", "oops").await;
    assert_eq!(body, "<h1>Home</h1>");
  }

  #[tokio::test]
  async fn http_status_becomes_placeholder() {
    let fetcher = ScriptedFetcher::new().status("templates/home.html", 500);
    let body = fetch_fragment(&fetcher, "templates/home.html", "oops").await;
    assert_eq!(body, "oops");
  }

  #[tokio::test]
  async fn network_error_becomes_placeholder() {
    let fetcher = ScriptedFetcher::new().network_error("templates/home.html");
    let body = fetch_fragment(&fetcher, "templates/home.html", "oops").await;
    assert_eq!(body, "oops");
  }

  #[tokio::test]
  async fn unscripted_path_is_not_found() {
    let fetcher = ScriptedFetcher::new();
    let err = fetcher.fetch("missing.html").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(fetch_fragment(&fetcher, "missing.html", "oops").await, "oops");
  }

  #[tokio::test]
  async fn empty_body_is_not_a_failure() {
    let fetcher = ScriptedFetcher::new().ok("templates/footer.html", "");
    assert_eq!(fetch_fragment(&fetcher, "templates/footer.html", "oops").await, "");
  }
}
