/* src/cli/core/src/serve.rs */

// Local static server for a hashpage site directory.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::ui;

/// Router serving `dir` as-is; `/` maps to `index.html`.
pub fn router(dir: &Path) -> Router {
  Router::new()
    .fallback_service(ServeDir::new(dir).append_index_html_on_directories(true))
    .layer(TraceLayer::new_for_http())
}

pub async fn serve(dir: PathBuf, port: u16) -> Result<()> {
  if !dir.join("index.html").is_file() {
    bail!("{} has no index.html", dir.display());
  }
  let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
    .await
    .with_context(|| format!("failed to bind port {port}"))?;
  let local_addr = listener.local_addr()?;
  ui::ok(&format!("serving {} at http://localhost:{}", dir.display(), local_addr.port()));
  axum::serve(listener, router(&dir)).await?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use axum::body::Body;
  use axum::http::{Request, StatusCode};
  use http_body_util::BodyExt;
  use tower::ServiceExt;

  use super::*;

  fn site_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<html>index</html>").unwrap();
    std::fs::create_dir(dir.path().join("templates")).unwrap();
    std::fs::write(dir.path().join("templates/header.html"), "<nav></nav>").unwrap();
    dir
  }

  async fn get(router: Router, uri: &str) -> (StatusCode, String) {
    let resp = router.oneshot(Request::get(uri).body(Body::empty()).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
  }

  #[tokio::test]
  async fn root_serves_index() {
    let dir = site_dir();
    let (status, body) = get(router(dir.path()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<html>index</html>");
  }

  #[tokio::test]
  async fn serves_fragments() {
    let dir = site_dir();
    let (status, body) = get(router(dir.path()), "/templates/header.html").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<nav></nav>");
  }

  #[tokio::test]
  async fn missing_fragment_is_404() {
    let dir = site_dir();
    let (status, _) = get(router(dir.path()), "/templates/nope.html").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn serve_requires_index() {
    let dir = tempfile::tempdir().unwrap();
    let err = serve(dir.path().to_path_buf(), 0).await.unwrap_err();
    assert!(err.to_string().contains("index.html"));
  }
}
