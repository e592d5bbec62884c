/* src/cli/core/src/check.rs */

// Smoke-check every route of a running site through the real page loader.

use std::sync::Arc;

use anyhow::{bail, Result};
use hashpage_core::{
  FragmentFetcher, HashpageError, LoadOutcome, LocalBoxFuture, MemoryDocument, PageLoader, Region,
  Site,
};

use crate::ui;

/// Plain HTTP GET against `base_url`.
pub struct HttpFetcher {
  client: reqwest::Client,
  base_url: String,
}

impl HttpFetcher {
  pub fn new(base_url: &str) -> Self {
    Self { client: reqwest::Client::new(), base_url: base_url.trim_end_matches('/').to_string() }
  }

  fn url(&self, path: &str) -> String {
    format!("{}/{}", self.base_url, path.trim_start_matches('/'))
  }
}

impl FragmentFetcher for HttpFetcher {
  fn fetch<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<String, HashpageError>> {
    Box::pin(async move {
      let url = self.url(path);
      let resp = self
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| HashpageError::fetch_failed(format!("{url}: {e}")))?;
      let status = resp.status();
      if !status.is_success() {
        return Err(HashpageError::http_status(status.as_u16(), path));
      }
      resp.text().await.map_err(|e| HashpageError::fetch_failed(format!("{url}: {e}")))
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteReport {
  pub key: String,
  pub title: String,
  /// Regions that ended up showing the error placeholder.
  pub broken: Vec<Region>,
}

impl RouteReport {
  pub fn is_ok(&self) -> bool {
    self.broken.is_empty()
  }
}

/// Load each registered route into a fresh in-memory document.
pub async fn check_routes<F: FragmentFetcher>(site: Arc<Site>, fetcher: &F) -> Vec<RouteReport> {
  let keys: Vec<String> = site.routes.keys().map(String::from).collect();
  let mut reports = Vec::with_capacity(keys.len());
  for key in keys {
    let loader = PageLoader::new(Arc::clone(&site), fetcher, MemoryDocument::new());
    if let LoadOutcome::Superseded = loader.load_page(&key).await {
      // a fresh loader per route has no competing navigation
      continue;
    }
    let doc = loader.document();
    let broken = Region::ALL
      .into_iter()
      .filter(|r| doc.region(*r).as_deref() == Some(site.placeholder.as_str()))
      .collect();
    reports.push(RouteReport { key, title: doc.title().unwrap_or_default(), broken });
  }
  reports
}

fn region_name(region: Region) -> &'static str {
  match region {
    Region::Header => "header",
    Region::Content => "content",
    Region::Footer => "footer",
  }
}

pub async fn run_check(site: Site, base_url: &str) -> Result<()> {
  ui::arrow(&format!("checking {} against {base_url}", ui::plural(site.routes.len(), "route")));
  let fetcher = HttpFetcher::new(base_url);
  let reports = check_routes(Arc::new(site), &fetcher).await;

  let mut failed = 0;
  for report in &reports {
    if report.is_ok() {
      ui::ok(&format!("#{} {}", report.key, report.title));
    } else {
      failed += 1;
      let regions: Vec<&str> = report.broken.iter().map(|r| region_name(*r)).collect();
      ui::fail(&format!("#{} {}", report.key, report.title));
      ui::detail(&format!("placeholder shown in: {}", regions.join(", ")));
    }
  }

  if failed > 0 {
    bail!("{} failed to load", ui::plural(failed, "route"));
  }
  ui::ok(&format!("all {} loaded", ui::plural(reports.len(), "route")));
  Ok(())
}
