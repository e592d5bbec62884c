/* src/client/core/rust/src/loader.rs */

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures_util::future::join3;
use tracing::debug;

use crate::config::Site;
use crate::document::{Document, Region};
use crate::fetch::{fetch_fragment, FragmentFetcher};
use crate::route::route_key_from_hash;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
  /// Regions were replaced with the page registered under `key`.
  Applied { key: String },
  /// A newer navigation started before the fragments arrived; nothing was written.
  Superseded,
}

/// Resolves route keys, fetches header/body/footer concurrently and swaps them
/// into the document in one step.
pub struct PageLoader<F, D> {
  site: Arc<Site>,
  fetcher: F,
  document: D,
  generation: AtomicU64,
}

impl<F, D> PageLoader<F, D>
where
  F: FragmentFetcher,
  D: Document,
{
  pub fn new(site: Arc<Site>, fetcher: F, document: D) -> Self {
    Self { site, fetcher, document, generation: AtomicU64::new(0) }
  }

  pub fn site(&self) -> &Site {
    &self.site
  }

  pub fn document(&self) -> &D {
    &self.document
  }

  pub fn fetcher(&self) -> &F {
    &self.fetcher
  }

  /// Number of navigations started so far.
  pub fn generation(&self) -> u64 {
    self.generation.load(Ordering::SeqCst)
  }

  /// Navigate from a raw location hash (`"#about"`, `""`).
  pub async fn load_hash(&self, hash: &str) -> LoadOutcome {
    let key = route_key_from_hash(hash, self.site.routes.default_key());
    self.load_page(&key).await
  }

  pub async fn load_page(&self, key: &str) -> LoadOutcome {
    let (resolved, page) = self.site.routes.resolve_entry(key);
    let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
    debug!(key, resolved, generation, "loading page");

    let placeholder = self.site.placeholder.as_str();
    let (header, content, footer) = join3(
      fetch_fragment(&self.fetcher, &self.site.header_path, placeholder),
      fetch_fragment(&self.fetcher, &page.fragment_path, placeholder),
      fetch_fragment(&self.fetcher, &self.site.footer_path, placeholder),
    )
    .await;

    if self.generation.load(Ordering::SeqCst) != generation {
      debug!(key, generation, "navigation superseded, discarding fragments");
      return LoadOutcome::Superseded;
    }

    self.document.set_title(&page.title);
    self.document.replace_region(Region::Header, &header);
    self.document.replace_region(Region::Content, &content);
    self.document.replace_region(Region::Footer, &footer);

    self.document.scroll_to_top();
    self.document.highlight_nav(resolved);
    self.document.install_chrome();
    if page.form {
      self.document.wire_form();
    }

    LoadOutcome::Applied { key: resolved.to_string() }
  }
}
