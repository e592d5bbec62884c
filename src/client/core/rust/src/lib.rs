/* src/client/core/rust/src/lib.rs */

pub mod chrome;
pub mod config;
pub mod document;
pub mod errors;
pub mod fetch;
pub mod form;
pub mod loader;
pub mod memory;
pub mod route;

#[cfg(test)]
mod testing;

// Re-exports for ergonomic use
pub use config::{parse_site, Site, SiteConfig, DEFAULT_PLACEHOLDER};
pub use document::{Document, Region, TITLE_ELEMENT_ID};
pub use errors::HashpageError;
pub use fetch::{fetch_fragment, FragmentFetcher, LocalBoxFuture};
pub use form::{handle_submit, FormSurface, Receipt, StatusKind, Submission, Timer};
pub use loader::{LoadOutcome, PageLoader};
pub use memory::{MemoryDocument, MemoryForm};
pub use route::{route_key_from_hash, PageDescriptor, RouteTable, DEFAULT_ROUTE};
