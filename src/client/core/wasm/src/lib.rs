/* src/client/core/wasm/src/lib.rs */

mod dom;
mod fetch;
mod form;

use std::rc::Rc;
use std::sync::Arc;

use hashpage_core::{parse_site, PageLoader, Region, Site};
use tracing::{error, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, Window};

pub use dom::WebDocument;
pub use fetch::WebFetcher;
pub use form::{BrowserTimer, WebForm};

const SITE_TOML: &str = include_str!("../../../../../site/site.toml");

type Loader = PageLoader<WebFetcher, WebDocument>;

/// Embedded site config, or the built-in site if it does not parse.
fn embedded_site() -> Site {
  parse_site(SITE_TOML).unwrap_or_else(|err| {
    error!(error = %err, "site.toml rejected, using built-in site");
    Site::default()
  })
}

fn navigate_current(window: &Window, loader: &Rc<Loader>) {
  let hash = window.location().hash().unwrap_or_default();
  let loader = Rc::clone(loader);
  spawn_local(async move {
    loader.load_hash(&hash).await;
  });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
  tracing_wasm::set_as_global_default();

  let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
  let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
  let site = Arc::new(embedded_site());
  info!(routes = site.routes.len(), "hashpage starting");

  let loader = Rc::new(PageLoader::new(
    Arc::clone(&site),
    WebFetcher::new(window.clone()),
    WebDocument::new(window.clone(), document.clone(), site),
  ));

  let on_hash_change = {
    let window = window.clone();
    let loader = Rc::clone(&loader);
    Closure::<dyn FnMut(Event)>::new(move |_event: Event| navigate_current(&window, &loader))
  };
  window
    .add_event_listener_with_callback("hashchange", on_hash_change.as_ref().unchecked_ref())?;
  on_hash_change.forget();

  // The module may finish loading after DOMContentLoaded has already fired.
  if document.get_element_by_id(Region::Content.element_id()).is_some() {
    navigate_current(&window, &loader);
  } else {
    let ready_window = window.clone();
    let on_ready = Closure::<dyn FnMut(Event)>::once(move |_event: Event| {
      navigate_current(&ready_window, &loader);
    });
    document
      .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
    on_ready.forget();
  }
  Ok(())
}

/// Navigate programmatically; goes through `hashchange` like a link click.
#[wasm_bindgen]
pub fn navigate(key: &str) -> Result<(), JsValue> {
  let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
  window.location().set_hash(key)
}

/// Title the router would show for `key`, after default-route fallback.
#[wasm_bindgen]
pub fn page_title(key: &str) -> String {
  embedded_site().routes.resolve(key).title.clone()
}
