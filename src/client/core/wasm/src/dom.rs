/* src/client/core/wasm/src/dom.rs */

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use hashpage_core::chrome::{
  classify_click, nav_border, AttachGuard, BackToTop, ButtonChange, ClickAction,
  BACK_TO_TOP_CLASS, BACK_TO_TOP_GLYPH, BACK_TO_TOP_HOVER_TRANSFORM, BACK_TO_TOP_LABEL,
  BACK_TO_TOP_REST_TRANSFORM, BACK_TO_TOP_STYLE, FORM_WIRED_ATTR, NAV_LINK_SELECTOR,
};
use hashpage_core::form::FORM_ELEMENT_ID;
use hashpage_core::{handle_submit, Region, Site, TITLE_ELEMENT_ID};
use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
  Document, Element, Event, EventTarget, HtmlElement, HtmlFormElement, ScrollBehavior,
  ScrollIntoViewOptions, ScrollLogicalPosition, ScrollToOptions, Window,
};

use crate::fetch::js_message;
use crate::form::{BrowserTimer, WebForm};

type Listener = Closure<dyn FnMut(Event)>;

fn log_js(context: &str, err: &JsValue) {
  warn!(error = %js_message(err), "{context}");
}

fn event_element(event: &Event) -> Option<Element> {
  event.target()?.dyn_into::<Element>().ok()
}

fn listen(target: &EventTarget, kind: &str, listener: Listener) {
  let added = target.add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref());
  match added {
    // installed once per page lifetime
    Ok(()) => listener.forget(),
    Err(err) => log_js(&format!("could not add {kind} listener"), &err),
  }
}

fn smooth_scroll_top(window: &Window) {
  let opts = ScrollToOptions::new();
  opts.set_top(0.0);
  opts.set_behavior(ScrollBehavior::Smooth);
  window.scroll_to_with_scroll_to_options(&opts);
}

/// `hashpage_core::Document` over the live browser DOM.
pub struct WebDocument {
  window: Window,
  document: Document,
  site: Arc<Site>,
  chrome: AttachGuard,
  back_to_top: Rc<BackToTop>,
  form_listener: RefCell<Option<Listener>>,
}

impl WebDocument {
  pub fn new(window: Window, document: Document, site: Arc<Site>) -> Self {
    let back_to_top = Rc::new(BackToTop::new(site.back_to_top_threshold));
    Self {
      window,
      document,
      site,
      chrome: AttachGuard::new(),
      back_to_top,
      form_listener: RefCell::new(None),
    }
  }

  fn install_scroll_listener(&self) {
    let window = self.window.clone();
    let document = self.document.clone();
    let state = Rc::clone(&self.back_to_top);
    let listener = Listener::new(move |_event: Event| {
      let offset = window.scroll_y().unwrap_or(0.0);
      match state.on_scroll(offset) {
        Some(ButtonChange::Show) => show_back_to_top(&document),
        Some(ButtonChange::Hide) => remove_back_to_top(&document),
        None => {}
      }
    });
    listen(&self.window, "scroll", listener);
  }

  fn install_click_listener(&self) {
    let window = self.window.clone();
    let document = self.document.clone();
    let listener = Listener::new(move |event: Event| {
      let Some(target) = event_element(&event) else {
        return;
      };
      if let Ok(Some(_)) = target.closest(&format!(".{BACK_TO_TOP_CLASS}")) {
        smooth_scroll_top(&window);
        return;
      }
      let Ok(Some(anchor)) = target.closest("a") else {
        return;
      };
      let action = classify_click(
        anchor.get_attribute("data-page").as_deref(),
        anchor.get_attribute("href").as_deref(),
      );
      match action {
        ClickAction::Navigate(page) => {
          event.prevent_default();
          if let Err(err) = window.location().set_hash(&page) {
            log_js("could not set location hash", &err);
          }
        }
        ClickAction::ScrollTo(selector) => {
          event.prevent_default();
          if let Ok(Some(el)) = document.query_selector(&selector) {
            let opts = ScrollIntoViewOptions::new();
            opts.set_behavior(ScrollBehavior::Smooth);
            opts.set_block(ScrollLogicalPosition::Start);
            el.scroll_into_view_with_scroll_into_view_options(&opts);
          }
        }
        ClickAction::Ignore => {}
      }
    });
    listen(&self.document, "click", listener);
  }

  fn install_hover_listeners(&self) {
    for (kind, transform) in
      [("mouseover", BACK_TO_TOP_HOVER_TRANSFORM), ("mouseout", BACK_TO_TOP_REST_TRANSFORM)]
    {
      let listener = Listener::new(move |event: Event| {
        let button = event_element(&event)
          .and_then(|el| el.closest(&format!(".{BACK_TO_TOP_CLASS}")).ok().flatten())
          .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(button) = button {
          let _ = button.style().set_property("transform", transform);
        }
      });
      listen(&self.document, kind, listener);
    }
  }
}

fn show_back_to_top(document: &Document) {
  if let Ok(Some(_)) = document.query_selector(&format!(".{BACK_TO_TOP_CLASS}")) {
    return;
  }
  let button = match document.create_element("button") {
    Ok(el) => el,
    Err(err) => return log_js("could not create back-to-top button", &err),
  };
  button.set_inner_html(BACK_TO_TOP_GLYPH);
  button.set_class_name(BACK_TO_TOP_CLASS);
  let _ = button.set_attribute("aria-label", BACK_TO_TOP_LABEL);
  let _ = button.set_attribute("style", BACK_TO_TOP_STYLE);
  match document.body() {
    Some(body) => {
      if let Err(err) = body.append_child(&button) {
        log_js("could not append back-to-top button", &err);
      }
    }
    None => warn!("document has no body"),
  }
}

fn remove_back_to_top(document: &Document) {
  if let Ok(Some(button)) = document.query_selector(&format!(".{BACK_TO_TOP_CLASS}")) {
    button.remove();
  }
}

impl hashpage_core::Document for WebDocument {
  fn set_title(&self, title: &str) {
    match self.document.get_element_by_id(TITLE_ELEMENT_ID) {
      Some(el) => el.set_text_content(Some(title)),
      None => self.document.set_title(title),
    }
  }

  fn replace_region(&self, region: Region, html: &str) {
    match self.document.get_element_by_id(region.element_id()) {
      Some(el) => el.set_inner_html(html),
      None => warn!(id = region.element_id(), "page region missing"),
    }
  }

  fn scroll_to_top(&self) {
    self.window.scroll_to_with_x_and_y(0.0, 0.0);
  }

  fn highlight_nav(&self, active_key: &str) {
    let links = match self.document.query_selector_all(NAV_LINK_SELECTOR) {
      Ok(links) => links,
      Err(err) => return log_js("could not query nav links", &err),
    };
    for i in 0..links.length() {
      let Some(link) = links.get(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
        continue;
      };
      let border = nav_border(link.get_attribute("data-page").as_deref(), active_key);
      if let Err(err) = link.style().set_property("border-bottom", border) {
        log_js("could not style nav link", &err);
      }
    }
  }

  fn install_chrome(&self) {
    if !self.chrome.claim() {
      return;
    }
    debug!("installing page chrome listeners");
    self.install_scroll_listener();
    self.install_click_listener();
    self.install_hover_listeners();
  }

  fn wire_form(&self) {
    let form = match self.document.get_element_by_id(FORM_ELEMENT_ID) {
      Some(el) => match el.dyn_into::<HtmlFormElement>() {
        Ok(form) => form,
        Err(_) => {
          warn!(id = FORM_ELEMENT_ID, "element is not a form");
          return;
        }
      },
      None => {
        warn!(id = FORM_ELEMENT_ID, "form page has no form");
        return;
      }
    };
    if form.has_attribute(FORM_WIRED_ATTR) {
      return;
    }

    let window = self.window.clone();
    let document = self.document.clone();
    let delay = self.site.submit_delay;
    let target = form.clone();
    let listener = Listener::new(move |event: Event| {
      event.prevent_default();
      let surface = WebForm::new(target.clone(), document.clone());
      let timer = BrowserTimer::new(window.clone());
      spawn_local(async move {
        let _ = handle_submit(&surface, &timer, delay).await;
      });
    });
    if let Err(err) =
      form.add_event_listener_with_callback("submit", listener.as_ref().unchecked_ref())
    {
      return log_js("could not attach form handler", &err);
    }
    let _ = form.set_attribute(FORM_WIRED_ATTR, "");
    // The previous form left the DOM with its content region; drop its handler.
    *self.form_listener.borrow_mut() = Some(listener);
  }
}
