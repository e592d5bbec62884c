/* src/client/core/rust/src/document.rs */

/// Element id of the `<title>` element.
pub const TITLE_ELEMENT_ID: &str = "page-title";

/// The three page regions replaced on every navigation, in replacement order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
  Header,
  Content,
  Footer,
}

impl Region {
  pub const ALL: [Region; 3] = [Region::Header, Region::Content, Region::Footer];

  pub fn element_id(self) -> &'static str {
    match self {
      Self::Header => "header-placeholder",
      Self::Content => "content-placeholder",
      Self::Footer => "footer-placeholder",
    }
  }
}

/// DOM capability injected into the page loader.
///
/// Methods take `&self`: browser handles are shared references, and the
/// in-memory implementation uses interior mutability.
pub trait Document {
  fn set_title(&self, title: &str);

  fn replace_region(&self, region: Region, html: &str);

  fn scroll_to_top(&self);

  /// Mark the nav link for `active_key` as current and clear the others.
  fn highlight_nav(&self, active_key: &str);

  /// Install the scroll, back-to-top, smooth-scroll and nav-click listeners.
  /// Called after every navigation; implementations must attach them only once.
  fn install_chrome(&self);

  /// Attach the submission handler to the form now in the content region.
  /// A given form element must not receive more than one handler.
  fn wire_form(&self);
}

impl<D: Document + ?Sized> Document for std::rc::Rc<D> {
  fn set_title(&self, title: &str) {
    (**self).set_title(title);
  }

  fn replace_region(&self, region: Region, html: &str) {
    (**self).replace_region(region, html);
  }

  fn scroll_to_top(&self) {
    (**self).scroll_to_top();
  }

  fn highlight_nav(&self, active_key: &str) {
    (**self).highlight_nav(active_key);
  }

  fn install_chrome(&self) {
    (**self).install_chrome();
  }

  fn wire_form(&self) {
    (**self).wire_form();
  }
}
