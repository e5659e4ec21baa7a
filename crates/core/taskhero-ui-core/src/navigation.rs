//! Mobile navigation menu

use crate::style::{RESPONSIVE_NAV_CSS, RESPONSIVE_NAV_STYLE_ID, StyleHost};
use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;

/// Hamburger button and nav menu
pub trait NavSurface {
    /// Set or clear the `active` class on both the hamburger and the menu
    fn set_active(&self, active: bool);
}

/// Where a document click landed relative to the navigation elements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickTarget {
    pub in_hamburger: bool,
    pub in_menu: bool,
}

impl ClickTarget {
    pub fn outside() -> Self {
        Self::default()
    }

    fn is_outside(self) -> bool {
        !self.in_hamburger && !self.in_menu
    }
}

/// Toggles the mobile menu
pub struct NavigationManager {
    open: Cell<bool>,
    surface: Rc<dyn NavSurface>,
}

impl NavigationManager {
    /// Inject the responsive stylesheet and start with the menu closed
    pub fn new(surface: Rc<dyn NavSurface>, styles: &dyn StyleHost) -> Self {
        styles.inject_style(RESPONSIVE_NAV_STYLE_ID, RESPONSIVE_NAV_CSS);
        Self {
            open: Cell::new(false),
            surface,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Hamburger click
    pub fn toggle(&self) -> bool {
        let open = !self.is_open();
        self.set_open(open);
        open
    }

    pub fn close(&self) {
        self.set_open(false);
    }

    /// A link inside the menu was followed
    pub fn on_link_click(&self) {
        self.close();
    }

    /// Any click on the document, after element-level handlers ran
    pub fn on_document_click(&self, target: ClickTarget) {
        if target.is_outside() && self.is_open() {
            debug!("Closing navigation after outside click");
            self.close();
        }
    }

    fn set_open(&self, open: bool) {
        self.open.set(open);
        self.surface.set_active(open);
    }
}
