//! Modal dialog visibility

use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Element id of the delete confirmation dialog
pub const DELETE_MODAL: &str = "deleteModal";

/// Element id of the status change dialog
pub const STATUS_MODAL: &str = "statusModal";

/// Body `overflow` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    Hidden,
    Auto,
}

impl Overflow {
    pub fn as_css(self) -> &'static str {
        match self {
            Overflow::Hidden => "hidden",
            Overflow::Auto => "auto",
        }
    }
}

/// Modal elements and the document body
pub trait ModalSurface {
    /// Show or hide the modal with the given element id.
    ///
    /// Returns `false` when no such modal exists.
    fn set_modal_visible(&self, id: &str, visible: bool) -> bool;

    fn set_body_overflow(&self, overflow: Overflow);
}

/// Tracks which modals are open and keeps body scrolling in sync
pub struct ModalController {
    surface: Rc<dyn ModalSurface>,
    open: RefCell<Vec<String>>,
}

impl ModalController {
    pub fn new(surface: Rc<dyn ModalSurface>) -> Self {
        Self {
            surface,
            open: RefCell::new(Vec::new()),
        }
    }

    /// Show a modal and suppress body scrolling. Unknown ids are ignored.
    pub fn show(&self, id: &str) -> bool {
        if !self.surface.set_modal_visible(id, true) {
            debug!(modal = id, "No modal to show");
            return false;
        }

        {
            let mut open = self.open.borrow_mut();
            if !open.iter().any(|m| m == id) {
                open.push(id.to_string());
            }
        }
        self.surface.set_body_overflow(Overflow::Hidden);
        true
    }

    /// Hide a modal and restore body scrolling. Unknown ids are ignored.
    pub fn close(&self, id: &str) -> bool {
        if !self.surface.set_modal_visible(id, false) {
            debug!(modal = id, "No modal to close");
            return false;
        }

        self.open.borrow_mut().retain(|m| m != id);
        self.surface.set_body_overflow(Overflow::Auto);
        true
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.borrow().iter().any(|m| m == id)
    }

    /// The earliest opened modal that is still showing
    pub fn open_modal(&self) -> Option<String> {
        self.open.borrow().first().cloned()
    }
}
