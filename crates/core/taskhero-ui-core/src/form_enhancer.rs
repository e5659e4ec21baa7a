//! Floating labels, due-date hints and email hints for form fields

use crate::clock::Clock;
use crate::config::UiConfig;
use crate::element::ElementKey;
use crate::notification::Severity;
use crate::scheduler::{Scheduler, TimerHandle};
use crate::utils::is_valid_email;
use crate::validation::{DATE_FORMAT, parse_date};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;

pub const FOCUSED_CLASS: &str = "focused";
pub const FILLED_CLASS: &str = "filled";
pub const WARNING_BORDER: &str = "var(--warning-color)";
pub const SUCCESS_BORDER: &str = "var(--success-color)";
pub const PAST_DATE_TOOLTIP: &str = "Due date is in the past";
pub const INVALID_EMAIL_TOOLTIP: &str = "Please enter a valid email address";

/// Kind of input a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Date,
    Email,
}

impl FieldKind {
    /// Classify an element from its `type` attribute
    pub fn from_input_type(input_type: Option<&str>) -> Self {
        match input_type.map(str::to_ascii_lowercase).as_deref() {
            Some("date") => FieldKind::Date,
            Some("email") => FieldKind::Email,
            _ => FieldKind::Text,
        }
    }
}

/// Outcome of a date field change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateCheck {
    Past,
    Current,
    /// Empty or unparseable value; the field is left alone
    Unreadable,
}

/// Form fields and their `.form-group` containers
pub trait FieldSurface {
    /// Add or remove a class on the field's form group
    fn set_group_class(&self, field: ElementKey, class: &str, on: bool);

    fn set_border_color(&self, field: ElementKey, color: &str);

    /// Drop any border color set on the field
    fn clear_border(&self, field: ElementKey);

    /// Show a tooltip above the field, replacing any existing one
    fn show_tooltip(&self, field: ElementKey, message: &str, severity: Severity);

    fn hide_tooltip(&self, field: ElementKey);
}

/// Adds presentation state to form inputs
pub struct FormEnhancer {
    surface: Rc<dyn FieldSurface>,
    scheduler: Rc<dyn Scheduler>,
    clock: Rc<dyn Clock>,
    tooltip_duration: Duration,
    kinds: RefCell<HashMap<ElementKey, FieldKind>>,
    tooltips: Rc<RefCell<HashMap<ElementKey, TimerHandle>>>,
}

impl FormEnhancer {
    pub fn new(
        config: &UiConfig,
        surface: Rc<dyn FieldSurface>,
        scheduler: Rc<dyn Scheduler>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            surface,
            scheduler,
            clock,
            tooltip_duration: config.tooltip_duration,
            kinds: RefCell::new(HashMap::new()),
            tooltips: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Start tracking a field; a pre-filled value marks its group `filled`
    pub fn register_field(&self, field: ElementKey, kind: FieldKind, initial_value: &str) {
        self.kinds.borrow_mut().insert(field, kind);
        if !initial_value.trim().is_empty() {
            self.surface.set_group_class(field, FILLED_CLASS, true);
        }
    }

    pub fn kind(&self, field: ElementKey) -> FieldKind {
        self.kinds.borrow().get(&field).copied().unwrap_or_default()
    }

    /// Earliest selectable due date, formatted for the `min` attribute
    pub fn min_date(&self) -> String {
        self.clock.today().format(DATE_FORMAT).to_string()
    }

    pub fn on_focus(&self, field: ElementKey) {
        self.surface.set_group_class(field, FOCUSED_CLASS, true);
    }

    pub fn on_blur(&self, field: ElementKey, value: &str) {
        self.surface.set_group_class(field, FOCUSED_CLASS, false);
        let filled = !value.trim().is_empty();
        self.surface.set_group_class(field, FILLED_CLASS, filled);

        if self.kind(field) == FieldKind::Email {
            if !filled {
                self.surface.clear_border(field);
                self.hide_tooltip(field);
            } else if is_valid_email(value.trim()) {
                self.surface.set_border_color(field, SUCCESS_BORDER);
                self.hide_tooltip(field);
            } else {
                self.surface.set_border_color(field, WARNING_BORDER);
                self.show_tooltip(field, INVALID_EMAIL_TOOLTIP, Severity::Warning);
            }
        }
    }

    pub fn on_date_change(&self, field: ElementKey, value: &str) -> DateCheck {
        let date = match parse_date(value) {
            Ok(date) => date,
            Err(e) => {
                debug!(%field, "Ignoring date change: {}", e);
                self.hide_tooltip(field);
                return DateCheck::Unreadable;
            }
        };

        if date < self.clock.today() {
            self.surface.set_border_color(field, WARNING_BORDER);
            self.show_tooltip(field, PAST_DATE_TOOLTIP, Severity::Warning);
            DateCheck::Past
        } else {
            self.surface.set_border_color(field, SUCCESS_BORDER);
            self.hide_tooltip(field);
            DateCheck::Current
        }
    }

    pub fn has_tooltip(&self, field: ElementKey) -> bool {
        self.tooltips.borrow().contains_key(&field)
    }

    fn show_tooltip(&self, field: ElementKey, message: &str, severity: Severity) {
        self.hide_tooltip(field);
        self.surface.show_tooltip(field, message, severity);

        let surface = Rc::clone(&self.surface);
        let tooltips = Rc::downgrade(&self.tooltips);
        let handle = self.scheduler.schedule(
            self.tooltip_duration,
            Box::new(move || {
                if let Some(tooltips) = tooltips.upgrade() {
                    if tooltips.borrow_mut().remove(&field).is_some() {
                        surface.hide_tooltip(field);
                    }
                }
            }),
        );
        self.tooltips.borrow_mut().insert(field, handle);
    }

    fn hide_tooltip(&self, field: ElementKey) {
        let handle = self.tooltips.borrow_mut().remove(&field);
        if let Some(handle) = handle {
            self.scheduler.cancel(handle);
            self.surface.hide_tooltip(field);
        }
    }
}

impl Drop for FormEnhancer {
    fn drop(&mut self) {
        for (_, handle) in self.tooltips.borrow_mut().drain() {
            self.scheduler.cancel(handle);
        }
    }
}
