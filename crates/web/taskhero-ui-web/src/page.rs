//! The rendered document behind every controller surface

use crate::dom::{ElementRegistry, by_id, js_error, query, query_all, set_class, set_style};
use gloo_events::EventListener;
use gloo_utils::{body, document, document_element, window};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use taskhero_ui_core::animation::AnimationSurface;
use taskhero_ui_core::connectivity::BannerSurface;
use taskhero_ui_core::form_enhancer::FieldSurface;
use taskhero_ui_core::modal::{ModalSurface, Overflow};
use taskhero_ui_core::navigation::NavSurface;
use taskhero_ui_core::notification::{CloseHandler, Notification, NotificationSurface};
use taskhero_ui_core::style::StyleHost;
use taskhero_ui_core::task_manager::{PriorityHighlight, TaskPage};
use taskhero_ui_core::theme::{IconState, IconStyle, Theme, ThemeSurface};
use taskhero_ui_core::{ElementKey, NotificationId, Priority, Severity, TaskId, UiResult};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlButtonElement, HtmlElement, HtmlInputElement, IntersectionObserver};

pub const THEME_TOGGLE_ID: &str = "theme-toggle";
pub const STATUS_BANNER_ID: &str = "statusMessage";
pub const HAMBURGER_SELECTOR: &str = ".hamburger";
pub const NAV_MENU_SELECTOR: &str = ".nav-menu";
pub const PRIORITY_OPTION_SELECTOR: &str = ".priority-option";
const FORM_GROUP_SELECTOR: &str = ".form-group";
const TOOLTIP_CLASS: &str = "tooltip";
const ACTIVE_CLASS: &str = "active";
const SHOW_CLASS: &str = "show";

const NOTIFICATION_STYLE: &str = "position: fixed; top: 20px; right: 20px; \
    background: var(--bg-primary); border: 1px solid var(--border-light); \
    border-radius: var(--radius-lg); padding: var(--spacing-md) var(--spacing-lg); \
    box-shadow: var(--shadow-lg); z-index: 3000; display: flex; align-items: center; \
    gap: var(--spacing-md); max-width: 400px; transform: translateX(100%); \
    transition: transform 0.3s ease-in-out; border-left-width: 4px;";

const TOOLTIP_STYLE: &str = "position: absolute; bottom: 100%; left: 50%; \
    transform: translateX(-50%); background: var(--bg-dark); color: white; \
    padding: 0.5rem 0.75rem; border-radius: 6px; font-size: 0.8rem; \
    white-space: nowrap; z-index: 1000; margin-bottom: 5px; pointer-events: none;";

const TOOLTIP_ARROW_STYLE: &str = "position: absolute; top: 100%; left: 50%; \
    transform: translateX(-50%); width: 0; height: 0; \
    border-left: 5px solid transparent; border-right: 5px solid transparent; \
    border-top: 5px solid var(--bg-dark);";

/// Selector of the card rendered for a task
pub fn task_card_selector(id: TaskId) -> String {
    format!(r#"[data-task-card="{id}"]"#)
}

struct Toast {
    element: Element,
    _close: EventListener,
}

type ReleaseHook = Box<dyn Fn(ElementKey)>;

/// Live document state the controllers act on
pub struct BrowserPage {
    registry: ElementRegistry,
    toasts: RefCell<HashMap<NotificationId, Toast>>,
    observer: RefCell<Option<IntersectionObserver>>,
    release_hook: RefCell<Option<ReleaseHook>>,
}

impl BrowserPage {
    pub fn new() -> Self {
        Self {
            registry: ElementRegistry::new(),
            toasts: RefCell::new(HashMap::new()),
            observer: RefCell::new(None),
            release_hook: RefCell::new(None),
        }
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    /// Observer used for scroll reveals
    pub fn set_observer(&self, observer: IntersectionObserver) {
        *self.observer.borrow_mut() = Some(observer);
    }

    /// Called with the key of every registered element removed from the page
    pub fn on_release(&self, hook: impl Fn(ElementKey) + 'static) {
        *self.release_hook.borrow_mut() = Some(Box::new(hook));
    }

    /// Forget a detached element
    fn release(&self, element: &Element) {
        let Some(key) = self.registry.release(element) else {
            return;
        };
        if let Some(observer) = self.observer.borrow().as_ref() {
            observer.unobserve(element);
        }
        if let Some(hook) = self.release_hook.borrow().as_ref() {
            hook(key);
        }
    }

    fn element(&self, key: ElementKey) -> Option<Element> {
        let element = self.registry.get(key);
        if element.is_none() {
            debug!(%key, "Unregistered element");
        }
        element
    }

    fn form_group(&self, field: ElementKey) -> Option<Element> {
        self.element(field)?
            .closest(FORM_GROUP_SELECTOR)
            .ok()
            .flatten()
    }

    fn build_toast(notification: &Notification) -> UiResult<(Element, Element)> {
        let doc = document();
        let severity = notification.severity;

        let container = doc.create_element("div").map_err(js_error)?;
        container.set_class_name(&format!("notification notification-{severity}"));
        container
            .set_attribute("style", NOTIFICATION_STYLE)
            .map_err(js_error)?;
        set_style(&container, "border-left-color", severity.color());

        let content = doc.create_element("div").map_err(js_error)?;
        content.set_class_name("notification-content");
        let icon = doc.create_element("i").map_err(js_error)?;
        icon.set_class_name(&format!("fas fa-{}", severity.icon()));
        let text = doc.create_element("span").map_err(js_error)?;
        text.set_text_content(Some(&notification.message));
        content.append_child(&icon).map_err(js_error)?;
        content.append_child(&text).map_err(js_error)?;

        let close = doc.create_element("button").map_err(js_error)?;
        close.set_class_name("notification-close");
        let close_icon = doc.create_element("i").map_err(js_error)?;
        close_icon.set_class_name("fas fa-times");
        close.append_child(&close_icon).map_err(js_error)?;

        container.append_child(&content).map_err(js_error)?;
        container.append_child(&close).map_err(js_error)?;
        body().append_child(&container).map_err(js_error)?;
        Ok((container, close))
    }

    fn build_tooltip(message: &str) -> UiResult<Element> {
        let doc = document();
        let tooltip = doc.create_element("div").map_err(js_error)?;
        tooltip.set_class_name(TOOLTIP_CLASS);
        tooltip.set_text_content(Some(message));
        tooltip
            .set_attribute("style", TOOLTIP_STYLE)
            .map_err(js_error)?;

        let arrow = doc.create_element("div").map_err(js_error)?;
        arrow
            .set_attribute("style", TOOLTIP_ARROW_STYLE)
            .map_err(js_error)?;
        tooltip.append_child(&arrow).map_err(js_error)?;
        Ok(tooltip)
    }

    fn set_toast_offset(&self, id: NotificationId, transform: &str) {
        if let Some(toast) = self.toasts.borrow().get(&id) {
            set_style(&toast.element, "transform", transform);
        }
    }
}

impl Default for BrowserPage {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleHost for BrowserPage {
    fn inject_style(&self, id: &str, css: &str) {
        if by_id(id).is_some() {
            return;
        }
        let doc = document();
        let (Some(head), Ok(style)) = (doc.head(), doc.create_element("style")) else {
            warn!(id, "Cannot inject stylesheet");
            return;
        };
        style.set_id(id);
        style.set_text_content(Some(css));
        let _ = head.append_child(&style);
    }
}

fn apply_icon(icon: Option<Element>, style: IconStyle) {
    if let Some(icon) = icon {
        set_style(&icon, "opacity", style.opacity);
        set_style(&icon, "transform", style.transform);
    }
}

impl ThemeSurface for BrowserPage {
    fn apply_theme(&self, theme: Theme) {
        let _ = document_element().set_attribute("data-theme", theme.as_str());
    }

    fn update_toggle_icon(&self, icons: IconState) {
        let Some(button) = by_id(THEME_TOGGLE_ID) else {
            return;
        };
        apply_icon(button.query_selector(".fa-moon").ok().flatten(), icons.moon);
        apply_icon(button.query_selector(".fa-sun").ok().flatten(), icons.sun);
    }
}

impl NavSurface for BrowserPage {
    fn set_active(&self, active: bool) {
        for selector in [HAMBURGER_SELECTOR, NAV_MENU_SELECTOR] {
            if let Some(element) = query(selector) {
                set_class(&element, ACTIVE_CLASS, active);
            }
        }
    }
}

impl ModalSurface for BrowserPage {
    fn set_modal_visible(&self, id: &str, visible: bool) -> bool {
        match by_id(id) {
            Some(modal) => {
                set_class(&modal, SHOW_CLASS, visible);
                set_style(&modal, "display", if visible { "flex" } else { "none" });
                true
            }
            None => false,
        }
    }

    fn set_body_overflow(&self, overflow: Overflow) {
        let _ = body().style().set_property("overflow", overflow.as_css());
    }
}

impl NotificationSurface for BrowserPage {
    fn mount(&self, notification: &Notification, on_close: CloseHandler) {
        let (element, close) = match Self::build_toast(notification) {
            Ok(parts) => parts,
            Err(e) => {
                warn!(id = %notification.id, "Failed to render notification: {}", e);
                return;
            }
        };
        let listener = EventListener::new(&close, "click", move |_| on_close());
        self.toasts.borrow_mut().insert(
            notification.id,
            Toast {
                element,
                _close: listener,
            },
        );
    }

    fn slide_in(&self, id: NotificationId) {
        self.set_toast_offset(id, "translateX(0)");
    }

    fn slide_out(&self, id: NotificationId) {
        self.set_toast_offset(id, "translateX(100%)");
    }

    fn unmount(&self, id: NotificationId) {
        let toast = self.toasts.borrow_mut().remove(&id);
        if let Some(toast) = toast {
            toast.element.remove();
        }
    }
}

impl TaskPage for BrowserPage {
    fn confirm(&self, message: &str) -> bool {
        window().confirm_with_message(message).unwrap_or(false)
    }

    fn navigate(&self, path: &str) {
        if let Err(e) = window().location().set_href(path) {
            warn!(path, "Navigation failed: {}", js_error(e));
        }
    }

    fn fade_out_card(&self, id: TaskId, duration: Duration) -> bool {
        let Some(card) = query(&task_card_selector(id)) else {
            return false;
        };
        set_style(
            &card,
            "transition",
            &format!("opacity {}ms ease", duration.as_millis()),
        );
        set_style(&card, "opacity", "0");
        true
    }

    fn remove_card(&self, id: TaskId) {
        if let Some(card) = query(&task_card_selector(id)) {
            card.remove();
            self.release(&card);
        }
    }

    fn mark_priority(&self, priority: Priority, highlight: PriorityHighlight, selected: bool) {
        let Ok(options) = query_all(PRIORITY_OPTION_SELECTOR) else {
            return;
        };
        for option in options {
            let Some(input) = option
                .query_selector("input")
                .ok()
                .flatten()
                .and_then(|input| input.dyn_into::<HtmlInputElement>().ok())
            else {
                continue;
            };
            if input.value() != priority.as_str() {
                continue;
            }
            input.set_checked(selected);
            if let Some(indicator) = option.query_selector(".priority-indicator").ok().flatten() {
                set_style(&indicator, "border-color", highlight.border_color);
                set_style(&indicator, "background-color", highlight.background_color);
            }
        }
    }
}

impl FieldSurface for BrowserPage {
    fn set_group_class(&self, field: ElementKey, class: &str, on: bool) {
        if let Some(group) = self.form_group(field) {
            set_class(&group, class, on);
        }
    }

    fn set_border_color(&self, field: ElementKey, color: &str) {
        if let Some(element) = self.element(field) {
            set_style(&element, "border-color", color);
        }
    }

    fn clear_border(&self, field: ElementKey) {
        if let Some(element) = self.element(field).and_then(|e| e.dyn_into::<HtmlElement>().ok()) {
            let _ = element.style().remove_property("border-color");
        }
    }

    fn show_tooltip(&self, field: ElementKey, message: &str, severity: Severity) {
        let Some(group) = self.form_group(field) else {
            return;
        };
        self.hide_tooltip(field);
        match Self::build_tooltip(message) {
            Ok(tooltip) => {
                let _ = tooltip.set_attribute("data-severity", severity.as_str());
                set_style(&group, "position", "relative");
                let _ = group.append_child(&tooltip);
            }
            Err(e) => warn!(%field, "Failed to render tooltip: {}", e),
        }
    }

    fn hide_tooltip(&self, field: ElementKey) {
        let tooltip = self
            .form_group(field)
            .and_then(|group| group.query_selector(&format!(".{TOOLTIP_CLASS}")).ok().flatten());
        if let Some(tooltip) = tooltip {
            tooltip.remove();
        }
    }
}

impl AnimationSurface for BrowserPage {
    fn add_class(&self, element: ElementKey, class: &str) {
        if let Some(element) = self.element(element) {
            set_class(&element, class, true);
        }
    }

    fn stop_observing(&self, element: ElementKey) {
        let observer = self.observer.borrow().clone();
        let (Some(observer), Some(element)) = (observer, self.element(element)) else {
            return;
        };
        observer.unobserve(&element);
    }

    fn set_transform(&self, element: ElementKey, transform: &str) {
        if let Some(element) = self.element(element) {
            set_style(&element, "transform", transform);
        }
    }

    fn button_html(&self, button: ElementKey) -> Option<String> {
        self.element(button).map(|b| b.inner_html())
    }

    fn set_button_html(&self, button: ElementKey, html: &str) {
        if let Some(button) = self.element(button) {
            button.set_inner_html(html);
        }
    }

    fn set_button_disabled(&self, button: ElementKey, disabled: bool) {
        if let Some(button) = self
            .element(button)
            .and_then(|b| b.dyn_into::<HtmlButtonElement>().ok())
        {
            button.set_disabled(disabled);
        }
    }
}

impl BannerSurface for BrowserPage {
    fn show_banner(&self, message: &str, color: &str) -> bool {
        let Some(banner) = by_id(STATUS_BANNER_ID) else {
            return false;
        };
        banner.set_text_content(Some(message));
        set_style(&banner, "background-color", color);
        set_style(&banner, "display", "block");
        true
    }

    fn hide_banner(&self) {
        if let Some(banner) = by_id(STATUS_BANNER_ID) {
            set_style(&banner, "display", "none");
        }
    }
}
