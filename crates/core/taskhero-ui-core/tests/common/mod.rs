//! Shared fake page for integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::time::Duration;
use taskhero_ui_core::animation::AnimationSurface;
use taskhero_ui_core::clock::FixedClock;
use taskhero_ui_core::connectivity::BannerSurface;
use taskhero_ui_core::form_enhancer::FieldSurface;
use taskhero_ui_core::modal::{DELETE_MODAL, ModalSurface, Overflow, STATUS_MODAL};
use taskhero_ui_core::navigation::NavSurface;
use taskhero_ui_core::notification::{CloseHandler, Notification, NotificationSurface};
use taskhero_ui_core::storage::MemoryStore;
use taskhero_ui_core::style::StyleHost;
use taskhero_ui_core::task_manager::{PriorityHighlight, TaskPage};
use taskhero_ui_core::theme::{IconState, Theme, ThemeSurface};
use taskhero_ui_core::{
    App, ElementKey, ManualScheduler, NotificationId, Ports, Priority, Severity, TaskBackend,
    TaskId, TaskStatus, UiConfig, UiError, UiResult,
};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}

/// In-memory stand-in for the rendered page
pub struct FakePage {
    pub theme_attr: Cell<Option<Theme>>,
    pub icons: RefCell<Option<IconState>>,
    pub nav_active: Cell<bool>,
    pub styles: RefCell<Vec<String>>,
    pub modals: RefCell<HashMap<String, bool>>,
    pub body_overflow: Cell<Overflow>,
    pub toasts: RefCell<HashMap<NotificationId, (Notification, bool)>>,
    pub toast_log: RefCell<Vec<Notification>>,
    pub close_buttons: RefCell<HashMap<NotificationId, CloseHandler>>,
    pub confirm_answer: Cell<bool>,
    pub confirm_prompts: RefCell<Vec<String>>,
    pub navigations: RefCell<Vec<String>>,
    pub cards: RefCell<HashMap<TaskId, f32>>,
    pub priorities: RefCell<HashMap<Priority, (bool, PriorityHighlight)>>,
    pub group_classes: RefCell<HashSet<(ElementKey, String)>>,
    pub borders: RefCell<HashMap<ElementKey, String>>,
    pub tooltips: RefCell<HashMap<ElementKey, String>>,
    pub element_classes: RefCell<Vec<(ElementKey, String)>>,
    pub transforms: RefCell<HashMap<ElementKey, String>>,
    pub button_html: RefCell<HashMap<ElementKey, String>>,
    pub banner: RefCell<Option<(String, String)>>,
}

impl FakePage {
    pub fn new() -> Rc<Self> {
        let modals = [DELETE_MODAL, STATUS_MODAL]
            .into_iter()
            .map(|id| (id.to_string(), false))
            .collect();

        Rc::new(Self {
            theme_attr: Cell::new(None),
            icons: RefCell::new(None),
            nav_active: Cell::new(false),
            styles: RefCell::new(Vec::new()),
            modals: RefCell::new(modals),
            body_overflow: Cell::new(Overflow::Auto),
            toasts: RefCell::new(HashMap::new()),
            toast_log: RefCell::new(Vec::new()),
            close_buttons: RefCell::new(HashMap::new()),
            confirm_answer: Cell::new(true),
            confirm_prompts: RefCell::new(Vec::new()),
            navigations: RefCell::new(Vec::new()),
            cards: RefCell::new(HashMap::new()),
            priorities: RefCell::new(HashMap::new()),
            group_classes: RefCell::new(HashSet::new()),
            borders: RefCell::new(HashMap::new()),
            tooltips: RefCell::new(HashMap::new()),
            element_classes: RefCell::new(Vec::new()),
            transforms: RefCell::new(HashMap::new()),
            button_html: RefCell::new(HashMap::new()),
            banner: RefCell::new(None),
        })
    }

    pub fn add_card(&self, id: TaskId) {
        self.cards.borrow_mut().insert(id, 1.0);
    }

    pub fn modal_visible(&self, id: &str) -> bool {
        self.modals.borrow().get(id).copied().unwrap_or(false)
    }

    /// Messages of notifications currently attached, any order
    pub fn toast_messages(&self) -> Vec<String> {
        self.toasts
            .borrow()
            .values()
            .map(|(n, _)| n.message.clone())
            .collect()
    }

    pub fn toasts_with(&self, severity: Severity) -> usize {
        self.toast_log
            .borrow()
            .iter()
            .filter(|n| n.severity == severity)
            .count()
    }

    pub fn click_close(&self, id: NotificationId) {
        let handler = self.close_buttons.borrow_mut().remove(&id);
        if let Some(handler) = handler {
            handler();
        }
    }
}

impl StyleHost for FakePage {
    fn inject_style(&self, id: &str, _css: &str) {
        let mut styles = self.styles.borrow_mut();
        if !styles.iter().any(|s| s == id) {
            styles.push(id.to_string());
        }
    }
}

impl ThemeSurface for FakePage {
    fn apply_theme(&self, theme: Theme) {
        self.theme_attr.set(Some(theme));
    }

    fn update_toggle_icon(&self, icons: IconState) {
        *self.icons.borrow_mut() = Some(icons);
    }
}

impl NavSurface for FakePage {
    fn set_active(&self, active: bool) {
        self.nav_active.set(active);
    }
}

impl ModalSurface for FakePage {
    fn set_modal_visible(&self, id: &str, visible: bool) -> bool {
        match self.modals.borrow_mut().get_mut(id) {
            Some(state) => {
                *state = visible;
                true
            }
            None => false,
        }
    }

    fn set_body_overflow(&self, overflow: Overflow) {
        self.body_overflow.set(overflow);
    }
}

impl NotificationSurface for FakePage {
    fn mount(&self, notification: &Notification, on_close: CloseHandler) {
        self.toast_log.borrow_mut().push(notification.clone());
        self.toasts
            .borrow_mut()
            .insert(notification.id, (notification.clone(), false));
        self.close_buttons
            .borrow_mut()
            .insert(notification.id, on_close);
    }

    fn slide_in(&self, id: NotificationId) {
        if let Some((_, shown)) = self.toasts.borrow_mut().get_mut(&id) {
            *shown = true;
        }
    }

    fn slide_out(&self, id: NotificationId) {
        if let Some((_, shown)) = self.toasts.borrow_mut().get_mut(&id) {
            *shown = false;
        }
    }

    fn unmount(&self, id: NotificationId) {
        self.toasts.borrow_mut().remove(&id);
        self.close_buttons.borrow_mut().remove(&id);
    }
}

impl TaskPage for FakePage {
    fn confirm(&self, message: &str) -> bool {
        self.confirm_prompts.borrow_mut().push(message.to_string());
        self.confirm_answer.get()
    }

    fn navigate(&self, path: &str) {
        self.navigations.borrow_mut().push(path.to_string());
    }

    fn fade_out_card(&self, id: TaskId, _duration: Duration) -> bool {
        match self.cards.borrow_mut().get_mut(&id) {
            Some(opacity) => {
                *opacity = 0.0;
                true
            }
            None => false,
        }
    }

    fn remove_card(&self, id: TaskId) {
        self.cards.borrow_mut().remove(&id);
    }

    fn mark_priority(&self, priority: Priority, highlight: PriorityHighlight, selected: bool) {
        self.priorities
            .borrow_mut()
            .insert(priority, (selected, highlight));
    }
}

impl FieldSurface for FakePage {
    fn set_group_class(&self, field: ElementKey, class: &str, on: bool) {
        let entry = (field, class.to_string());
        if on {
            self.group_classes.borrow_mut().insert(entry);
        } else {
            self.group_classes.borrow_mut().remove(&entry);
        }
    }

    fn set_border_color(&self, field: ElementKey, color: &str) {
        self.borders.borrow_mut().insert(field, color.to_string());
    }

    fn clear_border(&self, field: ElementKey) {
        self.borders.borrow_mut().remove(&field);
    }

    fn show_tooltip(&self, field: ElementKey, message: &str, _severity: Severity) {
        self.tooltips
            .borrow_mut()
            .insert(field, message.to_string());
    }

    fn hide_tooltip(&self, field: ElementKey) {
        self.tooltips.borrow_mut().remove(&field);
    }
}

impl AnimationSurface for FakePage {
    fn add_class(&self, element: ElementKey, class: &str) {
        self.element_classes
            .borrow_mut()
            .push((element, class.to_string()));
    }

    fn stop_observing(&self, _element: ElementKey) {}

    fn set_transform(&self, element: ElementKey, transform: &str) {
        self.transforms
            .borrow_mut()
            .insert(element, transform.to_string());
    }

    fn button_html(&self, button: ElementKey) -> Option<String> {
        self.button_html.borrow().get(&button).cloned()
    }

    fn set_button_html(&self, button: ElementKey, html: &str) {
        self.button_html
            .borrow_mut()
            .insert(button, html.to_string());
    }

    fn set_button_disabled(&self, _button: ElementKey, _disabled: bool) {}
}

impl BannerSurface for FakePage {
    fn show_banner(&self, message: &str, color: &str) -> bool {
        *self.banner.borrow_mut() = Some((message.to_string(), color.to_string()));
        true
    }

    fn hide_banner(&self) {
        *self.banner.borrow_mut() = None;
    }
}

/// Backend that records calls and can be told to fail
#[derive(Default)]
pub struct RecordingBackend {
    pub deleted: RefCell<Vec<TaskId>>,
    pub updated: RefCell<Vec<(TaskId, TaskStatus)>>,
    pub fail: Cell<bool>,
}

impl TaskBackend for RecordingBackend {
    fn delete_task(&self, id: TaskId) -> UiResult<()> {
        if self.fail.get() {
            return Err(UiError::backend("task API unavailable"));
        }
        self.deleted.borrow_mut().push(id);
        Ok(())
    }

    fn update_status(&self, id: TaskId, status: TaskStatus) -> UiResult<()> {
        if self.fail.get() {
            return Err(UiError::backend("task API unavailable"));
        }
        self.updated.borrow_mut().push((id, status));
        Ok(())
    }
}

pub struct Harness {
    pub app: App,
    pub page: Rc<FakePage>,
    pub backend: Rc<RecordingBackend>,
    pub scheduler: Rc<ManualScheduler>,
    pub store: Rc<MemoryStore>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    pub fn with_store(store: MemoryStore) -> Self {
        init_tracing();
        let page = FakePage::new();
        let backend = Rc::new(RecordingBackend::default());
        let scheduler = Rc::new(ManualScheduler::new());
        let store = Rc::new(store);

        let ports = Ports {
            store: store.clone(),
            scheduler: scheduler.clone(),
            clock: Rc::new(FixedClock(today())),
            styles: page.clone(),
            theme: page.clone(),
            navigation: page.clone(),
            modals: page.clone(),
            notifications: page.clone(),
            page: page.clone(),
            backend: backend.clone(),
            fields: page.clone(),
            animation: page.clone(),
            banner: page.clone(),
        };
        let app = App::new(&UiConfig::default(), ports);

        Self {
            app,
            page,
            backend,
            scheduler,
            store,
        }
    }

    pub fn advance(&self, by: Duration) {
        self.scheduler.advance(by);
    }
}
