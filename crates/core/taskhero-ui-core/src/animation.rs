//! Scroll reveal, hover lift and submit button loading states

use crate::config::UiConfig;
use crate::element::ElementKey;
use crate::scheduler::{Scheduler, TimerHandle};
use crate::style::{REVEAL_CSS, REVEAL_STYLE_ID, StyleHost};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;

/// Elements revealed on first scroll into view
pub const REVEAL_SELECTOR: &str = ".feature-card, .task-card, .stat-card";

/// Class added to a revealed element
pub const REVEAL_CLASS: &str = "animate-in";

pub const LOADING_HTML: &str = r#"<i class="fas fa-spinner fa-spin"></i> Loading..."#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverPhase {
    Enter,
    Leave,
}

impl HoverPhase {
    pub fn transform(self) -> &'static str {
        match self {
            HoverPhase::Enter => "translateY(-5px) scale(1.02)",
            HoverPhase::Leave => "translateY(0) scale(1)",
        }
    }
}

/// Animated elements
pub trait AnimationSurface {
    fn add_class(&self, element: ElementKey, class: &str);

    /// Stop reporting intersections for an element
    fn stop_observing(&self, element: ElementKey);

    fn set_transform(&self, element: ElementKey, transform: &str);

    fn button_html(&self, button: ElementKey) -> Option<String>;

    fn set_button_html(&self, button: ElementKey, html: &str);

    fn set_button_disabled(&self, button: ElementKey, disabled: bool);
}

#[derive(Debug)]
struct Loading {
    original_html: String,
    timer: TimerHandle,
}

/// Drives card and button micro-interactions
pub struct AnimationManager {
    surface: Rc<dyn AnimationSurface>,
    scheduler: Rc<dyn Scheduler>,
    loading_duration: Duration,
    revealed: RefCell<HashSet<ElementKey>>,
    loading: Rc<RefCell<HashMap<ElementKey, Loading>>>,
}

impl AnimationManager {
    /// Inject the reveal stylesheet
    pub fn new(
        config: &UiConfig,
        surface: Rc<dyn AnimationSurface>,
        scheduler: Rc<dyn Scheduler>,
        styles: &dyn StyleHost,
    ) -> Self {
        styles.inject_style(REVEAL_STYLE_ID, REVEAL_CSS);
        Self {
            surface,
            scheduler,
            loading_duration: config.loading_duration,
            revealed: RefCell::new(HashSet::new()),
            loading: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// An observed element entered the viewport.
    ///
    /// Returns `true` the first time only; the element is unobserved afterwards.
    pub fn reveal(&self, element: ElementKey) -> bool {
        if !self.revealed.borrow_mut().insert(element) {
            return false;
        }
        self.surface.add_class(element, REVEAL_CLASS);
        self.surface.stop_observing(element);
        true
    }

    pub fn is_revealed(&self, element: ElementKey) -> bool {
        self.revealed.borrow().contains(&element)
    }

    pub fn hover(&self, element: ElementKey, phase: HoverPhase) {
        self.surface.set_transform(element, phase.transform());
    }

    /// Put a submit button into its loading state.
    ///
    /// Returns `false` when the button is already loading.
    pub fn begin_loading(&self, button: ElementKey) -> bool {
        if self.is_loading(button) {
            debug!(%button, "Button already loading");
            return false;
        }

        let original_html = self.surface.button_html(button).unwrap_or_default();
        self.surface.set_button_html(button, LOADING_HTML);
        self.surface.set_button_disabled(button, true);

        let surface = Rc::clone(&self.surface);
        let loading = Rc::downgrade(&self.loading);
        let timer = self.scheduler.schedule(
            self.loading_duration,
            Box::new(move || {
                let Some(loading) = loading.upgrade() else {
                    return;
                };
                let entry = loading.borrow_mut().remove(&button);
                if let Some(entry) = entry {
                    surface.set_button_html(button, &entry.original_html);
                    surface.set_button_disabled(button, false);
                }
            }),
        );

        self.loading.borrow_mut().insert(
            button,
            Loading {
                original_html,
                timer,
            },
        );
        true
    }

    pub fn is_loading(&self, button: ElementKey) -> bool {
        self.loading.borrow().contains_key(&button)
    }

    /// Drop all state for an element that left the page
    pub fn forget(&self, element: ElementKey) {
        self.revealed.borrow_mut().remove(&element);
        let entry = self.loading.borrow_mut().remove(&element);
        if let Some(entry) = entry {
            self.scheduler.cancel(entry.timer);
        }
    }
}

impl Drop for AnimationManager {
    fn drop(&mut self) {
        for (_, entry) in self.loading.borrow_mut().drain() {
            self.scheduler.cancel(entry.timer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;

    #[derive(Default)]
    struct FakeCards {
        classes: RefCell<Vec<(ElementKey, String)>>,
        unobserved: RefCell<Vec<ElementKey>>,
        transforms: RefCell<HashMap<ElementKey, String>>,
        html: RefCell<HashMap<ElementKey, String>>,
        disabled: RefCell<HashSet<ElementKey>>,
        styles: RefCell<Vec<String>>,
    }

    impl AnimationSurface for FakeCards {
        fn add_class(&self, element: ElementKey, class: &str) {
            self.classes.borrow_mut().push((element, class.to_string()));
        }

        fn stop_observing(&self, element: ElementKey) {
            self.unobserved.borrow_mut().push(element);
        }

        fn set_transform(&self, element: ElementKey, transform: &str) {
            self.transforms
                .borrow_mut()
                .insert(element, transform.to_string());
        }

        fn button_html(&self, button: ElementKey) -> Option<String> {
            self.html.borrow().get(&button).cloned()
        }

        fn set_button_html(&self, button: ElementKey, html: &str) {
            self.html.borrow_mut().insert(button, html.to_string());
        }

        fn set_button_disabled(&self, button: ElementKey, disabled: bool) {
            if disabled {
                self.disabled.borrow_mut().insert(button);
            } else {
                self.disabled.borrow_mut().remove(&button);
            }
        }
    }

    impl StyleHost for FakeCards {
        fn inject_style(&self, id: &str, _css: &str) {
            self.styles.borrow_mut().push(id.to_string());
        }
    }

    fn manager() -> (AnimationManager, Rc<FakeCards>, Rc<ManualScheduler>) {
        let surface = Rc::new(FakeCards::default());
        let scheduler = Rc::new(ManualScheduler::new());
        let manager = AnimationManager::new(
            &UiConfig::default(),
            surface.clone(),
            scheduler.clone(),
            surface.as_ref(),
        );
        (manager, surface, scheduler)
    }

    #[test]
    fn test_reveal_is_one_shot() {
        let (manager, surface, _) = manager();
        let card = ElementKey(7);

        assert!(manager.reveal(card));
        assert!(!manager.reveal(card));
        assert!(manager.is_revealed(card));

        assert_eq!(
            *surface.classes.borrow(),
            vec![(card, REVEAL_CLASS.to_string())]
        );
        assert_eq!(*surface.unobserved.borrow(), vec![card]);
        assert_eq!(*surface.styles.borrow(), vec![REVEAL_STYLE_ID]);
    }

    #[test]
    fn test_hover_transforms() {
        let (manager, surface, _) = manager();
        let card = ElementKey(1);

        manager.hover(card, HoverPhase::Enter);
        assert_eq!(surface.transforms.borrow()[&card], "translateY(-5px) scale(1.02)");
        manager.hover(card, HoverPhase::Leave);
        assert_eq!(surface.transforms.borrow()[&card], "translateY(0) scale(1)");
    }

    #[test]
    fn test_loading_state_restores_after_two_seconds() {
        let (manager, surface, scheduler) = manager();
        let button = ElementKey(3);
        surface.set_button_html(button, "Save Task");

        assert!(manager.begin_loading(button));
        assert_eq!(surface.html.borrow()[&button], LOADING_HTML);
        assert!(surface.disabled.borrow().contains(&button));

        assert!(!manager.begin_loading(button));
        assert_eq!(scheduler.pending(), 1);

        scheduler.advance(Duration::from_secs(2));
        assert_eq!(surface.html.borrow()[&button], "Save Task");
        assert!(!surface.disabled.borrow().contains(&button));
        assert!(!manager.is_loading(button));
    }

    #[test]
    fn test_forget_drops_element_state() {
        let (manager, _, scheduler) = manager();
        let card = ElementKey(4);
        let button = ElementKey(5);

        manager.reveal(card);
        manager.begin_loading(button);
        manager.forget(card);
        manager.forget(button);

        assert!(!manager.is_revealed(card));
        assert!(!manager.is_loading(button));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_dropping_manager_cancels_pending_restores() {
        let (manager, _, scheduler) = manager();
        manager.begin_loading(ElementKey(3));
        drop(manager);
        assert_eq!(scheduler.pending(), 0);
    }
}
