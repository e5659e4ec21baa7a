//! Transient toast notifications
//!
//! A notification is mounted off-screen, slides in after a short delay and
//! dismisses itself when its lifetime runs out. Dismissal (automatic or via
//! the close button) slides it out and detaches it once the exit animation
//! is over. All timers belonging to a notification are cancelled as soon as
//! it starts leaving, so a late timer never touches a detached element.

use crate::config::UiConfig;
use crate::scheduler::{Scheduler, TimerHandle};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;
use tracing::debug;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// Font Awesome icon name, without the `fa-` prefix
    pub fn icon(self) -> &'static str {
        match self {
            Severity::Success => "check-circle",
            Severity::Error => "exclamation-circle",
            Severity::Warning => "exclamation-triangle",
            Severity::Info => "info-circle",
        }
    }

    /// Accent color as a CSS custom property reference
    pub fn color(self) -> &'static str {
        match self {
            Severity::Success => "var(--success-color)",
            Severity::Error => "var(--error-color)",
            Severity::Warning => "var(--warning-color)",
            Severity::Info => "var(--info-color)",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl NotificationId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notification-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
}

/// Callback wired to a notification's close button
pub type CloseHandler = Box<dyn Fn()>;

/// Renders notifications
pub trait NotificationSurface {
    /// Attach the notification off-screen and wire its close button to `on_close`
    fn mount(&self, notification: &Notification, on_close: CloseHandler);
    fn slide_in(&self, id: NotificationId);
    fn slide_out(&self, id: NotificationId);
    /// Detach the element. Unknown ids are ignored.
    fn unmount(&self, id: NotificationId);
}

#[derive(Debug, Clone, Copy)]
struct Timings {
    enter_delay: Duration,
    lifetime: Duration,
    exit: Duration,
}

#[derive(Debug)]
struct Live {
    notification: Notification,
    timers: Vec<TimerHandle>,
    leaving: bool,
}

struct Inner {
    surface: Rc<dyn NotificationSurface>,
    scheduler: Rc<dyn Scheduler>,
    timings: Timings,
    next_id: Cell<u64>,
    live: RefCell<HashMap<NotificationId, Live>>,
}

/// Shows and dismisses notifications
#[derive(Clone)]
pub struct NotificationCenter {
    inner: Rc<Inner>,
}

impl NotificationCenter {
    pub fn new(
        config: &UiConfig,
        surface: Rc<dyn NotificationSurface>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                surface,
                scheduler,
                timings: Timings {
                    enter_delay: config.notification_enter_delay,
                    lifetime: config.notification_lifetime,
                    exit: config.notification_exit,
                },
                next_id: Cell::new(1),
                live: RefCell::new(HashMap::new()),
            }),
        }
    }

    pub fn show(&self, message: impl Into<String>, severity: Severity) -> NotificationId {
        let inner = &self.inner;
        let id = NotificationId(inner.next_id.get());
        inner.next_id.set(id.0 + 1);

        let notification = Notification {
            id,
            message: message.into(),
            severity,
        };
        debug!(%id, %severity, message = %notification.message, "Showing notification");

        let weak = Rc::downgrade(inner);
        inner.surface.mount(
            &notification,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    Inner::dismiss(&inner, id);
                }
            }),
        );

        let weak = Rc::downgrade(inner);
        let enter = inner.scheduler.schedule(
            inner.timings.enter_delay,
            Box::new(move || Inner::with_live(&weak, |inner| inner.slide_in(id))),
        );

        let weak = Rc::downgrade(inner);
        let expire = inner.scheduler.schedule(
            inner.timings.lifetime,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    Inner::dismiss(&inner, id);
                }
            }),
        );

        inner.live.borrow_mut().insert(
            id,
            Live {
                notification,
                timers: vec![enter, expire],
                leaving: false,
            },
        );
        id
    }

    /// Start dismissing a notification. Ignored when it is already leaving or gone.
    pub fn dismiss(&self, id: NotificationId) {
        Inner::dismiss(&self.inner, id);
    }

    /// Whether the notification is still attached
    pub fn is_live(&self, id: NotificationId) -> bool {
        self.inner.live.borrow().contains_key(&id)
    }

    pub fn live_count(&self) -> usize {
        self.inner.live.borrow().len()
    }

    /// Snapshot of the notifications still attached, oldest first
    pub fn live(&self) -> Vec<Notification> {
        let mut live: Vec<Notification> = self
            .inner
            .live
            .borrow()
            .values()
            .map(|l| l.notification.clone())
            .collect();
        live.sort_by_key(|n| n.id);
        live
    }
}

impl Inner {
    fn with_live(weak: &Weak<Inner>, f: impl FnOnce(&Inner)) {
        if let Some(inner) = weak.upgrade() {
            f(&inner);
        }
    }

    fn slide_in(&self, id: NotificationId) {
        let entering = matches!(self.live.borrow().get(&id), Some(live) if !live.leaving);
        if entering {
            self.surface.slide_in(id);
        }
    }

    fn dismiss(inner: &Rc<Inner>, id: NotificationId) {
        let timers = {
            let mut live = inner.live.borrow_mut();
            match live.get_mut(&id) {
                Some(entry) if !entry.leaving => {
                    entry.leaving = true;
                    std::mem::take(&mut entry.timers)
                }
                _ => return,
            }
        };

        for timer in timers {
            inner.scheduler.cancel(timer);
        }
        inner.surface.slide_out(id);

        let weak = Rc::downgrade(inner);
        let removal = inner.scheduler.schedule(
            inner.timings.exit,
            Box::new(move || {
                Inner::with_live(&weak, |inner| {
                    if inner.live.borrow_mut().remove(&id).is_some() {
                        inner.surface.unmount(id);
                    }
                })
            }),
        );

        if let Some(entry) = inner.live.borrow_mut().get_mut(&id) {
            entry.timers.push(removal);
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        for live in self.live.get_mut().values() {
            for timer in &live.timers {
                self.scheduler.cancel(*timer);
            }
        }
    }
}

impl fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("live", &self.live_count())
            .field("timings", &self.inner.timings)
            .finish()
    }
}
