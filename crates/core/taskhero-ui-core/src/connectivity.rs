//! Online/offline status banner

use crate::config::UiConfig;
use crate::scheduler::{Scheduler, TimerHandle};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info};

/// Browser network state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

impl Connectivity {
    pub fn from_online(online: bool) -> Self {
        if online {
            Connectivity::Online
        } else {
            Connectivity::Offline
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Connectivity::Online => "You are back online!",
            Connectivity::Offline => "You are offline. Please check your internet connection.",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Connectivity::Online => "#4CAF50",
            Connectivity::Offline => "#f44336",
        }
    }
}

/// The status banner element
pub trait BannerSurface {
    /// Show the banner. Returns `false` when the page has no banner.
    fn show_banner(&self, message: &str, color: &str) -> bool;

    fn hide_banner(&self);
}

#[derive(Debug, Default)]
struct BannerState {
    visible: Cell<bool>,
    hide_timer: Cell<Option<TimerHandle>>,
}

/// Projects connectivity changes onto the banner
pub struct ConnectivityBanner {
    surface: Rc<dyn BannerSurface>,
    scheduler: Rc<dyn Scheduler>,
    duration: Duration,
    state: Rc<BannerState>,
    last: Cell<Option<Connectivity>>,
}

impl ConnectivityBanner {
    pub fn new(
        config: &UiConfig,
        surface: Rc<dyn BannerSurface>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        Self {
            surface,
            scheduler,
            duration: config.banner_duration,
            state: Rc::new(BannerState::default()),
            last: Cell::new(None),
        }
    }

    /// Show the banner for `status`, restarting the hide timer
    pub fn update(&self, status: Connectivity) {
        self.last.set(Some(status));
        info!(?status, "Connectivity changed");

        if !self.surface.show_banner(status.message(), status.color()) {
            debug!("No status banner on this page");
            return;
        }

        if let Some(previous) = self.state.hide_timer.take() {
            self.scheduler.cancel(previous);
        }
        self.state.visible.set(true);

        let surface = Rc::clone(&self.surface);
        let state = Rc::downgrade(&self.state);
        let handle = self.scheduler.schedule(
            self.duration,
            Box::new(move || {
                if let Some(state) = state.upgrade() {
                    state.visible.set(false);
                    state.hide_timer.set(None);
                    surface.hide_banner();
                }
            }),
        );
        self.state.hide_timer.set(Some(handle));
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible.get()
    }

    /// Last reported status
    pub fn status(&self) -> Option<Connectivity> {
        self.last.get()
    }
}

impl Drop for ConnectivityBanner {
    fn drop(&mut self) {
        if let Some(handle) = self.state.hide_timer.take() {
            self.scheduler.cancel(handle);
        }
    }
}
