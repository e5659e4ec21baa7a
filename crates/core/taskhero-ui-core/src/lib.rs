//! Platform-independent controllers for the TaskHero front end
//!
//! The page is server-rendered; this crate adds the interactive layer on top:
//!
//! - light/dark theme persistence ([`theme`])
//! - the mobile navigation menu ([`navigation`])
//! - task form checks, task dialogs and task list actions ([`task_manager`])
//! - toast notifications ([`notification`])
//! - floating labels and due-date hints ([`form_enhancer`])
//! - scroll reveal and button loading states ([`animation`])
//! - the online/offline banner ([`connectivity`])
//!
//! Controllers never touch the DOM or timers directly. Every effect goes
//! through a small surface trait and every delay through a [`Scheduler`],
//! so the whole layer runs under a virtual clock in tests and against
//! `web-sys` in the browser.
//!
//! # Examples
//!
//! ```rust
//! use std::time::Duration;
//! use taskhero_ui_core::scheduler::{ManualScheduler, Scheduler};
//!
//! let scheduler = ManualScheduler::new();
//! let handle = scheduler.schedule(Duration::from_secs(5), Box::new(|| {}));
//! scheduler.cancel(handle);
//! scheduler.advance(Duration::from_secs(10));
//! assert_eq!(scheduler.pending(), 0);
//! ```

pub mod animation;
pub mod app;
pub mod clock;
pub mod command;
pub mod config;
pub mod connectivity;
pub mod element;
pub mod error;
pub mod form_enhancer;
pub mod keyboard;
pub mod modal;
pub mod navigation;
pub mod notification;
pub mod scheduler;
pub mod storage;
pub mod style;
pub mod task;
pub mod task_manager;
pub mod theme;
pub mod utils;
pub mod validation;

pub use app::{App, Ports};
pub use command::{Command, CommandError};
pub use config::UiConfig;
pub use element::ElementKey;
pub use error::{UiError, UiResult};
pub use notification::{NotificationCenter, NotificationId, Severity};
pub use scheduler::{ManualScheduler, Scheduler, TimerHandle};
pub use task::{Priority, SimulatedBackend, TaskBackend, TaskId, TaskStatus};
pub use task_manager::{SubmitOutcome, TaskManager};
pub use theme::{Theme, ThemeManager};
