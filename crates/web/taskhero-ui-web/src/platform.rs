//! Browser implementations of storage, timers and the calendar

use chrono::NaiveDate;
use gloo_timers::callback::Timeout;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use taskhero_ui_core::clock::Clock;
use taskhero_ui_core::scheduler::Task;
use taskhero_ui_core::storage::{KeyValueStore, MemoryStore};
use taskhero_ui_core::{Scheduler, TimerHandle, UiError, UiResult};
use tracing::{debug, warn};
use web_sys::Storage;

/// `localStorage`, or an in-memory map when the browser refuses access
pub struct LocalStorageStore {
    storage: Option<Storage>,
    fallback: MemoryStore,
}

impl LocalStorageStore {
    pub fn open() -> Self {
        let storage = match gloo_utils::window().local_storage() {
            Ok(Some(storage)) => Some(storage),
            Ok(None) => {
                warn!("localStorage unavailable, theme will not persist");
                None
            }
            Err(e) => {
                warn!("localStorage blocked: {:?}", e);
                None
            }
        };
        Self {
            storage,
            fallback: MemoryStore::new(),
        }
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        match &self.storage {
            Some(storage) => storage.get_item(key).ok().flatten(),
            None => self.fallback.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> UiResult<()> {
        match &self.storage {
            Some(storage) => storage
                .set_item(key, value)
                .map_err(|e| UiError::storage(format!("{e:?}"))),
            None => self.fallback.set(key, value),
        }
    }
}

/// Timers on the browser event loop
#[derive(Default)]
pub struct TimeoutScheduler {
    next_id: Cell<u64>,
    pending: Rc<RefCell<HashMap<u64, Timeout>>>,
}

impl TimeoutScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timers scheduled and not yet fired or cancelled
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let pending = Rc::downgrade(&self.pending);
        let timeout = Timeout::new(millis, move || {
            let fired = pending
                .upgrade()
                .and_then(|pending| pending.borrow_mut().remove(&id));
            task();
            drop(fired);
        });
        self.pending.borrow_mut().insert(id, timeout);

        TimerHandle::new(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        let timeout = self.pending.borrow_mut().remove(&handle.raw());
        if let Some(timeout) = timeout {
            debug!(timer = handle.raw(), "Timer cancelled");
            timeout.cancel();
        }
    }
}

/// Local calendar date from `Date`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn today(&self) -> NaiveDate {
        let now = js_sys::Date::new_0();
        NaiveDate::from_ymd_opt(
            now.get_full_year() as i32,
            now.get_month() + 1,
            now.get_date(),
        )
        .unwrap_or_default()
    }
}
