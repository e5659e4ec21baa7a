//! Cancellable timers
//!
//! Every delayed UI effect (toast dismissal, banner hide, loading reset) is
//! scheduled through [`Scheduler`] and owned through the returned
//! [`TimerHandle`], so the owner can cancel it when the element it targets
//! goes away early.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::time::Duration;

/// Handle to a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// A unit of deferred work
pub type Task = Box<dyn FnOnce()>;

/// Runs tasks after a delay on the UI thread
pub trait Scheduler {
    /// Schedule `task` to run once after `delay`
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle;

    /// Cancel a scheduled task. Unknown or already fired handles are ignored.
    fn cancel(&self, handle: TimerHandle);
}

struct Pending {
    handle: TimerHandle,
    due: Duration,
    task: Task,
}

/// Scheduler driven by a virtual clock
///
/// Nothing runs until [`ManualScheduler::advance`] moves the clock forward.
/// Tasks fire in due order, ties broken by scheduling order, and tasks
/// scheduled by a running task fire in the same `advance` call when they fall
/// inside the window.
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    pending: RefCell<Vec<Pending>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Number of tasks that have neither fired nor been cancelled
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Move the clock forward, running every task that falls due
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;

        loop {
            let next = {
                let mut pending = self.pending.borrow_mut();
                let index = pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= target)
                    .min_by_key(|(_, p)| (p.due, p.handle))
                    .map(|(i, _)| i);
                index.map(|i| pending.remove(i))
            };

            match next {
                Some(p) => {
                    self.now.set(p.due);
                    (p.task)();
                }
                None => break,
            }
        }

        self.now.set(target);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let handle = TimerHandle(self.next_id.get());
        self.next_id.set(handle.0 + 1);
        self.pending.borrow_mut().push(Pending {
            handle,
            due: self.now.get() + delay,
            task,
        });
        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        self.pending.borrow_mut().retain(|p| p.handle != handle);
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("now", &self.now.get())
            .field("pending", &self.pending())
            .finish()
    }
}
