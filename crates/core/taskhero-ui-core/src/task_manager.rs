//! Task form submission, task dialogs and task list actions

use crate::clock::Clock;
use crate::config::UiConfig;
use crate::modal::{DELETE_MODAL, ModalController, STATUS_MODAL};
use crate::notification::{NotificationCenter, NotificationId, Severity};
use crate::scheduler::{Scheduler, TimerHandle};
use crate::task::{Priority, TaskBackend, TaskId, TaskStatus};
use crate::validation::{TaskForm, validate_task_form};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const PAST_DUE_CONFIRMATION: &str =
    "The selected due date is in the past. Are you sure you want to continue?";
pub const TASK_SAVED: &str = "Task saved successfully!";
pub const TASK_DELETED: &str = "Task deleted successfully!";
pub const STATUS_UPDATED: &str = "Task status updated successfully!";
pub const GOOGLE_SIGN_IN_PLACEHOLDER: &str =
    "Google Sign-In integration would be implemented here";

/// Whether a form submission may reach the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Proceed,
    Blocked,
}

/// Inline style of a priority option's indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityHighlight {
    pub border_color: &'static str,
    pub background_color: &'static str,
}

impl PriorityHighlight {
    pub const SELECTED: Self = Self {
        border_color: "var(--primary-color)",
        background_color: "rgba(102, 126, 234, 0.1)",
    };
    pub const UNSELECTED: Self = Self {
        border_color: "var(--border-light)",
        background_color: "transparent",
    };

    pub fn for_selection(selected: bool) -> Self {
        if selected {
            Self::SELECTED
        } else {
            Self::UNSELECTED
        }
    }
}

/// Page-level effects of task actions
pub trait TaskPage {
    /// Ask a blocking yes/no question
    fn confirm(&self, message: &str) -> bool;

    /// Navigate the browser to a server route
    fn navigate(&self, path: &str);

    /// Start fading out a task card. Returns `false` when the card is not on the page.
    fn fade_out_card(&self, id: TaskId, duration: Duration) -> bool;

    /// Detach a task card. Missing cards are ignored.
    fn remove_card(&self, id: TaskId);

    /// Check or uncheck a priority option and style its indicator
    fn mark_priority(&self, priority: Priority, highlight: PriorityHighlight, selected: bool);
}

/// Coordinates task forms, task dialogs and the notifications they raise
pub struct TaskManager {
    selected_task_id: Cell<Option<TaskId>>,
    requested_status: Cell<Option<TaskStatus>>,
    selected_priority: Cell<Option<Priority>>,
    modals: ModalController,
    notifications: NotificationCenter,
    backend: Rc<dyn TaskBackend>,
    page: Rc<dyn TaskPage>,
    clock: Rc<dyn Clock>,
    scheduler: Rc<dyn Scheduler>,
    card_removals: Rc<RefCell<HashMap<TaskId, TimerHandle>>>,
    min_title_len: usize,
    card_fade: Duration,
}

impl TaskManager {
    pub fn new(
        config: &UiConfig,
        modals: ModalController,
        notifications: NotificationCenter,
        backend: Rc<dyn TaskBackend>,
        page: Rc<dyn TaskPage>,
        clock: Rc<dyn Clock>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        Self {
            selected_task_id: Cell::new(None),
            requested_status: Cell::new(None),
            selected_priority: Cell::new(None),
            modals,
            notifications,
            backend,
            page,
            clock,
            scheduler,
            card_removals: Rc::new(RefCell::new(HashMap::new())),
            min_title_len: config.min_title_len,
            card_fade: config.card_fade,
        }
    }

    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.selected_task_id.get()
    }

    /// Status requested through the status dialog currently open, if any
    pub fn requested_status(&self) -> Option<TaskStatus> {
        self.requested_status.get()
    }

    pub fn selected_priority(&self) -> Option<Priority> {
        self.selected_priority.get()
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// Check a task form before it is sent to the server
    pub fn handle_task_submit(&self, form: &TaskForm) -> SubmitOutcome {
        let valid = match validate_task_form(form, self.clock.today(), self.min_title_len) {
            Ok(valid) => valid,
            Err(errors) => {
                debug!(errors = errors.len(), "Blocking task form submission");
                for error in errors {
                    self.notifications.show(error.to_string(), Severity::Error);
                }
                return SubmitOutcome::Blocked;
            }
        };

        if valid.due_in_past && !self.page.confirm(PAST_DUE_CONFIRMATION) {
            debug!(due_date = %valid.due_date, "Past due date declined");
            return SubmitOutcome::Blocked;
        }

        self.notifications.show(TASK_SAVED, Severity::Success);
        SubmitOutcome::Proceed
    }

    pub fn show_modal(&self, id: &str) -> bool {
        self.modals.show(id)
    }

    /// Close a modal. Closing a task dialog by any path drops the pending selection.
    pub fn close_modal(&self, id: &str) -> bool {
        let closed = self.modals.close(id);
        if id == DELETE_MODAL || id == STATUS_MODAL {
            self.clear_selection();
        }
        closed
    }

    pub fn is_modal_open(&self, id: &str) -> bool {
        self.modals.is_open(id)
    }

    pub fn open_modal(&self) -> Option<String> {
        self.modals.open_modal()
    }

    pub fn show_notification(
        &self,
        message: impl Into<String>,
        severity: Severity,
    ) -> NotificationId {
        self.notifications.show(message, severity)
    }

    pub fn dismiss_notification(&self, id: NotificationId) {
        self.notifications.dismiss(id);
    }

    /// Priority option click
    pub fn select_priority(&self, priority: Priority) {
        self.selected_priority.set(Some(priority));
        for option in Priority::ALL {
            let selected = option == priority;
            self.page
                .mark_priority(option, PriorityHighlight::for_selection(selected), selected);
        }
    }

    pub fn view_task(&self, id: TaskId) {
        self.page.navigate(&id.detail_path());
    }

    pub fn edit_task(&self, id: TaskId) {
        self.page.navigate(&id.edit_path());
    }

    pub fn confirm_delete(&self, id: TaskId) {
        self.selected_task_id.set(Some(id));
        self.show_modal(DELETE_MODAL);
    }

    pub fn close_delete_modal(&self) {
        self.close_modal(DELETE_MODAL);
    }

    /// Delete the selected task. Without a selection this does nothing.
    pub fn delete_task(&self) {
        let Some(id) = self.selected_task_id.get() else {
            debug!("No task selected for deletion");
            return;
        };

        match self.backend.delete_task(id) {
            Ok(()) => {
                info!(task_id = %id, "Task deleted");
                self.notifications.show(TASK_DELETED, Severity::Success);
                self.close_modal(DELETE_MODAL);
                self.remove_card(id);
            }
            Err(e) => {
                warn!(task_id = %id, "Failed to delete task: {}", e);
                self.notifications
                    .show(format!("Could not delete task: {e}"), Severity::Error);
                self.close_modal(DELETE_MODAL);
            }
        }

        self.clear_selection();
    }

    pub fn mark_as_progress(&self, id: TaskId) {
        self.request_status(id, TaskStatus::InProgress);
    }

    pub fn mark_as_completed(&self, id: TaskId) {
        self.request_status(id, TaskStatus::Completed);
    }

    pub fn close_status_modal(&self) {
        self.close_modal(STATUS_MODAL);
    }

    /// Apply the status change requested for the selected task
    pub fn update_status(&self) {
        let (Some(id), Some(status)) = (self.selected_task_id.get(), self.requested_status.get())
        else {
            debug!("No task selected for status update");
            return;
        };

        match self.backend.update_status(id, status) {
            Ok(()) => {
                info!(task_id = %id, status = status.as_str(), "Task status updated");
                self.notifications.show(STATUS_UPDATED, Severity::Success);
            }
            Err(e) => {
                warn!(task_id = %id, "Failed to update task status: {}", e);
                self.notifications
                    .show(format!("Could not update task status: {e}"), Severity::Error);
            }
        }

        self.close_modal(STATUS_MODAL);
        self.clear_selection();
    }

    pub fn sign_in_with_google(&self) {
        info!("Google Sign-In clicked");
        self.notifications
            .show(GOOGLE_SIGN_IN_PLACEHOLDER, Severity::Info);
    }

    fn request_status(&self, id: TaskId, status: TaskStatus) {
        self.selected_task_id.set(Some(id));
        self.requested_status.set(Some(status));
        self.show_modal(STATUS_MODAL);
    }

    fn clear_selection(&self) {
        self.selected_task_id.set(None);
        self.requested_status.set(None);
    }

    fn remove_card(&self, id: TaskId) {
        if !self.page.fade_out_card(id, self.card_fade) {
            debug!(task_id = %id, "No card to remove");
            return;
        }

        let page = Rc::clone(&self.page);
        let removals = Rc::downgrade(&self.card_removals);
        let handle = self.scheduler.schedule(
            self.card_fade,
            Box::new(move || {
                if let Some(removals) = removals.upgrade() {
                    removals.borrow_mut().remove(&id);
                }
                page.remove_card(id);
            }),
        );

        if let Some(previous) = self.card_removals.borrow_mut().insert(id, handle) {
            self.scheduler.cancel(previous);
        }
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        for (_, handle) in self.card_removals.borrow_mut().drain() {
            self.scheduler.cancel(handle);
        }
    }
}
