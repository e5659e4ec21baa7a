//! Task form, task dialog and notification behavior through the app context

mod common;

use common::Harness;
use std::time::Duration;
use taskhero_ui_core::modal::{DELETE_MODAL, Overflow, STATUS_MODAL};
use taskhero_ui_core::task_manager::{
    PAST_DUE_CONFIRMATION, PriorityHighlight, STATUS_UPDATED, TASK_DELETED, TASK_SAVED,
};
use taskhero_ui_core::validation::TaskForm;
use taskhero_ui_core::{Command, Priority, Severity, SubmitOutcome, TaskId, TaskStatus};

#[test]
fn test_short_title_without_due_date_is_blocked() {
    let h = Harness::new();

    let outcome = h.app.tasks.handle_task_submit(&TaskForm::new("Hi", ""));

    assert_eq!(outcome, SubmitOutcome::Blocked);
    let messages = h.page.toast_messages();
    assert!(messages.contains(&"Due date is required".to_string()));
    assert!(messages.contains(&"Task title must be at least 3 characters long".to_string()));
    assert_eq!(h.page.toasts_with(Severity::Success), 0);
    assert!(
        h.page
            .toast_log
            .borrow()
            .iter()
            .all(|n| n.severity == Severity::Error)
    );
}

#[test]
fn test_short_title_is_blocked_for_any_due_date() {
    for due in ["2026-10-01", "2026-10-18", "2027-01-01"] {
        let h = Harness::new();
        let outcome = h.app.tasks.handle_task_submit(&TaskForm::new("  ab ", due));

        assert_eq!(outcome, SubmitOutcome::Blocked);
        assert_eq!(h.page.toasts_with(Severity::Error), 1);
        assert!(h.page.confirm_prompts.borrow().is_empty());
    }
}

#[test]
fn test_past_due_date_declined() {
    let h = Harness::new();
    h.page.confirm_answer.set(false);

    let outcome = h
        .app
        .tasks
        .handle_task_submit(&TaskForm::new("Buy milk", "2026-10-17"));

    assert_eq!(outcome, SubmitOutcome::Blocked);
    assert_eq!(*h.page.confirm_prompts.borrow(), vec![PAST_DUE_CONFIRMATION]);
    assert!(h.page.toast_log.borrow().is_empty());
}

#[test]
fn test_past_due_date_confirmed() {
    let h = Harness::new();
    h.page.confirm_answer.set(true);

    let outcome = h
        .app
        .tasks
        .handle_task_submit(&TaskForm::new("Buy milk", "2026-10-17"));

    assert_eq!(outcome, SubmitOutcome::Proceed);
    assert_eq!(h.page.toast_messages(), vec![TASK_SAVED.to_string()]);
}

#[test]
fn test_future_due_date_skips_confirmation() {
    let h = Harness::new();

    let outcome = h
        .app
        .tasks
        .handle_task_submit(&TaskForm::new("Buy milk", "2026-10-19"));

    assert_eq!(outcome, SubmitOutcome::Proceed);
    assert!(h.page.confirm_prompts.borrow().is_empty());
}

#[test]
fn test_modal_roundtrip_restores_scroll() {
    let h = Harness::new();
    assert_eq!(h.page.body_overflow.get(), Overflow::Auto);

    assert!(h.app.tasks.show_modal(DELETE_MODAL));
    assert_eq!(h.page.body_overflow.get(), Overflow::Hidden);
    assert!(h.page.modal_visible(DELETE_MODAL));

    assert!(h.app.tasks.close_modal(DELETE_MODAL));
    assert_eq!(h.page.body_overflow.get(), Overflow::Auto);
    assert!(!h.page.modal_visible(DELETE_MODAL));
}

#[test]
fn test_missing_modal_target_is_noop() {
    let h = Harness::new();
    assert!(!h.app.tasks.show_modal("settingsModal"));
    assert_eq!(h.page.body_overflow.get(), Overflow::Auto);
}

#[test]
fn test_notification_removed_within_lifetime_tolerance() {
    let h = Harness::new();
    let id = h.app.tasks.show_notification("Saved", Severity::Success);

    h.advance(Duration::from_millis(5_299));
    assert!(h.app.tasks.notifications().is_live(id));

    h.advance(Duration::from_millis(1));
    assert!(!h.app.tasks.notifications().is_live(id));
    assert!(h.page.toasts.borrow().is_empty());
}

#[test]
fn test_notification_close_button() {
    let h = Harness::new();
    let id = h.app.tasks.show_notification("Saved", Severity::Info);
    h.advance(Duration::from_millis(500));

    h.page.click_close(id);
    h.advance(Duration::from_millis(300));

    assert!(h.page.toasts.borrow().is_empty());
    assert_eq!(h.scheduler.pending(), 0);
}

#[test]
fn test_mark_as_completed_then_update_status() {
    let h = Harness::new();

    h.app.dispatch(Command::MarkAsCompleted(TaskId(42)));
    assert_eq!(h.app.tasks.selected_task_id(), Some(TaskId(42)));
    assert_eq!(h.app.tasks.requested_status(), Some(TaskStatus::Completed));
    assert!(h.page.modal_visible(STATUS_MODAL));

    h.app.dispatch(Command::UpdateStatus);

    assert_eq!(h.app.tasks.selected_task_id(), None);
    assert!(!h.page.modal_visible(STATUS_MODAL));
    assert_eq!(
        *h.backend.updated.borrow(),
        vec![(TaskId(42), TaskStatus::Completed)]
    );
    assert_eq!(h.page.toast_messages(), vec![STATUS_UPDATED.to_string()]);
}

#[test]
fn test_mark_as_progress_records_requested_status() {
    let h = Harness::new();

    h.app.dispatch(Command::MarkAsProgress(TaskId(5)));
    h.app.dispatch(Command::UpdateStatus);

    assert_eq!(
        *h.backend.updated.borrow(),
        vec![(TaskId(5), TaskStatus::InProgress)]
    );
}

#[test]
fn test_update_status_without_selection_does_nothing() {
    let h = Harness::new();
    h.app.dispatch(Command::UpdateStatus);

    assert!(h.backend.updated.borrow().is_empty());
    assert!(h.page.toast_log.borrow().is_empty());
}

#[test]
fn test_delete_flow_fades_and_removes_card() {
    let h = Harness::new();
    h.page.add_card(TaskId(7));

    h.app.dispatch(Command::ConfirmDelete(TaskId(7)));
    assert!(h.page.modal_visible(DELETE_MODAL));
    assert_eq!(h.app.tasks.selected_task_id(), Some(TaskId(7)));

    h.app.dispatch(Command::DeleteTask);
    assert_eq!(*h.backend.deleted.borrow(), vec![TaskId(7)]);
    assert_eq!(h.app.tasks.selected_task_id(), None);
    assert!(!h.page.modal_visible(DELETE_MODAL));
    assert_eq!(h.page.cards.borrow()[&TaskId(7)], 0.0);
    assert!(h.page.toast_messages().contains(&TASK_DELETED.to_string()));

    h.advance(Duration::from_millis(300));
    assert!(!h.page.cards.borrow().contains_key(&TaskId(7)));
}

#[test]
fn test_backend_failure_keeps_card() {
    let h = Harness::new();
    h.page.add_card(TaskId(7));
    h.backend.fail.set(true);

    h.app.dispatch(Command::ConfirmDelete(TaskId(7)));
    h.app.dispatch(Command::DeleteTask);

    assert_eq!(h.page.toasts_with(Severity::Error), 1);
    assert_eq!(h.page.toasts_with(Severity::Success), 0);
    assert_eq!(h.app.tasks.selected_task_id(), None);

    h.advance(Duration::from_secs(1));
    assert!(h.page.cards.borrow().contains_key(&TaskId(7)));
}

#[test]
fn test_cancelling_dialog_clears_selection() {
    let h = Harness::new();

    h.app.dispatch(Command::ConfirmDelete(TaskId(3)));
    h.app.dispatch(Command::CloseDeleteModal);
    assert_eq!(h.app.tasks.selected_task_id(), None);

    h.app.dispatch(Command::DeleteTask);
    assert!(h.backend.deleted.borrow().is_empty());
}

#[test]
fn test_view_and_edit_navigate() {
    let h = Harness::new();

    h.app.dispatch(Command::ViewTask(TaskId(12)));
    h.app.dispatch(Command::EditTask(TaskId(12)));

    assert_eq!(
        *h.page.navigations.borrow(),
        vec!["/tasks/12/".to_string(), "/tasks/12/edit/".to_string()]
    );
}

#[test]
fn test_priority_selection_highlights_one_option() {
    let h = Harness::new();

    h.app.tasks.select_priority(Priority::High);
    h.app.tasks.select_priority(Priority::Low);

    let priorities = h.page.priorities.borrow();
    assert_eq!(priorities[&Priority::Low], (true, PriorityHighlight::SELECTED));
    assert_eq!(priorities[&Priority::High], (false, PriorityHighlight::UNSELECTED));
    assert_eq!(priorities[&Priority::Medium], (false, PriorityHighlight::UNSELECTED));
    assert_eq!(h.app.tasks.selected_priority(), Some(Priority::Low));
}

#[test]
fn test_google_sign_in_placeholder() {
    let h = Harness::new();
    h.app.dispatch(Command::SignInWithGoogle);
    assert_eq!(h.page.toasts_with(Severity::Info), 1);
}
