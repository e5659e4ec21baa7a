//! Client-side task form checks
//!
//! These are typing aids only. The server validates every submission again.

use chrono::NaiveDate;
use thiserror::Error;

/// Wire format of `<input type="date">` values
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A failed field check; `Display` is the message shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Task title must be at least {min} characters long")]
    TitleTooShort { min: usize },

    #[error("Due date is required")]
    DueDateMissing,

    #[error("Due date is not a valid date")]
    DueDateInvalid(String),
}

/// Values read from a task form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: Option<String>,
    pub due_date: Option<String>,
}

impl TaskForm {
    pub fn new(title: impl Into<String>, due_date: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            due_date: Some(due_date.into()),
        }
    }
}

/// Fields that passed every check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidTaskForm {
    pub due_date: NaiveDate,
    /// The due date lies before `today` and needs the user's confirmation
    pub due_in_past: bool,
}

/// Parse a date input value
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::DueDateMissing);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| ValidationError::DueDateInvalid(raw.to_string()))
}

/// Check a task form, reporting every failing field
pub fn validate_task_form(
    form: &TaskForm,
    today: NaiveDate,
    min_title_len: usize,
) -> Result<ValidTaskForm, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let title_len = form
        .title
        .as_deref()
        .map(|t| t.trim().chars().count())
        .unwrap_or(0);
    if title_len < min_title_len {
        errors.push(ValidationError::TitleTooShort { min: min_title_len });
    }

    let due_date = match form.due_date.as_deref().map(parse_date) {
        Some(Ok(date)) => Some(date),
        Some(Err(e)) => {
            errors.push(e);
            None
        }
        None => {
            errors.push(ValidationError::DueDateMissing);
            None
        }
    };

    match due_date {
        Some(due_date) if errors.is_empty() => Ok(ValidTaskForm {
            due_date,
            due_in_past: due_date < today,
        }),
        _ => Err(errors),
    }
}
