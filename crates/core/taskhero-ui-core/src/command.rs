//! Commands issued from page markup
//!
//! Elements opt in with `data-command="<name>"` and, where the command acts on
//! a task, `data-task-id="<id>"`. A single delegated click listener resolves
//! the nearest such element into a [`Command`] and hands it to
//! [`App::dispatch`](crate::app::App::dispatch).

use crate::task::TaskId;
use std::fmt;
use thiserror::Error;

/// Attribute naming the command
pub const COMMAND_ATTR: &str = "data-command";

/// Attribute carrying the task id
pub const TASK_ID_ATTR: &str = "data-task-id";

/// Selector matching command-bearing elements
pub const COMMAND_SELECTOR: &str = "[data-command]";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    Unknown(String),

    #[error("command `{0}` requires a task id")]
    MissingTaskId(&'static str),

    #[error("invalid task id `{0}`")]
    InvalidTaskId(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ViewTask(TaskId),
    EditTask(TaskId),
    ConfirmDelete(TaskId),
    CloseDeleteModal,
    DeleteTask,
    MarkAsProgress(TaskId),
    MarkAsCompleted(TaskId),
    CloseStatusModal,
    UpdateStatus,
    SignInWithGoogle,
    ToggleTheme,
}

impl Command {
    /// Resolve a command from its markup attributes
    pub fn parse(name: &str, task_id: Option<&str>) -> Result<Self, CommandError> {
        let name = name.trim();
        match name {
            "view-task" => with_task_id("view-task", task_id, Command::ViewTask),
            "edit-task" => with_task_id("edit-task", task_id, Command::EditTask),
            "confirm-delete" => with_task_id("confirm-delete", task_id, Command::ConfirmDelete),
            "close-delete-modal" => Ok(Command::CloseDeleteModal),
            "delete-task" => Ok(Command::DeleteTask),
            "mark-as-progress" => {
                with_task_id("mark-as-progress", task_id, Command::MarkAsProgress)
            }
            "mark-as-completed" => {
                with_task_id("mark-as-completed", task_id, Command::MarkAsCompleted)
            }
            "close-status-modal" => Ok(Command::CloseStatusModal),
            "update-status" => Ok(Command::UpdateStatus),
            "sign-in-with-google" => Ok(Command::SignInWithGoogle),
            "toggle-theme" => Ok(Command::ToggleTheme),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::ViewTask(_) => "view-task",
            Command::EditTask(_) => "edit-task",
            Command::ConfirmDelete(_) => "confirm-delete",
            Command::CloseDeleteModal => "close-delete-modal",
            Command::DeleteTask => "delete-task",
            Command::MarkAsProgress(_) => "mark-as-progress",
            Command::MarkAsCompleted(_) => "mark-as-completed",
            Command::CloseStatusModal => "close-status-modal",
            Command::UpdateStatus => "update-status",
            Command::SignInWithGoogle => "sign-in-with-google",
            Command::ToggleTheme => "toggle-theme",
        }
    }

    pub fn task_id(&self) -> Option<TaskId> {
        match *self {
            Command::ViewTask(id)
            | Command::EditTask(id)
            | Command::ConfirmDelete(id)
            | Command::MarkAsProgress(id)
            | Command::MarkAsCompleted(id) => Some(id),
            _ => None,
        }
    }
}

fn with_task_id(
    name: &'static str,
    task_id: Option<&str>,
    make: fn(TaskId) -> Command,
) -> Result<Command, CommandError> {
    let raw = task_id.ok_or(CommandError::MissingTaskId(name))?;
    raw.parse::<TaskId>()
        .map(make)
        .map_err(|_| CommandError::InvalidTaskId(raw.to_string()))
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.task_id() {
            Some(id) => write!(f, "{}({})", self.name(), id),
            None => f.write_str(self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_task_commands() {
        assert_eq!(
            Command::parse("view-task", Some("42")).unwrap(),
            Command::ViewTask(TaskId(42))
        );
        assert_eq!(
            Command::parse(" mark-as-completed ", Some("7")).unwrap(),
            Command::MarkAsCompleted(TaskId(7))
        );
        assert_eq!(
            Command::parse("delete-task", None).unwrap(),
            Command::DeleteTask
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Command::parse("confirm-delete", None),
            Err(CommandError::MissingTaskId("confirm-delete"))
        );
        assert_eq!(
            Command::parse("edit-task", Some("abc")),
            Err(CommandError::InvalidTaskId("abc".to_string()))
        );
        assert_eq!(
            Command::parse("launch", None),
            Err(CommandError::Unknown("launch".to_string()))
        );
    }

    #[test]
    fn test_names_roundtrip() {
        let commands = [
            Command::ViewTask(TaskId(1)),
            Command::EditTask(TaskId(1)),
            Command::ConfirmDelete(TaskId(1)),
            Command::CloseDeleteModal,
            Command::DeleteTask,
            Command::MarkAsProgress(TaskId(1)),
            Command::MarkAsCompleted(TaskId(1)),
            Command::CloseStatusModal,
            Command::UpdateStatus,
            Command::SignInWithGoogle,
            Command::ToggleTheme,
        ];
        for command in commands {
            assert_eq!(Command::parse(command.name(), Some("1")).unwrap(), command);
        }
        assert_eq!(Command::ConfirmDelete(TaskId(9)).to_string(), "confirm-delete(9)");
    }
}
