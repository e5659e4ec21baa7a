//! Task identifiers, server routes and the backend seam

use crate::error::{UiError, UiResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Server-side primary key of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl TaskId {
    /// Route of the task detail page
    pub fn detail_path(self) -> String {
        format!("/tasks/{}/", self.0)
    }

    /// Route of the task edit page
    pub fn edit_path(self) -> String {
        format!("/tasks/{}/edit/", self.0)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TaskId)
    }
}

/// Workflow state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "todo")]
    Todo,
    #[serde(rename = "inprogress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "inprogress",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Task priority as submitted by the priority picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl FromStr for Priority {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UiError::invalid_value("priority", s))
    }
}

/// Server operations triggered from the task list
///
/// This layer never owns task data; implementations forward to the task API.
pub trait TaskBackend {
    fn delete_task(&self, id: TaskId) -> UiResult<()>;
    fn update_status(&self, id: TaskId, status: TaskStatus) -> UiResult<()>;
}

/// Placeholder backend that only logs and reports success
///
/// The page has no task API wired in yet; every action is accepted locally.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedBackend;

impl TaskBackend for SimulatedBackend {
    fn delete_task(&self, id: TaskId) -> UiResult<()> {
        info!(task_id = %id, "Deleting task (simulated)");
        Ok(())
    }

    fn update_status(&self, id: TaskId, status: TaskStatus) -> UiResult<()> {
        info!(task_id = %id, status = status.as_str(), "Updating status for task (simulated)");
        Ok(())
    }
}
