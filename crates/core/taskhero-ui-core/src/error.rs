//! Error types for the TaskHero UI controllers

use crate::command::CommandError;
use thiserror::Error;

/// Errors that can occur while driving the UI controllers
#[derive(Error, Debug)]
pub enum UiError {
    /// Client storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A persisted or supplied theme value is not recognised
    #[error("Invalid theme: {0}")]
    InvalidTheme(String),

    /// A value read from markup is not recognised
    #[error("Invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: String },

    /// The task backend rejected an action
    #[error("Backend error: {0}")]
    Backend(String),

    /// A markup command could not be resolved
    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// JavaScript error (WASM only)
    #[cfg(target_arch = "wasm32")]
    #[error("JavaScript error: {0}")]
    JavaScript(String),
}

impl UiError {
    /// Create a storage error
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an invalid theme error
    pub fn invalid_theme<S: Into<String>>(value: S) -> Self {
        Self::InvalidTheme(value.into())
    }

    /// Create an invalid value error
    pub fn invalid_value<S: Into<String>>(field: &'static str, value: S) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
        }
    }

    /// Create a backend error
    pub fn backend<S: Into<String>>(msg: S) -> Self {
        Self::Backend(msg.into())
    }

    #[cfg(target_arch = "wasm32")]
    /// Create a JavaScript error (WASM only)
    pub fn javascript<S: Into<String>>(msg: S) -> Self {
        Self::JavaScript(msg.into())
    }
}

/// Result type for UI operations
pub type UiResult<T> = std::result::Result<T, UiError>;
