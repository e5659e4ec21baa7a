//! Configuration for the UI controllers
//!
//! Every value has a default matching the stock page behavior. The page can
//! override any subset through a JSON document (see [`UiConfig::from_json`]);
//! durations are written in milliseconds.

use crate::error::{UiError, UiResult};
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables shared by all controllers
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Storage key holding the persisted theme
    #[builder(default = default_storage_key())]
    pub storage_key: String,

    /// Minimum task title length, counted after trimming
    #[builder(default = 3)]
    pub min_title_len: usize,

    /// How long a notification stays before dismissing itself
    #[builder(default = Duration::from_secs(5))]
    #[serde(with = "duration_ms")]
    pub notification_lifetime: Duration,

    /// Delay before a freshly mounted notification slides in
    #[builder(default = Duration::from_millis(100))]
    #[serde(with = "duration_ms")]
    pub notification_enter_delay: Duration,

    /// Slide-out time before a dismissed notification is detached
    #[builder(default = Duration::from_millis(300))]
    #[serde(with = "duration_ms")]
    pub notification_exit: Duration,

    /// How long the connectivity banner stays visible
    #[builder(default = Duration::from_secs(3))]
    #[serde(with = "duration_ms")]
    pub banner_duration: Duration,

    /// How long a field tooltip stays visible
    #[builder(default = Duration::from_secs(3))]
    #[serde(with = "duration_ms")]
    pub tooltip_duration: Duration,

    /// Simulated loading time for submit buttons
    #[builder(default = Duration::from_secs(2))]
    #[serde(with = "duration_ms")]
    pub loading_duration: Duration,

    /// Fade-out time of a deleted task card
    #[builder(default = Duration::from_millis(300))]
    #[serde(with = "duration_ms")]
    pub card_fade: Duration,

    /// Visible fraction at which a card counts as scrolled into view
    #[builder(default = 0.1)]
    pub reveal_threshold: f64,

    /// Root margin for the reveal intersection observer
    #[builder(default = default_root_margin())]
    pub reveal_root_margin: String,

    /// `tracing` filter directive for the page log
    #[builder(default = default_log_level())]
    pub log_level: String,
}

fn default_storage_key() -> String {
    "theme".to_string()
}

fn default_root_margin() -> String {
    "0px 0px -50px 0px".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl UiConfig {
    /// Parse and validate a JSON configuration document
    pub fn from_json(json: &str) -> UiResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> UiResult<()> {
        if self.storage_key.trim().is_empty() {
            return Err(UiError::configuration("Storage key must not be empty"));
        }

        if self.min_title_len == 0 {
            return Err(UiError::configuration(
                "Minimum title length must be greater than zero",
            ));
        }

        let durations = [
            ("notification_lifetime", self.notification_lifetime),
            ("notification_exit", self.notification_exit),
            ("banner_duration", self.banner_duration),
            ("tooltip_duration", self.tooltip_duration),
            ("loading_duration", self.loading_duration),
        ];
        for (name, value) in durations {
            if value.is_zero() {
                return Err(UiError::configuration(format!(
                    "{name} must be greater than zero"
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(UiError::configuration(
                "Reveal threshold must be between 0.0 and 1.0",
            ));
        }

        Ok(())
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
