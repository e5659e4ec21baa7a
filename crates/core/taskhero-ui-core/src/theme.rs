//! Light/dark theme persistence and application

use crate::config::UiConfig;
use crate::error::UiError;
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Color scheme of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Visual state of the moon/sun icons inside the toggle button
    pub fn icon_state(self) -> IconState {
        match self {
            Theme::Light => IconState {
                moon: IconStyle::VISIBLE,
                sun: IconStyle::HIDDEN,
            },
            Theme::Dark => IconState {
                moon: IconStyle::HIDDEN,
                sun: IconStyle::VISIBLE,
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UiError::invalid_theme(other)),
        }
    }
}

/// Inline style applied to one toggle icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconStyle {
    pub opacity: &'static str,
    pub transform: &'static str,
}

impl IconStyle {
    pub const VISIBLE: Self = Self {
        opacity: "1",
        transform: "rotate(0deg)",
    };
    pub const HIDDEN: Self = Self {
        opacity: "0",
        transform: "rotate(180deg)",
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconState {
    pub moon: IconStyle,
    pub sun: IconStyle,
}

/// Where the theme becomes visible
pub trait ThemeSurface {
    /// Set the document-level `data-theme` attribute
    fn apply_theme(&self, theme: Theme);

    /// Update the toggle button icons. No-op when the button is absent.
    fn update_toggle_icon(&self, icons: IconState);
}

/// Persists and applies the light/dark theme
pub struct ThemeManager {
    theme: Cell<Theme>,
    storage_key: String,
    store: Rc<dyn KeyValueStore>,
    surface: Rc<dyn ThemeSurface>,
}

impl ThemeManager {
    /// Read the persisted theme (light when absent or unrecognised) and apply it
    pub fn new(
        config: &UiConfig,
        store: Rc<dyn KeyValueStore>,
        surface: Rc<dyn ThemeSurface>,
    ) -> Self {
        let persisted = store.get(&config.storage_key);
        let theme = match persisted.as_deref().map(str::parse::<Theme>) {
            Some(Ok(theme)) => theme,
            Some(Err(e)) => {
                debug!("Ignoring persisted theme: {}", e);
                Theme::default()
            }
            None => Theme::default(),
        };

        let manager = Self {
            theme: Cell::new(theme),
            storage_key: config.storage_key.clone(),
            store,
            surface,
        };
        manager.set_theme(theme);
        manager
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn set_theme(&self, theme: Theme) {
        self.theme.set(theme);
        self.surface.apply_theme(theme);
        if let Err(e) = self.store.set(&self.storage_key, theme.as_str()) {
            warn!("Failed to persist theme: {}", e);
        }
        self.surface.update_toggle_icon(theme.icon_state());
    }

    pub fn toggle_theme(&self) -> Theme {
        let next = self.theme().toggled();
        info!(theme = %next, "Switching theme");
        self.set_theme(next);
        next
    }
}

impl fmt::Debug for ThemeManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeManager")
            .field("theme", &self.theme.get())
            .field("storage_key", &self.storage_key)
            .finish()
    }
}
