//! Global keyboard shortcuts

/// Selector of the element focused by the search shortcut
pub const SEARCH_INPUT_SELECTOR: &str = r#"input[type="search"]"#;

/// A key press as reported by the browser
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// `Ctrl+K` / `Cmd+K`
    FocusSearch,
    /// `Escape`
    CloseModal,
}

impl Shortcut {
    pub fn from_key(press: &KeyPress) -> Option<Self> {
        match press.key.as_str() {
            "k" | "K" if press.ctrl || press.meta => Some(Shortcut::FocusSearch),
            "Escape" => Some(Shortcut::CloseModal),
            _ => None,
        }
    }

    /// Whether the browser's default action must be suppressed
    pub fn prevents_default(self) -> bool {
        matches!(self, Shortcut::FocusSearch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_mapping() {
        assert_eq!(
            Shortcut::from_key(&KeyPress::new("k").with_ctrl()),
            Some(Shortcut::FocusSearch)
        );
        assert_eq!(
            Shortcut::from_key(&KeyPress::new("k").with_meta()),
            Some(Shortcut::FocusSearch)
        );
        assert_eq!(Shortcut::from_key(&KeyPress::new("k")), None);
        assert_eq!(
            Shortcut::from_key(&KeyPress::new("Escape")),
            Some(Shortcut::CloseModal)
        );
        assert_eq!(Shortcut::from_key(&KeyPress::new("Enter").with_ctrl()), None);
    }

    #[test]
    fn test_only_search_prevents_default() {
        assert!(Shortcut::FocusSearch.prevents_default());
        assert!(!Shortcut::CloseModal.prevents_default());
    }
}
