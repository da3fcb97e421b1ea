//! Keyboard navigation keys and their mapping from DOM key strings.

/// Navigation keys the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
}

impl NavKey {
    /// Map a DOM `KeyboardEvent.key` string; `None` for keys the engine does
    /// not handle, so the event can propagate.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Self::ArrowUp),
            "ArrowDown" => Some(Self::ArrowDown),
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            "Home" => Some(Self::Home),
            "End" => Some(Self::End),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_key_strings_map() {
        assert_eq!(NavKey::from_key("ArrowDown"), Some(NavKey::ArrowDown));
        assert_eq!(NavKey::from_key("Home"), Some(NavKey::Home));
        assert_eq!(NavKey::from_key("End"), Some(NavKey::End));
        assert_eq!(NavKey::from_key("Enter"), None);
        assert_eq!(NavKey::from_key("a"), None);
    }
}
