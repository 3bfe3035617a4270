//! Keyboard modifier state tracking.

use super::events::{EventKind, KeyCode, KeyEvent};
use std::fmt;

/// Modifier keys that can gate a suppression rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKey {
    /// Left Alt
    Alt,
    /// Left Meta (Windows key on Windows, Cmd on macOS)
    Meta,
}

impl ModifierKey {
    /// Parses a modifier name. Accepts the platform spellings of Meta.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "alt" | "option" => Some(ModifierKey::Alt),
            "meta" | "win" | "super" | "cmd" | "command" => Some(ModifierKey::Meta),
            _ => None,
        }
    }

    /// The physical key whose press and release drive this modifier.
    pub fn key(self) -> KeyCode {
        match self {
            ModifierKey::Alt => KeyCode::LeftAlt,
            ModifierKey::Meta => KeyCode::LeftMeta,
        }
    }
}

impl fmt::Display for ModifierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModifierKey::Alt => f.write_str("Alt"),
            ModifierKey::Meta => f.write_str("Meta"),
        }
    }
}

/// Held-down state of the tracked modifiers.
///
/// Mirrors the raw press/release history of LeftAlt and LeftMeta. Releases
/// clear the flag unconditionally, so the state stays accurate whether or
/// not the press was suppressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    /// LeftAlt is down
    pub alt_held: bool,
    /// LeftMeta is down
    pub meta_held: bool,
}

impl ModifierState {
    /// Creates a state with every modifier released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a key transition. Keys other than LeftAlt and LeftMeta are ignored.
    pub fn on_event(&mut self, event: &KeyEvent) {
        let down = event.kind == EventKind::Pressed;
        match event.key {
            KeyCode::LeftAlt => self.alt_held = down,
            KeyCode::LeftMeta => self.meta_held = down,
            _ => {}
        }
    }

    pub fn is_held(&self, modifier: ModifierKey) -> bool {
        match modifier {
            ModifierKey::Alt => self.alt_held,
            ModifierKey::Meta => self.meta_held,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_everything_released() {
        let state = ModifierState::new();
        assert!(!state.alt_held);
        assert!(!state.meta_held);
    }

    #[test]
    fn press_and_release_toggle_alt() {
        let mut state = ModifierState::new();
        state.on_event(&KeyEvent::pressed(KeyCode::LeftAlt));
        assert!(state.alt_held);
        assert!(!state.meta_held);

        state.on_event(&KeyEvent::released(KeyCode::LeftAlt));
        assert!(!state.alt_held);
    }

    #[test]
    fn press_and_release_toggle_meta() {
        let mut state = ModifierState::new();
        state.on_event(&KeyEvent::pressed(KeyCode::LeftMeta));
        assert!(state.is_held(ModifierKey::Meta));

        state.on_event(&KeyEvent::released(KeyCode::LeftMeta));
        assert!(!state.is_held(ModifierKey::Meta));
    }

    #[test]
    fn repeated_release_is_idempotent() {
        let mut state = ModifierState::new();
        state.on_event(&KeyEvent::released(KeyCode::LeftAlt));
        state.on_event(&KeyEvent::released(KeyCode::LeftAlt));
        assert_eq!(state, ModifierState::new());
    }

    #[test]
    fn right_hand_modifiers_are_not_tracked() {
        let mut state = ModifierState::new();
        state.on_event(&KeyEvent::pressed(KeyCode::RightAlt));
        state.on_event(&KeyEvent::pressed(KeyCode::RightMeta));
        state.on_event(&KeyEvent::pressed(KeyCode::Tab));
        assert_eq!(state, ModifierState::new());
    }

    #[test]
    fn parses_modifier_spellings() {
        assert_eq!(ModifierKey::from_name("ALT"), Some(ModifierKey::Alt));
        assert_eq!(ModifierKey::from_name("cmd"), Some(ModifierKey::Meta));
        assert_eq!(ModifierKey::from_name("Win"), Some(ModifierKey::Meta));
        assert_eq!(ModifierKey::from_name("ctrl"), None);
        assert_eq!(ModifierKey::Meta.key(), KeyCode::LeftMeta);
    }
}
