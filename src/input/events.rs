//! Platform-neutral keyboard event types.

use std::fmt;

/// Physical key identifier seen by the suppression engine.
///
/// Hook backends map their native key codes to these values. Keys the engine
/// never needs to tell apart collapse into [`KeyCode::Other`]; keys the hook
/// itself could not identify arrive as [`KeyCode::Undefined`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Left Alt (Option on macOS)
    LeftAlt,
    /// Right Alt / AltGr
    RightAlt,
    /// Left Meta (Windows key, Cmd on macOS)
    LeftMeta,
    /// Right Meta
    RightMeta,
    LeftShift,
    RightShift,
    LeftCtrl,
    RightCtrl,
    Tab,
    Space,
    Escape,
    Return,
    Backspace,
    Delete,
    CapsLock,
    /// Function key F1-F12, the range the hook can report
    F(u8),
    /// Letter or digit key, always stored uppercase
    Char(char),
    /// A key the hook recognized but the engine has no name for
    Other,
    /// A key the hook could not identify
    Undefined,
}

impl KeyCode {
    /// Letter or digit key. Letters are normalized to uppercase.
    pub const fn char(c: char) -> Self {
        KeyCode::Char(c.to_ascii_uppercase())
    }

    /// Parses a key name such as "Tab", "F3", "W", "Cmd" or "Undefined".
    ///
    /// Matching is case-insensitive. Modifier names resolve to the left-hand
    /// key, which is the one the engine tracks.
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        let key = match lower.as_str() {
            "alt" | "leftalt" | "lalt" | "option" => KeyCode::LeftAlt,
            "rightalt" | "ralt" | "altgr" => KeyCode::RightAlt,
            "meta" | "leftmeta" | "lmeta" | "win" | "super" | "cmd" | "command" => {
                KeyCode::LeftMeta
            }
            "rightmeta" | "rmeta" => KeyCode::RightMeta,
            "shift" | "leftshift" => KeyCode::LeftShift,
            "rightshift" => KeyCode::RightShift,
            "ctrl" | "control" | "leftctrl" => KeyCode::LeftCtrl,
            "rightctrl" => KeyCode::RightCtrl,
            "tab" => KeyCode::Tab,
            "space" => KeyCode::Space,
            "escape" | "esc" => KeyCode::Escape,
            "return" | "enter" => KeyCode::Return,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "capslock" => KeyCode::CapsLock,
            "undefined" | "unknown" => KeyCode::Undefined,
            _ => {
                if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                    if (1..=12).contains(&n) {
                        return Some(KeyCode::F(n));
                    }
                    return None;
                }

                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphanumeric() => KeyCode::char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::LeftAlt => f.write_str("Alt"),
            KeyCode::RightAlt => f.write_str("RightAlt"),
            KeyCode::LeftMeta => f.write_str("Meta"),
            KeyCode::RightMeta => f.write_str("RightMeta"),
            KeyCode::LeftShift => f.write_str("Shift"),
            KeyCode::RightShift => f.write_str("RightShift"),
            KeyCode::LeftCtrl => f.write_str("Ctrl"),
            KeyCode::RightCtrl => f.write_str("RightCtrl"),
            KeyCode::Tab => f.write_str("Tab"),
            KeyCode::Space => f.write_str("Space"),
            KeyCode::Escape => f.write_str("Escape"),
            KeyCode::Return => f.write_str("Return"),
            KeyCode::Backspace => f.write_str("Backspace"),
            KeyCode::Delete => f.write_str("Delete"),
            KeyCode::CapsLock => f.write_str("CapsLock"),
            KeyCode::F(n) => write!(f, "F{n}"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Other => f.write_str("Other"),
            KeyCode::Undefined => f.write_str("Undefined"),
        }
    }
}

/// Whether a key went down or came back up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Pressed,
    Released,
}

/// A single key transition delivered by the hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub kind: EventKind,
}

impl KeyEvent {
    pub fn pressed(key: KeyCode) -> Self {
        Self {
            key,
            kind: EventKind::Pressed,
        }
    }

    pub fn released(key: KeyCode) -> Self {
        Self {
            key,
            kind: EventKind::Released,
        }
    }

    pub fn is_press(&self) -> bool {
        self.kind == EventKind::Pressed
    }
}
