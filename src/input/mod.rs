//! Keyboard input model.
//!
//! Hook backends translate native key codes into [`KeyEvent`]s; the
//! [`ModifierState`] tracker keeps the held-down state of the modifiers that
//! gate suppression rules.

pub mod events;
pub mod modifiers;

// Re-export commonly used types at module level
pub use events::{EventKind, KeyCode, KeyEvent};
pub use modifiers::{ModifierKey, ModifierState};
