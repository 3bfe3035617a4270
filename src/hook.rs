//! System-wide keyboard hook backed by rdev.
//!
//! Translates rdev events into [`KeyEvent`]s, hands them to the
//! [`Dispatcher`], and swallows the ones it marks for suppression.
//! Mouse and wheel events always pass through. On Windows and macOS the hook
//! uses `rdev::grab`; elsewhere rdev can only listen, so events are observed
//! and every decision is effectively Forward.

use crate::input::{KeyCode, KeyEvent};
use crate::suppress::{Decision, Dispatcher};
use log::{error, info};
use rdev::{EventType, Key};
use std::cell::RefCell;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HookError {
    /// The OS refused the hook (missing Accessibility permission on macOS,
    /// no display connection on Linux, ...).
    #[error("Failed to install keyboard hook: {0}")]
    Install(String),
}

/// Installs the hook and blocks the calling thread until it stops.
///
/// The dispatcher is owned by the hook callback, which rdev invokes on this
/// thread only, so it needs no locking.
pub fn run(dispatcher: Dispatcher) -> Result<(), HookError> {
    let dispatcher = RefCell::new(dispatcher);

    info!("Keyboard hook initialized.");
    install(dispatcher).map_err(|err| {
        error!("{}", err);
        err
    })
}

#[cfg(any(target_os = "windows", target_os = "macos"))]
fn install(dispatcher: RefCell<Dispatcher>) -> Result<(), HookError> {
    rdev::grab(move |event| {
        let Some(key_event) = translate(&event.event_type) else {
            return Some(event);
        };

        match dispatcher.borrow_mut().handle(key_event) {
            Decision::Forward => Some(event),
            Decision::Suppress => None,
        }
    })
    .map_err(|err| HookError::Install(format!("{err:?}")))
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn install(dispatcher: RefCell<Dispatcher>) -> Result<(), HookError> {
    if !dispatcher.borrow().policy().rules().is_empty() {
        log::warn!("Key grabbing is unavailable on this OS; matching keys are only logged");
    }

    rdev::listen(move |event| {
        if let Some(key_event) = translate(&event.event_type) {
            if dispatcher.borrow_mut().handle(key_event) == Decision::Suppress {
                log::debug!("Cannot suppress {:?} on this OS; forwarded", key_event.key);
            }
        }
    })
    .map_err(|err| HookError::Install(format!("{err:?}")))
}

/// Converts an rdev event into a key event. Non-keyboard events yield `None`.
pub fn translate(event_type: &EventType) -> Option<KeyEvent> {
    match event_type {
        EventType::KeyPress(key) => Some(KeyEvent::pressed(key_code(*key))),
        EventType::KeyRelease(key) => Some(KeyEvent::released(key_code(*key))),
        _ => None,
    }
}

/// Maps an rdev key to the engine's key code.
///
/// Keys rdev could not identify become [`KeyCode::Undefined`]; keys it knows
/// but the engine never distinguishes become [`KeyCode::Other`].
pub fn key_code(key: Key) -> KeyCode {
    match key {
        Key::Alt => KeyCode::LeftAlt,
        Key::AltGr => KeyCode::RightAlt,
        Key::MetaLeft => KeyCode::LeftMeta,
        Key::MetaRight => KeyCode::RightMeta,
        Key::ShiftLeft => KeyCode::LeftShift,
        Key::ShiftRight => KeyCode::RightShift,
        Key::ControlLeft => KeyCode::LeftCtrl,
        Key::ControlRight => KeyCode::RightCtrl,
        Key::Tab => KeyCode::Tab,
        Key::Space => KeyCode::Space,
        Key::Escape => KeyCode::Escape,
        Key::Return => KeyCode::Return,
        Key::Backspace => KeyCode::Backspace,
        Key::Delete => KeyCode::Delete,
        Key::CapsLock => KeyCode::CapsLock,
        Key::F1 => KeyCode::F(1),
        Key::F2 => KeyCode::F(2),
        Key::F3 => KeyCode::F(3),
        Key::F4 => KeyCode::F(4),
        Key::F5 => KeyCode::F(5),
        Key::F6 => KeyCode::F(6),
        Key::F7 => KeyCode::F(7),
        Key::F8 => KeyCode::F(8),
        Key::F9 => KeyCode::F(9),
        Key::F10 => KeyCode::F(10),
        Key::F11 => KeyCode::F(11),
        Key::F12 => KeyCode::F(12),
        Key::KeyA => KeyCode::Char('A'),
        Key::KeyB => KeyCode::Char('B'),
        Key::KeyC => KeyCode::Char('C'),
        Key::KeyD => KeyCode::Char('D'),
        Key::KeyE => KeyCode::Char('E'),
        Key::KeyF => KeyCode::Char('F'),
        Key::KeyG => KeyCode::Char('G'),
        Key::KeyH => KeyCode::Char('H'),
        Key::KeyI => KeyCode::Char('I'),
        Key::KeyJ => KeyCode::Char('J'),
        Key::KeyK => KeyCode::Char('K'),
        Key::KeyL => KeyCode::Char('L'),
        Key::KeyM => KeyCode::Char('M'),
        Key::KeyN => KeyCode::Char('N'),
        Key::KeyO => KeyCode::Char('O'),
        Key::KeyP => KeyCode::Char('P'),
        Key::KeyQ => KeyCode::Char('Q'),
        Key::KeyR => KeyCode::Char('R'),
        Key::KeyS => KeyCode::Char('S'),
        Key::KeyT => KeyCode::Char('T'),
        Key::KeyU => KeyCode::Char('U'),
        Key::KeyV => KeyCode::Char('V'),
        Key::KeyW => KeyCode::Char('W'),
        Key::KeyX => KeyCode::Char('X'),
        Key::KeyY => KeyCode::Char('Y'),
        Key::KeyZ => KeyCode::Char('Z'),
        Key::Num0 => KeyCode::Char('0'),
        Key::Num1 => KeyCode::Char('1'),
        Key::Num2 => KeyCode::Char('2'),
        Key::Num3 => KeyCode::Char('3'),
        Key::Num4 => KeyCode::Char('4'),
        Key::Num5 => KeyCode::Char('5'),
        Key::Num6 => KeyCode::Char('6'),
        Key::Num7 => KeyCode::Char('7'),
        Key::Num8 => KeyCode::Char('8'),
        Key::Num9 => KeyCode::Char('9'),
        Key::Unknown(_) => KeyCode::Undefined,
        _ => KeyCode::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;
    use crate::suppress::Policy;

    #[test]
    fn maps_tracked_keys() {
        assert_eq!(key_code(Key::Alt), KeyCode::LeftAlt);
        assert_eq!(key_code(Key::MetaLeft), KeyCode::LeftMeta);
        assert_eq!(key_code(Key::Tab), KeyCode::Tab);
        assert_eq!(key_code(Key::F3), KeyCode::F(3));
        assert_eq!(key_code(Key::KeyW), KeyCode::char('w'));
    }

    #[test]
    fn unidentified_keys_are_undefined_but_known_ones_are_not() {
        assert_eq!(key_code(Key::Unknown(160)), KeyCode::Undefined);
        assert_eq!(key_code(Key::Insert), KeyCode::Other);
        assert_eq!(key_code(Key::UpArrow), KeyCode::Other);
    }

    #[test]
    fn translate_ignores_pointer_events() {
        assert_eq!(
            translate(&EventType::KeyPress(Key::Tab)),
            Some(KeyEvent::pressed(KeyCode::Tab))
        );
        assert_eq!(
            translate(&EventType::KeyRelease(Key::Alt)),
            Some(KeyEvent::released(KeyCode::LeftAlt))
        );
        assert_eq!(translate(&EventType::MouseMove { x: 1.0, y: 2.0 }), None);
        assert_eq!(
            translate(&EventType::Wheel {
                delta_x: 0,
                delta_y: 1
            }),
            None
        );
    }

    #[test]
    fn translated_stream_drives_dispatcher() {
        let mut dispatcher = Dispatcher::new(Policy::for_platform(Platform::Windows));
        let stream = [
            EventType::KeyPress(Key::Alt),
            EventType::KeyPress(Key::Tab),
            EventType::KeyRelease(Key::Tab),
            EventType::KeyRelease(Key::Alt),
        ];

        let decisions: Vec<Decision> = stream
            .iter()
            .filter_map(translate)
            .map(|event| dispatcher.handle(event))
            .collect();

        assert_eq!(
            decisions,
            vec![
                Decision::Forward,
                Decision::Suppress,
                Decision::Forward,
                Decision::Forward
            ]
        );
    }
}
