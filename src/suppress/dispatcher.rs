//! Event dispatcher: the single entry point the keyboard hook calls.

use super::policy::Policy;
use crate::input::{KeyCode, KeyEvent, ModifierState};
use log::{debug, info, warn};

/// What the hook should do with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Let the event reach the rest of the system
    Forward,
    /// Swallow the event
    Suppress,
}

/// Owns the modifier state and the active policy for one listening session.
///
/// `handle` takes `&mut self`, so a dispatcher shared between threads must
/// be serialized by the caller (e.g. behind a `Mutex`).
#[derive(Debug)]
pub struct Dispatcher {
    modifiers: ModifierState,
    policy: Policy,
}

impl Dispatcher {
    /// Creates a dispatcher with every modifier released.
    pub fn new(policy: Policy) -> Self {
        Self {
            modifiers: ModifierState::new(),
            policy,
        }
    }

    /// Processes one key event and decides its fate.
    ///
    /// The modifier state is updated first, on every event, so it tracks the
    /// true press/release history regardless of what the policy decides.
    pub fn handle(&mut self, event: KeyEvent) -> Decision {
        if event.is_press() {
            debug!("Key pressed: {}", event.key);
        }

        let before = self.modifiers;
        self.modifiers.on_event(&event);
        if self.modifiers != before {
            log_modifier_change(event);
        }

        match self.policy.matching_rule(&event, &self.modifiers) {
            Some(rule) => {
                if rule.required_modifier.is_some() {
                    warn!("{} combination detected and suppressed.", rule);
                } else {
                    warn!("{} key detected and suppressed.", rule);
                }
                Decision::Suppress
            }
            None => Decision::Forward,
        }
    }

    pub fn modifiers(&self) -> &ModifierState {
        &self.modifiers
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }
}

fn log_modifier_change(event: KeyEvent) {
    let name = match event.key {
        KeyCode::LeftAlt => "Alt",
        KeyCode::LeftMeta => "Meta",
        _ => return,
    };
    if event.is_press() {
        info!("{} key pressed.", name);
    } else {
        info!("{} key released.", name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;
    use crate::suppress::SuppressionRule;

    fn dispatcher(platform: Platform) -> Dispatcher {
        Dispatcher::new(Policy::for_platform(platform))
    }

    #[test]
    fn windows_alt_tab_sequence() {
        let mut d = dispatcher(Platform::Windows);

        assert_eq!(d.handle(KeyEvent::pressed(KeyCode::LeftAlt)), Decision::Forward);
        assert!(d.modifiers().alt_held);
        assert_eq!(d.handle(KeyEvent::pressed(KeyCode::Tab)), Decision::Suppress);
        assert_eq!(d.handle(KeyEvent::released(KeyCode::LeftAlt)), Decision::Forward);
        assert!(!d.modifiers().alt_held);
        assert_eq!(d.handle(KeyEvent::pressed(KeyCode::Tab)), Decision::Forward);
    }

    #[test]
    fn windows_meta_is_suppressed_but_still_tracked() {
        let mut d = dispatcher(Platform::Windows);

        assert_eq!(d.handle(KeyEvent::pressed(KeyCode::LeftMeta)), Decision::Suppress);
        assert!(d.modifiers().meta_held);
        assert_eq!(d.handle(KeyEvent::released(KeyCode::LeftMeta)), Decision::Forward);
        assert!(!d.modifiers().meta_held);
    }

    #[test]
    fn macos_cmd_w_sequence() {
        let mut d = dispatcher(Platform::MacOS);

        assert_eq!(d.handle(KeyEvent::pressed(KeyCode::Undefined)), Decision::Suppress);
        assert_eq!(d.handle(KeyEvent::pressed(KeyCode::LeftMeta)), Decision::Forward);
        assert!(d.modifiers().meta_held);
        assert_eq!(d.handle(KeyEvent::pressed(KeyCode::char('w'))), Decision::Suppress);
        assert_eq!(d.handle(KeyEvent::released(KeyCode::LeftMeta)), Decision::Forward);
        assert!(!d.modifiers().meta_held);
        assert_eq!(d.handle(KeyEvent::pressed(KeyCode::char('w'))), Decision::Forward);
    }

    #[test]
    fn pass_through_forwards_but_still_tracks_state() {
        let mut d = dispatcher(Platform::Other);

        assert_eq!(d.handle(KeyEvent::pressed(KeyCode::LeftAlt)), Decision::Forward);
        assert_eq!(d.handle(KeyEvent::pressed(KeyCode::Tab)), Decision::Forward);
        assert_eq!(d.handle(KeyEvent::pressed(KeyCode::LeftMeta)), Decision::Forward);
        assert!(d.modifiers().alt_held);
        assert!(d.modifiers().meta_held);
    }

    #[test]
    fn suppressed_combination_release_is_forwarded() {
        let mut d = dispatcher(Platform::Windows);

        d.handle(KeyEvent::pressed(KeyCode::LeftAlt));
        assert_eq!(d.handle(KeyEvent::pressed(KeyCode::Space)), Decision::Suppress);
        assert_eq!(d.handle(KeyEvent::released(KeyCode::Space)), Decision::Forward);
    }

    #[test]
    fn unknown_keys_are_forwarded_on_windows() {
        let mut d = dispatcher(Platform::Windows);
        assert_eq!(d.handle(KeyEvent::pressed(KeyCode::Undefined)), Decision::Forward);
        assert_eq!(d.handle(KeyEvent::pressed(KeyCode::Other)), Decision::Forward);
    }

    #[test]
    fn custom_rules_participate() {
        let mut policy = Policy::for_platform(Platform::Windows);
        policy.add_rule(SuppressionRule::parse("Alt+F4", Platform::Windows).unwrap());
        let mut d = Dispatcher::new(policy);

        assert_eq!(d.handle(KeyEvent::pressed(KeyCode::F(4))), Decision::Forward);
        d.handle(KeyEvent::pressed(KeyCode::LeftAlt));
        assert_eq!(d.handle(KeyEvent::pressed(KeyCode::F(4))), Decision::Suppress);
    }
}
