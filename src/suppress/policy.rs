//! Per-platform suppression rule tables.
//!
//! A [`Policy`] is selected once at startup from the host [`Platform`] and
//! answers, for every key event, whether it should be swallowed. Adding a
//! platform means adding one rule table here.

use crate::input::{KeyCode, KeyEvent, ModifierKey, ModifierState};
use crate::platform::Platform;
use std::fmt;
use thiserror::Error;

/// One trigger: a key press, optionally gated on a held modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SuppressionRule {
    pub required_modifier: Option<ModifierKey>,
    pub trigger_key: KeyCode,
    pub platform: Platform,
}

impl SuppressionRule {
    pub const fn new(
        required_modifier: Option<ModifierKey>,
        trigger_key: KeyCode,
        platform: Platform,
    ) -> Self {
        Self {
            required_modifier,
            trigger_key,
            platform,
        }
    }

    /// Parse a rule string like "Alt+F4", "Cmd+Q" or "Meta".
    ///
    /// The last segment is the trigger key; at most one modifier may precede
    /// it. A lone modifier name ("Meta") suppresses that key itself.
    pub fn parse(s: &str, platform: Platform) -> Result<Self, RuleParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RuleParseError::Empty);
        }

        let parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let (key_name, modifier_names) = parts.split_last().ok_or(RuleParseError::Empty)?;

        let trigger_key = KeyCode::from_name(key_name)
            .ok_or_else(|| RuleParseError::UnknownKey(key_name.to_string()))?;

        let required_modifier = match modifier_names {
            [] => None,
            [name] => Some(
                ModifierKey::from_name(name)
                    .ok_or_else(|| RuleParseError::UnknownModifier(name.to_string()))?,
            ),
            _ => return Err(RuleParseError::TooManyModifiers(s.to_string())),
        };

        Ok(Self::new(required_modifier, trigger_key, platform))
    }

    /// Whether this rule fires for `event` given the current modifier state.
    pub fn matches(&self, event: &KeyEvent, state: &ModifierState, platform: Platform) -> bool {
        self.platform == platform
            && event.is_press()
            && event.key == self.trigger_key
            && self
                .required_modifier
                .is_none_or(|modifier| state.is_held(modifier))
    }
}

impl fmt::Display for SuppressionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.required_modifier {
            Some(ModifierKey::Meta) if self.platform == Platform::MacOS => {
                write!(f, "Cmd+{}", self.trigger_key)
            }
            Some(modifier) => write!(f, "{}+{}", modifier, self.trigger_key),
            None => write!(f, "{}", self.trigger_key),
        }
    }
}

/// Errors produced while parsing user-supplied rule strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleParseError {
    #[error("empty suppression rule")]
    Empty,
    #[error("unknown key '{0}'")]
    UnknownKey(String),
    #[error("unknown modifier '{0}' (expected Alt or Meta/Cmd)")]
    UnknownModifier(String),
    #[error("rule '{0}' has more than one modifier")]
    TooManyModifiers(String),
}

/// Alt+Tab, Alt+Space and the bare Windows key.
const WINDOWS_RULES: &[SuppressionRule] = &[
    SuppressionRule::new(Some(ModifierKey::Alt), KeyCode::Tab, Platform::Windows),
    SuppressionRule::new(Some(ModifierKey::Alt), KeyCode::Space, Platform::Windows),
    SuppressionRule::new(None, KeyCode::LeftMeta, Platform::Windows),
];

/// Mission Control (F3, or the unmapped key modern keyboards send) and Cmd+W.
const MACOS_RULES: &[SuppressionRule] = &[
    SuppressionRule::new(None, KeyCode::F(3), Platform::MacOS),
    SuppressionRule::new(None, KeyCode::Undefined, Platform::MacOS),
    SuppressionRule::new(Some(ModifierKey::Meta), KeyCode::char('W'), Platform::MacOS),
];

/// Suppression strategy for one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Policy {
    Windows(Vec<SuppressionRule>),
    MacOS(Vec<SuppressionRule>),
    /// Never suppresses anything.
    PassThrough,
}

impl Policy {
    /// Built-in rule table for `platform`.
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Windows => Policy::Windows(WINDOWS_RULES.to_vec()),
            Platform::MacOS => Policy::MacOS(MACOS_RULES.to_vec()),
            Platform::Other => Policy::PassThrough,
        }
    }

    /// Policy for `platform` with no built-in rules, for users who only want
    /// their own.
    pub fn empty(platform: Platform) -> Self {
        match platform {
            Platform::Windows => Policy::Windows(Vec::new()),
            Platform::MacOS => Policy::MacOS(Vec::new()),
            Platform::Other => Policy::PassThrough,
        }
    }

    pub fn platform(&self) -> Platform {
        match self {
            Policy::Windows(_) => Platform::Windows,
            Policy::MacOS(_) => Platform::MacOS,
            Policy::PassThrough => Platform::Other,
        }
    }

    /// Active rules, in evaluation order.
    pub fn rules(&self) -> &[SuppressionRule] {
        match self {
            Policy::Windows(rules) | Policy::MacOS(rules) => rules,
            Policy::PassThrough => &[],
        }
    }

    /// Appends a rule to the active table.
    ///
    /// Returns `false` (and drops the rule) when the policy is pass-through or
    /// the rule targets another platform. Duplicates are ignored.
    pub fn add_rule(&mut self, rule: SuppressionRule) -> bool {
        let platform = self.platform();
        match self {
            Policy::Windows(rules) | Policy::MacOS(rules) if rule.platform == platform => {
                if !rules.contains(&rule) {
                    rules.push(rule);
                }
                true
            }
            _ => false,
        }
    }

    /// First rule that fires for `event`, if any.
    ///
    /// Rules are independent, so any match means the event is suppressed;
    /// the returned rule is only used for reporting.
    pub fn matching_rule(
        &self,
        event: &KeyEvent,
        state: &ModifierState,
    ) -> Option<&SuppressionRule> {
        let platform = self.platform();
        self.rules()
            .iter()
            .find(|rule| rule.matches(event, state, platform))
    }

    /// Whether `event` should be swallowed. Never mutates `state`.
    pub fn should_suppress(&self, event: &KeyEvent, state: &ModifierState) -> bool {
        self.matching_rule(event, state).is_some()
    }
}
