//! Key-combination suppression engine.
//!
//! The hook hands every key event to a [`Dispatcher`], which updates the
//! modifier state and asks the active [`Policy`] whether to swallow it.

pub mod dispatcher;
pub mod policy;

pub use dispatcher::{Decision, Dispatcher};
pub use policy::{Policy, RuleParseError, SuppressionRule};

use crate::config::SuppressionConfig;
use crate::platform::Platform;
use log::{info, warn};

/// Builds the policy for `platform` from the user's suppression settings.
///
/// Invalid extra rules are logged and skipped. On a pass-through platform
/// extra rules are ignored as well, so unknown hosts never suppress input.
pub fn build_policy(platform: Platform, config: &SuppressionConfig) -> Policy {
    let mut policy = if config.platform_defaults {
        Policy::for_platform(platform)
    } else {
        Policy::empty(platform)
    };

    if platform == Platform::Other && !config.extra_rules.is_empty() {
        warn!(
            "Ignoring {} extra rule(s): no suppression on platform '{}'",
            config.extra_rules.len(),
            platform
        );
        return policy;
    }

    for rule_str in &config.extra_rules {
        match SuppressionRule::parse(rule_str, platform) {
            Ok(rule) => {
                policy.add_rule(rule);
            }
            Err(err) => warn!("Skipping invalid suppression rule '{}': {}", rule_str, err),
        }
    }

    info!(
        "Active suppression policy for {}: {} rule(s)",
        platform,
        policy.rules().len()
    );
    policy
}
