//! Configuration type definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Key suppression settings.
///
/// Controls which key combinations are swallowed while `--suppress-keys` runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SuppressionConfig {
    /// Keep the built-in rule table for the host platform
    /// (Windows: Alt+Tab, Alt+Space, Meta; macOS: F3/Mission Control, Cmd+W)
    #[serde(default = "default_platform_defaults")]
    pub platform_defaults: bool,

    /// Additional rules such as "Alt+F4" or "Cmd+Q": at most one modifier
    /// (Alt, Meta, Cmd, Win) followed by a key name.
    /// Ignored on platforms without a suppression table.
    #[serde(default)]
    pub extra_rules: Vec<String>,
}

impl Default for SuppressionConfig {
    fn default() -> Self {
        Self {
            platform_defaults: default_platform_defaults(),
            extra_rules: Vec::new(),
        }
    }
}

fn default_platform_defaults() -> bool {
    true
}
