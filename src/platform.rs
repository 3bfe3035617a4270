//! Host platform detection.
//!
//! The platform decides which suppression table is active. It is resolved
//! once per process and never changes afterwards.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Operating system family the suppression policy is selected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    MacOS,
    /// Anything else. Selects the pass-through policy.
    Other,
}

static DETECTED: OnceLock<Platform> = OnceLock::new();

impl Platform {
    /// Classifies an OS name as reported by `std::env::consts::OS`.
    pub fn from_os_name(os: &str) -> Self {
        match os {
            "windows" => Platform::Windows,
            "macos" => Platform::MacOS,
            _ => Platform::Other,
        }
    }
}

/// Returns the host platform, classifying it on first use.
///
/// Unknown operating systems map to [`Platform::Other`] rather than failing.
pub fn detect() -> Platform {
    *DETECTED.get_or_init(|| {
        let platform = Platform::from_os_name(std::env::consts::OS);
        log::debug!(
            "Detected platform {} (os: {})",
            platform,
            std::env::consts::OS
        );
        platform
    })
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => f.write_str("windows"),
            Platform::MacOS => f.write_str("macos"),
            Platform::Other => f.write_str("other"),
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windows" | "win" => Ok(Platform::Windows),
            "macos" | "mac" | "osx" | "darwin" => Ok(Platform::MacOS),
            "other" | "none" => Ok(Platform::Other),
            other => Err(format!(
                "unknown platform '{other}' (expected windows, macos or other)"
            )),
        }
    }
}
