//! Desktop chrome visibility: the Windows taskbar, or the macOS menu bar and Dock.
//!
//! This is a one-shot OS call made from the command layer; the suppression
//! engine never depends on it.

use crate::platform::Platform;
use log::info;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Requested state of the desktop chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "show" => Ok(Visibility::Visible),
            "hide" => Ok(Visibility::Hidden),
            other => Err(format!("'{other}' is not 'hide' or 'show'")),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Visible => f.write_str("Visible"),
            Visibility::Hidden => f.write_str("Hidden"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ChromeError {
    #[error("Failed to find the taskbar window")]
    TaskbarNotFound,

    #[error("osascript exited with {status}: {stderr}")]
    Script { status: String, stderr: String },

    #[error("Failed to run osascript: {0}")]
    Io(#[from] std::io::Error),

    #[error("Hiding desktop chrome is not supported on platform '{0}'")]
    Unsupported(Platform),
}

/// Shows or hides the platform's desktop chrome.
///
/// Only works when `platform` is the host platform; forcing another platform
/// yields [`ChromeError::Unsupported`].
pub fn set_visibility(platform: Platform, visibility: Visibility) -> Result<(), ChromeError> {
    let result: Result<(), ChromeError> = match platform {
        #[cfg(target_os = "windows")]
        Platform::Windows => taskbar::set_taskbar_visibility(visibility),
        #[cfg(target_os = "macos")]
        Platform::MacOS => dock::set_menu_bar_and_dock_visibility(visibility),
        other => Err(ChromeError::Unsupported(other)),
    };
    result?;

    info!("{} visibility set to: {}", chrome_name(platform), visibility);
    Ok(())
}

fn chrome_name(platform: Platform) -> &'static str {
    match platform {
        Platform::MacOS => "Menu bar and Dock",
        _ => "Taskbar",
    }
}

/// AppleScript statements that toggle Dock and menu bar auto-hide.
///
/// Hiding turns auto-hide on; showing turns it off.
pub fn apple_script(visibility: Visibility) -> [String; 2] {
    let autohide = visibility == Visibility::Hidden;
    [
        format!(
            "tell application \"System Events\" to set autohide of dock preferences to {autohide}"
        ),
        format!(
            "tell application \"System Events\" to set autohide menu bar of dock preferences to {autohide}"
        ),
    ]
}

#[cfg(target_os = "windows")]
mod taskbar {
    use super::{ChromeError, Visibility};
    use ::windows::Win32::UI::WindowsAndMessaging::{FindWindowW, SW_HIDE, SW_SHOW, ShowWindow};
    use ::windows::core::{PCWSTR, w};

    pub(super) fn set_taskbar_visibility(visibility: Visibility) -> Result<(), ChromeError> {
        let hwnd = unsafe { FindWindowW(w!("Shell_TrayWnd"), PCWSTR::null()) }
            .map_err(|_| ChromeError::TaskbarNotFound)?;
        if hwnd.is_invalid() {
            return Err(ChromeError::TaskbarNotFound);
        }

        let command = match visibility {
            Visibility::Visible => SW_SHOW,
            Visibility::Hidden => SW_HIDE,
        };
        // Return value is the previous visibility, not success.
        let _ = unsafe { ShowWindow(hwnd, command) };
        Ok(())
    }
}

#[cfg(target_os = "macos")]
mod dock {
    use super::{ChromeError, Visibility, apple_script};
    use std::process::{Command, Stdio};

    pub(super) fn set_menu_bar_and_dock_visibility(
        visibility: Visibility,
    ) -> Result<(), ChromeError> {
        let mut command = Command::new("osascript");
        for statement in apple_script(visibility) {
            command.arg("-e").arg(statement);
        }

        let output = command.stdin(Stdio::null()).output()?;
        if !output.status.success() {
            return Err(ChromeError::Script {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hide_and_show() {
        assert_eq!("hide".parse::<Visibility>(), Ok(Visibility::Hidden));
        assert_eq!("SHOW".parse::<Visibility>(), Ok(Visibility::Visible));
        assert!("toggle".parse::<Visibility>().is_err());
        assert!("".parse::<Visibility>().is_err());
    }

    #[test]
    fn apple_script_sets_autohide_for_both() {
        let hide = apple_script(Visibility::Hidden);
        assert!(hide[0].contains("autohide of dock preferences to true"));
        assert!(hide[1].contains("autohide menu bar of dock preferences to true"));

        let show = apple_script(Visibility::Visible);
        assert!(show.iter().all(|line| line.ends_with("to false")));
    }

    #[test]
    fn other_platform_is_unsupported() {
        let err = set_visibility(Platform::Other, Visibility::Hidden).unwrap_err();
        assert!(matches!(err, ChromeError::Unsupported(Platform::Other)));
        assert!(err.to_string().contains("not supported"));
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn forcing_windows_elsewhere_is_unsupported() {
        assert!(matches!(
            set_visibility(Platform::Windows, Visibility::Visible),
            Err(ChromeError::Unsupported(Platform::Windows))
        ));
    }
}
