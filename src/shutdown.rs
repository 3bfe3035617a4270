//! Process shutdown while the keyboard hook owns the main thread.
//!
//! The hook loop has no stop call, so an interrupt logs the shutdown, flushes
//! the logger and exits the process.

use anyhow::{Context, Result};
use log::info;

/// Installs the interrupt handler for this OS.
///
/// # Errors
/// Returns an error if the handler cannot be registered.
#[cfg(unix)]
pub fn install() -> Result<()> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals =
        Signals::new([SIGINT, SIGTERM]).context("Failed to register signal handler")?;

    std::thread::spawn(move || {
        if let Some(sig) = signals.forever().next() {
            exit_after(if sig == SIGTERM { "SIGTERM" } else { "SIGINT" });
        }
    });
    Ok(())
}

/// Installs the interrupt handler for this OS.
///
/// # Errors
/// Returns an error if a console control handler is already registered.
#[cfg(windows)]
pub fn install() -> Result<()> {
    ctrlc::set_handler(|| exit_after("Ctrl+C")).context("Failed to set Ctrl+C handler")
}

#[cfg(not(any(unix, windows)))]
pub fn install() -> Result<()> {
    Ok(())
}

fn exit_after(signal: &str) -> ! {
    info!("{}", stop_message(signal));
    info!("Application shutting down.");
    log::logger().flush();
    std::process::exit(0);
}

fn stop_message(signal: &str) -> String {
    format!("Received {signal} - stopping keyboard hook")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_registers_handler() {
        install().unwrap();
    }

    #[test]
    fn stop_message_names_signal() {
        assert_eq!(
            stop_message("Ctrl+C"),
            "Received Ctrl+C - stopping keyboard hook"
        );
    }
}
