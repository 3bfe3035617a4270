//! Library exports for keyguard.
//!
//! The suppression engine ([`suppress`], [`input`], [`platform`]) has no OS
//! dependencies and can be driven with plain event sequences; [`hook`] and
//! [`chrome`] hold the OS-facing collaborators used by the binary.

pub mod chrome;
pub mod config;
pub mod hook;
pub mod input;
pub mod platform;
pub mod shutdown;
pub mod suppress;

pub use config::Config;
pub use platform::Platform;
pub use suppress::{Decision, Dispatcher, Policy};
