//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, batch tiers, pacing)
//! - Library configuration (`Config`) and CLI option types

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Command, Config, FailOn, LogFormat, LogLevel, ModeArg, Opt};
