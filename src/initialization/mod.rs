//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger
//! - Probe HTTP clients (timeouts, redirects, DNS override)

mod client;
mod logger;

// Re-export public API
pub use client::{init_probe_client, ProbeClientSettings};
pub use logger::init_logger_with;
