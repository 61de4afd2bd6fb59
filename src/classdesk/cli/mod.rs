//! # CLI Layer
//!
//! This module is **one possible UI client** for classdesk; it is not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, the delete prompt)
//! - Decides the process exit code
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - [`setup`]: clap definitions and grouped help
//! - [`commands`]: `run()` plus one `handle_*()` per command
//! - [`render`]: `CmdResult` pieces to styled text
//! - [`styles`]: light and dark palettes
//! - [`templates`]: template sources

pub mod commands;
pub mod render;
pub mod setup;
pub mod styles;
pub mod templates;

pub use commands::run;

use std::io::IsTerminal;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "CLASSDESK_LOG";

/// Logs go to stderr so they never mix with rendered output.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    // a second init (tests) is harmless
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
