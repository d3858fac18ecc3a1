//! Library exports for innkeep-cli.
//!
//! This module exports the CLI structure so the commands can be unit tested
//! and documented without running the binary.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
