//! Configuration system for innkeep.
//!
//! This module provides layered configuration with support for:
//! - A `config.yaml` file in the data directory
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of the merged result
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`INNKEEP_*`)
//! 3. `config.yaml` in the data directory
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use innkeep::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new()
//!     .with_data_dir("/var/lib/innkeep")
//!     .build()
//!     .unwrap();
//!
//! println!("Grace period: {}h", config.expiry_grace_hours());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, FilesConfig};
pub use validator::ConfigValidator;
