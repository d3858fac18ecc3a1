//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `INNKEEP_*` environment variables that
//! override configuration file values.

use std::env;

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Overrides the currency symbol.
pub const CURRENCY_SYMBOL_ENV: &str = "INNKEEP_CURRENCY_SYMBOL";
/// Overrides the expiry grace period in hours.
pub const EXPIRY_GRACE_HOURS_ENV: &str = "INNKEEP_EXPIRY_GRACE_HOURS";
/// Overrides the service charge percentage.
pub const SERVICE_CHARGE_PERCENT_ENV: &str = "INNKEEP_SERVICE_CHARGE_PERCENT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use innkeep::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not hold a non-negative
    /// integer.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(symbol) = env::var(CURRENCY_SYMBOL_ENV) {
            config.currency_symbol = Some(symbol);
        }

        if let Ok(hours) = env::var(EXPIRY_GRACE_HOURS_ENV) {
            config.expiry_grace_hours = Some(Self::parse_count(EXPIRY_GRACE_HOURS_ENV, &hours)?);
        }

        if let Ok(percent) = env::var(SERVICE_CHARGE_PERCENT_ENV) {
            config.service_charge_percent =
                Some(Self::parse_count(SERVICE_CHARGE_PERCENT_ENV, &percent)?);
        }

        Ok(())
    }

    fn parse_count(field: &str, s: &str) -> Result<u32> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("Must be a non-negative integer, got '{s}'"),
        })
    }
}
