//! Configuration validation.
//!
//! This module checks a merged configuration before a record store is
//! opened with it.

use std::collections::HashSet;

use crate::config::schema::{Config, FilesConfig};
use crate::error::{Error, Result};
use crate::record::RecordKind;

/// Largest accepted service charge percentage.
pub const MAX_SERVICE_CHARGE_PERCENT: u32 = 100;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use innkeep::config::{Config, ConfigValidator};
///
/// let config = Config::with_defaults();
/// ConfigValidator::validate(&config).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref files) = config.files {
            Self::validate_files(files)?;
        }
        Self::validate_distinct_files(config)?;

        if let Some(ref symbol) = config.currency_symbol {
            if symbol.trim().is_empty() {
                return Err(Error::Validation {
                    field: "currency_symbol".into(),
                    message: "Currency symbol cannot be empty".into(),
                });
            }
        }

        if let Some(percent) = config.service_charge_percent {
            if percent > MAX_SERVICE_CHARGE_PERCENT {
                return Err(Error::Validation {
                    field: "service_charge_percent".into(),
                    message: format!(
                        "Service charge must be at most {MAX_SERVICE_CHARGE_PERCENT}, got {percent}"
                    ),
                });
            }
        }

        Ok(())
    }

    fn validate_files(files: &FilesConfig) -> Result<()> {
        for kind in RecordKind::ALL {
            if let Some(name) = files.get(kind) {
                Self::validate_filename(kind, name)?;
            }
        }
        Ok(())
    }

    /// Validate that a filename is a plain name inside the data directory.
    fn validate_filename(kind: RecordKind, name: &str) -> Result<()> {
        let field = format!("files.{}", kind.config_key());

        if name.trim().is_empty() {
            return Err(Error::Validation {
                field,
                message: "Filename cannot be empty".into(),
            });
        }

        if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
            return Err(Error::Validation {
                field,
                message: format!("Filename '{name}' must not contain path separators"),
            });
        }

        Ok(())
    }

    /// Two record types sharing a file would overwrite each other.
    fn validate_distinct_files(config: &Config) -> Result<()> {
        let mut seen = HashSet::new();
        for kind in RecordKind::ALL {
            let name = config.file_for(kind);
            if !seen.insert(name) {
                return Err(Error::Validation {
                    field: format!("files.{}", kind.config_key()),
                    message: format!("Filename '{name}' is used by more than one record type"),
                });
            }
        }
        Ok(())
    }
}
