//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including data directory resolution, configuration loading, opening the
//! record store, argument parsing and output formatting.

use crate::error::CliError;
use chrono::NaiveDateTime;
use innkeep::entities::reservation::DATE_FORMAT;
use innkeep::entities::Reservation;
use innkeep::error::Error as LibError;
use innkeep::store::resolve_data_dir;
use innkeep::{Config, ConfigBuilder, Record, RecordStore, StoreConfig};
use std::path::PathBuf;
use std::str::FromStr;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,
}

/// Resolve the data directory from global options.
///
/// Priority: `--data-dir` > `INNKEEP_DATA_DIR` > `~/.innkeep`.
pub fn data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    resolve_data_dir(global.data_dir.as_deref()).map_err(|e| CliError::Config(e.to_string()))
}

/// Load layered configuration for the data directory.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables
/// 2. `config.yaml` in the data directory
/// 3. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    ConfigBuilder::new()
        .with_data_dir(data_dir(global)?)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open the record store with the layered configuration.
pub fn open_store(global: &GlobalOptions) -> Result<RecordStore, CliError> {
    let config = load_configuration(global)?;
    let store = RecordStore::open(StoreConfig::new(data_dir(global)?).with_config(config))?;

    if !global.quiet {
        for kind in store.malformed_kinds() {
            eprintln!(
                "Warning: {} could not be read and was loaded as empty",
                store.path_for(*kind).display()
            );
        }
    }

    Ok(store)
}

/// Find a reservation by its code.
pub fn find_reservation(store: &RecordStore, code: &str) -> Result<Record<Reservation>, CliError> {
    store
        .lookup::<Reservation>("reservationCode", code)
        .ok_or_else(|| {
            CliError::from(LibError::NotFound {
                resource: format!("reservation {code}"),
            })
        })
}

/// Parse a symbolic value leniently: case-insensitive, `-` for `_`.
pub fn parse_symbolic<T: FromStr<Err = String>>(s: &str) -> Result<T, String> {
    s.trim().to_uppercase().replace('-', "_").parse()
}

/// Parse a date-time in the `YYYY-MM-DD HHMM` form reservations use.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| format!("expected a date like '2099-01-01 1400', got '{s}'"))
}

/// Format a date-time for display.
pub fn format_datetime(at: NaiveDateTime) -> String {
    at.format(DATE_FORMAT).to_string()
}

/// Format an amount with the configured currency symbol.
pub fn format_money(currency: &str, amount: f64) -> String {
    format!("{currency}{amount:.2}")
}

/// Wrap a `csv` writer error.
pub fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Wrap a `serde_json` writer error.
pub fn json_error(e: serde_json::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}
