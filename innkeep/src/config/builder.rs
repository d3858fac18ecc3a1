//! Layered configuration assembly.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds a [`Config`] from built-in defaults, the data directory's
/// `config.yaml`, `INNKEEP_*` environment variables and programmatic
/// overrides, in increasing order of precedence.
///
/// # Examples
///
/// ```
/// use innkeep::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config {
///         expiry_grace_hours: Some(3),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.expiry_grace_hours(), 3);
/// assert_eq!(config.currency_symbol(), "S$");
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Creates a builder that reads every layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory searched for `config.yaml`.
    ///
    /// Without a data directory no file layer is read.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(data_dir.as_ref().to_path_buf());
        self
    }

    /// Skip the `config.yaml` layer.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Skip the environment layer.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Adds a programmatic layer with the highest precedence.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Assembles and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `config.yaml` cannot be read or parsed, if an
    /// environment variable is malformed, or if the merged result fails
    /// validation.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::with_defaults();

        if !self.skip_files {
            if let Some(dir) = &self.data_dir {
                if let Some(source) = ConfigLoader::load_from_data_dir(dir)? {
                    ConfigMerger::merge_into(&mut config, &source.config);
                }
            }
        }

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(overrides) = &self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::environment::CURRENCY_SYMBOL_ENV;
    use crate::config::loader::CONFIG_FILE_NAME;
    use serial_test::serial;
    use std::{env, fs};
    use tempfile::TempDir;

    #[test]
    fn test_defaults_only() {
        let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
        assert_eq!(config, Config::with_defaults());
    }

    #[test]
    fn test_file_layer_applied() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "expiry_grace_hours: 5\n").unwrap();

        let config = ConfigBuilder::new()
            .with_data_dir(dir.path())
            .skip_env()
            .build()
            .unwrap();
        assert_eq!(config.expiry_grace_hours(), 5);
    }

    #[test]
    fn test_invalid_merged_config_rejected() {
        let result = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_config(Config {
                service_charge_percent: Some(250),
                ..Default::default()
            })
            .build();
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_precedence_programmatic_over_env_over_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "currency_symbol: FILE\nexpiry_grace_hours: 2\n",
        )
        .unwrap();
        env::set_var(CURRENCY_SYMBOL_ENV, "ENV");

        let from_env = ConfigBuilder::new()
            .with_data_dir(dir.path())
            .build()
            .unwrap();
        assert_eq!(from_env.currency_symbol(), "ENV");
        assert_eq!(from_env.expiry_grace_hours(), 2);

        let programmatic = ConfigBuilder::new()
            .with_data_dir(dir.path())
            .with_config(Config {
                currency_symbol: Some("CODE".to_string()),
                ..Default::default()
            })
            .build()
            .unwrap();
        assert_eq!(programmatic.currency_symbol(), "CODE");

        env::remove_var(CURRENCY_SYMBOL_ENV);
    }
}
