//! Configuration merging and precedence handling.

use crate::config::schema::{Config, FilesConfig};
use crate::record::RecordKind;

/// Merges configuration layers according to precedence rules.
///
/// # Examples
///
/// ```
/// use innkeep::config::{Config, ConfigMerger};
///
/// let low = Config { currency_symbol: Some("S$".to_string()), ..Default::default() };
/// let high = Config { currency_symbol: Some("USD".to_string()), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.currency_symbol(), "USD");
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge configuration layers into a final config.
    ///
    /// Layers should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge<'a>(layers: impl IntoIterator<Item = &'a Config>) -> Config {
        let mut result = Config::default();
        for layer in layers {
            Self::merge_into(&mut result, layer);
        }
        result
    }

    /// Merge `source` into `target` (source overwrites target where set).
    ///
    /// The file table is merged per record type, so a layer that renames only
    /// the room file keeps every other filename from lower layers.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.currency_symbol.is_some() {
            target.currency_symbol.clone_from(&source.currency_symbol);
        }

        if source.expiry_grace_hours.is_some() {
            target.expiry_grace_hours = source.expiry_grace_hours;
        }

        if source.service_charge_percent.is_some() {
            target.service_charge_percent = source.service_charge_percent;
        }

        if let Some(source_files) = &source.files {
            let target_files = target.files.get_or_insert_with(FilesConfig::default);
            Self::merge_files(target_files, source_files);
        }
    }

    fn merge_files(target: &mut FilesConfig, source: &FilesConfig) {
        for kind in RecordKind::ALL {
            if let Some(name) = source.get(kind) {
                *target.slot_mut(kind) = Some(name.to_string());
            }
        }
    }
}
