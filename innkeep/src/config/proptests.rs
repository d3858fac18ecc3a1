//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::{Config, FilesConfig};
use super::validator::{ConfigValidator, MAX_SERVICE_CHARGE_PERCENT};
use crate::record::RecordKind;
use proptest::prelude::*;

// Strategy for generating partial file tables with distinct names
fn files_strategy() -> impl Strategy<Value = FilesConfig> {
    prop::collection::vec(prop::option::of(any::<bool>()), 6).prop_map(|picks| {
        let mut files = FilesConfig::default();
        for (kind, pick) in RecordKind::ALL.into_iter().zip(picks) {
            if pick == Some(true) {
                *files.slot_mut(kind) = Some(format!("custom-{}.txt", kind.config_key()));
            }
        }
        files
    })
}

// Strategy for generating configs
fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of("[A-Z$]{1,4}"),
        prop::option::of(0u32..48),
        prop::option::of(0u32..=MAX_SERVICE_CHARGE_PERCENT),
        prop::option::of(files_strategy()),
    )
        .prop_map(|(currency, grace, charge, files)| Config {
            files,
            currency_symbol: currency,
            expiry_grace_hours: grace,
            service_charge_percent: charge,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Configuration merging preserves non-None values from higher precedence
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(
            result.currency_symbol.as_ref(),
            high.currency_symbol.as_ref().or(low.currency_symbol.as_ref())
        );
        prop_assert_eq!(
            result.expiry_grace_hours,
            high.expiry_grace_hours.or(low.expiry_grace_hours)
        );
        prop_assert_eq!(
            result.service_charge_percent,
            high.service_charge_percent.or(low.service_charge_percent)
        );

        for kind in RecordKind::ALL {
            let expected = high
                .files
                .as_ref()
                .and_then(|f| f.get(kind))
                .or_else(|| low.files.as_ref().and_then(|f| f.get(kind)));
            prop_assert_eq!(result.files.as_ref().and_then(|f| f.get(kind)), expected);
        }
    }

    // Merging an empty layer is the identity
    #[test]
    fn config_merge_empty_is_identity(config in config_strategy()) {
        let mut result = config.clone();
        ConfigMerger::merge_into(&mut result, &Config::default());
        prop_assert_eq!(result, config);
    }

    // Anything generated on top of the defaults passes validation
    #[test]
    fn generated_configs_validate(config in config_strategy()) {
        let merged = ConfigMerger::merge([&Config::with_defaults(), &config]);
        prop_assert!(ConfigValidator::validate(&merged).is_ok());
    }

    // Service charges above the maximum are always rejected
    #[test]
    fn excessive_service_charge_rejected(charge in (MAX_SERVICE_CHARGE_PERCENT + 1)..10_000) {
        let config = Config {
            service_charge_percent: Some(charge),
            ..Config::with_defaults()
        };
        prop_assert!(ConfigValidator::validate(&config).is_err());
    }
}
