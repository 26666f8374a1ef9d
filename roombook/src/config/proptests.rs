//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat};
use super::validator::ConfigValidator;
use proptest::prelude::*;

fn output_format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Table),
        Just(OutputFormat::Json),
        Just(OutputFormat::Csv),
        Just(OutputFormat::Tsv),
    ]
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(0u32..=500),
        prop::option::of(0u32..=500),
        prop::option::of(0u64..=120),
        prop::option::of(any::<bool>()),
        prop::option::of(output_format_strategy()),
    )
        .prop_map(
            |(default_page_size, max_page_size, lock_wait, autoinit, output_format)| Config {
                default_page_size,
                max_page_size,
                maximum_lock_wait_seconds: lock_wait,
                disable_autoinit: autoinit,
                output_format,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Set fields from the higher-precedence source always win
    #[test]
    fn merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(merged.default_page_size, high.default_page_size.or(low.default_page_size));
        prop_assert_eq!(merged.max_page_size, high.max_page_size.or(low.max_page_size));
        prop_assert_eq!(
            merged.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );
        prop_assert_eq!(merged.disable_autoinit, high.disable_autoinit.or(low.disable_autoinit));
        prop_assert_eq!(merged.output_format, high.output_format.or(low.output_format));
    }

    // Merging into itself is a no-op
    #[test]
    fn merge_idempotent(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &config);
        prop_assert_eq!(merged, config);
    }

    // Accepted configurations always yield usable search defaults
    #[test]
    fn valid_config_yields_resolvable_defaults(config in config_strategy()) {
        if ConfigValidator::validate(&config).is_ok() {
            let defaults = config.search_defaults();
            prop_assert!(defaults.page_size > 0);
            if let Some(max) = defaults.max_page_size {
                prop_assert!(defaults.page_size <= max);
            }
            prop_assert!(config.lock_wait().as_secs() > 0);
        }
    }

    // Configurations survive a YAML round trip
    #[test]
    fn yaml_round_trip(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(parsed, config);
    }
}
