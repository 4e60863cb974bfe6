//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::{Config, UPLOAD_CHUNK_GRANULARITY};
use super::validator::ConfigValidator;
use proptest::prelude::*;

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(1usize..64),
        prop::option::of(1usize..1 << 30),
        prop::option::of(1u32..=1000),
        prop::option::of("(text|application|image)/[a-z]{1,10}"),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(chunks, download, page, mime, warn)| Config {
            upload_chunk_size: chunks.map(|n| n * UPLOAD_CHUNK_GRANULARITY),
            download_chunk_size: download,
            page_size: page,
            unknown_mime_type: mime,
            warn_incomplete_listing: warn,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 2000,
        .. ProptestConfig::default()
    })]

    // Set fields of the higher layer always win, unset ones never clobber
    #[test]
    fn merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(merged.page_size, high.page_size.or(low.page_size));
        prop_assert_eq!(merged.upload_chunk_size, high.upload_chunk_size.or(low.upload_chunk_size));
        prop_assert_eq!(merged.download_chunk_size, high.download_chunk_size.or(low.download_chunk_size));
        prop_assert_eq!(merged.unknown_mime_type, high.unknown_mime_type.or(low.unknown_mime_type));
        prop_assert_eq!(merged.warn_incomplete_listing, high.warn_incomplete_listing.or(low.warn_incomplete_listing));
    }

    // Merging with itself changes nothing
    #[test]
    fn merge_idempotent(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &config);
        prop_assert_eq!(merged, config);
    }

    // Generated configs are valid, and so is any merge of them
    #[test]
    fn merge_preserves_validity(low in config_strategy(), high in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&low).is_ok());
        let mut merged = low;
        ConfigMerger::merge_into(&mut merged, &high);
        prop_assert!(ConfigValidator::validate(&merged).is_ok());
    }
}
