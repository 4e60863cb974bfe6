//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use drivepath::config::{Config, ConfigMerger};
///
/// let low = Config { page_size: Some(10), ..Default::default() };
/// let high = Config { page_size: Some(20), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.page_size, Some(20));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources given from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge `source` into `target`; every set field in `source` wins.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.upload_chunk_size.is_some() {
            target.upload_chunk_size = source.upload_chunk_size;
        }

        if source.download_chunk_size.is_some() {
            target.download_chunk_size = source.download_chunk_size;
        }

        if source.page_size.is_some() {
            target.page_size = source.page_size;
        }

        if source.unknown_mime_type.is_some() {
            target.unknown_mime_type.clone_from(&source.unknown_mime_type);
        }

        if source.warn_incomplete_listing.is_some() {
            target.warn_incomplete_listing = source.warn_incomplete_listing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn source(precedence: u8, config: Config) -> ConfigSource {
        ConfigSource {
            path: PathBuf::from(format!("/tmp/{precedence}.yaml")),
            precedence,
            config,
        }
    }

    #[test]
    fn test_unset_fields_do_not_clobber() {
        let mut target = Config {
            unknown_mime_type: Some("text/plain".into()),
            warn_incomplete_listing: Some(false),
            ..Default::default()
        };
        ConfigMerger::merge_into(&mut target, &Config::default());
        assert_eq!(target.unknown_mime_type.as_deref(), Some("text/plain"));
        assert_eq!(target.warn_incomplete_listing, Some(false));
    }

    #[test]
    fn test_merge_in_precedence_order() {
        let merged = ConfigMerger::merge(vec![
            source(
                1,
                Config {
                    page_size: Some(10),
                    upload_chunk_size: Some(262_144),
                    ..Default::default()
                },
            ),
            source(
                2,
                Config {
                    page_size: Some(20),
                    ..Default::default()
                },
            ),
        ]);
        assert_eq!(merged.page_size, Some(20));
        assert_eq!(merged.upload_chunk_size, Some(262_144));
    }

    #[test]
    fn test_merge_empty() {
        assert_eq!(ConfigMerger::merge(Vec::new()), Config::default());
    }
}
