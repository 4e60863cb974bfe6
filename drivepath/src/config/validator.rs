//! Configuration validation.

use crate::config::schema::{Config, MAX_PAGE_SIZE, UPLOAD_CHUNK_GRANULARITY};
use crate::error::{Error, Result};

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use drivepath::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { page_size: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate every field that is set.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first invalid field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(size) = config.upload_chunk_size {
            Self::validate_upload_chunk_size(size)?;
        }

        if let Some(size) = config.download_chunk_size {
            if size == 0 {
                return Err(Error::Validation {
                    field: "download_chunk_size".into(),
                    message: "Chunk size must be greater than 0".into(),
                });
            }
        }

        if let Some(size) = config.page_size {
            if !(1..=MAX_PAGE_SIZE).contains(&size) {
                return Err(Error::Validation {
                    field: "page_size".into(),
                    message: format!("Page size must be between 1 and {MAX_PAGE_SIZE}"),
                });
            }
        }

        if let Some(ref mime) = config.unknown_mime_type {
            Self::validate_mime_type("unknown_mime_type", mime)?;
        }

        Ok(())
    }

    /// Resumable uploads send whole multiples of 256 KiB.
    fn validate_upload_chunk_size(size: usize) -> Result<()> {
        if size == 0 || size % UPLOAD_CHUNK_GRANULARITY != 0 {
            return Err(Error::Validation {
                field: "upload_chunk_size".into(),
                message: format!(
                    "Chunk size must be a positive multiple of {UPLOAD_CHUNK_GRANULARITY} bytes"
                ),
            });
        }
        Ok(())
    }

    fn validate_mime_type(field: &str, mime: &str) -> Result<()> {
        let valid = mime
            .split_once('/')
            .is_some_and(|(kind, sub)| !kind.trim().is_empty() && !sub.trim().is_empty());
        if !valid {
            return Err(Error::Validation {
                field: field.into(),
                message: format!("'{mime}' is not a MIME type (expected type/subtype)"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::DEFAULT_UPLOAD_CHUNK_SIZE;

    fn field_of(result: Result<()>) -> String {
        match result {
            Err(Error::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = Config {
            upload_chunk_size: Some(DEFAULT_UPLOAD_CHUNK_SIZE),
            download_chunk_size: Some(1),
            page_size: Some(MAX_PAGE_SIZE),
            unknown_mime_type: Some("application/octet-stream".into()),
            warn_incomplete_listing: Some(true),
        };
        ConfigValidator::validate(&config).unwrap();
    }

    #[test]
    fn test_upload_chunk_size_granularity() {
        for size in [0, 1000, UPLOAD_CHUNK_GRANULARITY + 1] {
            let config = Config {
                upload_chunk_size: Some(size),
                ..Default::default()
            };
            assert_eq!(field_of(ConfigValidator::validate(&config)), "upload_chunk_size");
        }
        let config = Config {
            upload_chunk_size: Some(3 * UPLOAD_CHUNK_GRANULARITY),
            ..Default::default()
        };
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_zero_download_chunk_size() {
        let config = Config {
            download_chunk_size: Some(0),
            ..Default::default()
        };
        assert_eq!(field_of(ConfigValidator::validate(&config)), "download_chunk_size");
    }

    #[test]
    fn test_page_size_bounds() {
        for size in [0, MAX_PAGE_SIZE + 1] {
            let config = Config {
                page_size: Some(size),
                ..Default::default()
            };
            assert_eq!(field_of(ConfigValidator::validate(&config)), "page_size");
        }
    }

    #[test]
    fn test_mime_type_shape() {
        for mime in ["", "text", "text/", "/plain"] {
            let config = Config {
                unknown_mime_type: Some(mime.into()),
                ..Default::default()
            };
            assert_eq!(field_of(ConfigValidator::validate(&config)), "unknown_mime_type");
        }
    }
}
