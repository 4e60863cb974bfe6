//! Environment variable handling for configuration overrides.
//!
//! Every `DRIVEPATH_*` variable overrides the matching file setting.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::env;
use std::str::FromStr;

/// Overrides `upload_chunk_size`.
pub const ENV_UPLOAD_CHUNK_SIZE: &str = "DRIVEPATH_UPLOAD_CHUNK_SIZE";
/// Overrides `download_chunk_size`.
pub const ENV_DOWNLOAD_CHUNK_SIZE: &str = "DRIVEPATH_DOWNLOAD_CHUNK_SIZE";
/// Overrides `page_size`.
pub const ENV_PAGE_SIZE: &str = "DRIVEPATH_PAGE_SIZE";
/// Overrides `unknown_mime_type`.
pub const ENV_UNKNOWN_MIME_TYPE: &str = "DRIVEPATH_UNKNOWN_MIME_TYPE";
/// Overrides `warn_incomplete_listing`.
pub const ENV_WARN_INCOMPLETE_LISTING: &str = "DRIVEPATH_WARN_INCOMPLETE_LISTING";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use drivepath::config::{Config, EnvironmentConfig};
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
    /// Returns an error if any variable holds an unparseable value.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var(ENV_UPLOAD_CHUNK_SIZE) {
            config.upload_chunk_size = Some(Self::parse_number(ENV_UPLOAD_CHUNK_SIZE, &val)?);
        }

        if let Ok(val) = env::var(ENV_DOWNLOAD_CHUNK_SIZE) {
            config.download_chunk_size = Some(Self::parse_number(ENV_DOWNLOAD_CHUNK_SIZE, &val)?);
        }

        if let Ok(val) = env::var(ENV_PAGE_SIZE) {
            config.page_size = Some(Self::parse_number(ENV_PAGE_SIZE, &val)?);
        }

        if let Ok(val) = env::var(ENV_UNKNOWN_MIME_TYPE) {
            config.unknown_mime_type = Some(val.trim().to_string());
        }

        if let Ok(val) = env::var(ENV_WARN_INCOMPLETE_LISTING) {
            config.warn_incomplete_listing = Some(Self::parse_bool(ENV_WARN_INCOMPLETE_LISTING, &val)?);
        }

        Ok(())
    }

    fn parse_number<T: FromStr>(field: &str, s: &str) -> Result<T> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("Must be a non-negative integer, got '{s}'"),
        })
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
