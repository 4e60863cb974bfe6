//! Configuration schema definitions.
//!
//! [`Config`] is the file/environment form: every field optional so layers
//! can be merged. [`Settings`] is the resolved form the filesystem uses.

use serde::{Deserialize, Serialize};

/// Default bytes per resumable upload request.
pub const DEFAULT_UPLOAD_CHUNK_SIZE: usize = 512 * 1024;

/// Upload chunks must be a multiple of this size.
pub const UPLOAD_CHUNK_GRANULARITY: usize = 256 * 1024;

/// Default bytes per download request.
pub const DEFAULT_DOWNLOAD_CHUNK_SIZE: usize = 100 * 1024 * 1024;

/// Largest page size the store accepts.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// MIME type used when none is given and none can be guessed.
pub const DEFAULT_UNKNOWN_MIME_TYPE: &str = "application/octet-stream";

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use drivepath::config::Config;
///
/// let config: Config = serde_yaml::from_str("page_size: 50\n").unwrap();
/// assert_eq!(config.page_size, Some(50));
/// assert_eq!(config.resolve().page_size, Some(50));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Bytes sent per resumable upload request.
    pub upload_chunk_size: Option<usize>,

    /// Bytes fetched per download request.
    pub download_chunk_size: Option<usize>,

    /// Records requested per listing page; unset leaves it to the store.
    pub page_size: Option<u32>,

    /// MIME type for uploads whose type cannot be guessed.
    pub unknown_mime_type: Option<String>,

    /// Log a warning when a listing may be incomplete.
    pub warn_incomplete_listing: Option<bool>,
}

impl Config {
    /// Fill unset fields with defaults.
    #[must_use]
    pub fn resolve(&self) -> Settings {
        let defaults = Settings::default();
        Settings {
            upload_chunk_size: self.upload_chunk_size.unwrap_or(defaults.upload_chunk_size),
            download_chunk_size: self
                .download_chunk_size
                .unwrap_or(defaults.download_chunk_size),
            page_size: self.page_size.or(defaults.page_size),
            unknown_mime_type: self
                .unknown_mime_type
                .clone()
                .unwrap_or(defaults.unknown_mime_type),
            warn_incomplete_listing: self
                .warn_incomplete_listing
                .unwrap_or(defaults.warn_incomplete_listing),
        }
    }
}

/// Resolved settings used by [`crate::DriveFs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Bytes sent per resumable upload request.
    pub upload_chunk_size: usize,
    /// Bytes fetched per download request.
    pub download_chunk_size: usize,
    /// Records requested per listing page.
    pub page_size: Option<u32>,
    /// MIME type for uploads whose type cannot be guessed.
    pub unknown_mime_type: String,
    /// Log a warning when a listing may be incomplete.
    pub warn_incomplete_listing: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            upload_chunk_size: DEFAULT_UPLOAD_CHUNK_SIZE,
            download_chunk_size: DEFAULT_DOWNLOAD_CHUNK_SIZE,
            page_size: None,
            unknown_mime_type: DEFAULT_UNKNOWN_MIME_TYPE.to_string(),
            warn_incomplete_listing: true,
        }
    }
}
