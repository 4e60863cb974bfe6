//! Projection-driven metadata accessors.
//!
//! Each accessor is one `stat` asking for the extra field it needs.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::filesystem::DriveFs;
use crate::record::Fields;
use crate::remote::RemoteStore;

impl<S: RemoteStore> DriveFs<S> {
    /// Content size in bytes; 0 when the store reports none (folders,
    /// native documents).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `path` does not resolve.
    pub fn size(&self, path: &str) -> Result<u64> {
        let record = self.stat(path, Some(&Fields::parse("size")))?;
        Ok(record.size().unwrap_or(0))
    }

    /// Direct download link; empty when the store reports none.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `path` does not resolve.
    pub fn url(&self, path: &str) -> Result<String> {
        let record = self.stat(path, Some(&Fields::parse("webContentLink")))?;
        Ok(record.web_content_link().unwrap_or_default().to_string())
    }

    /// Creation time.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `path` does not resolve.
    pub fn created_time(&self, path: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(self
            .stat(path, Some(&Fields::parse("createdTime")))?
            .created_time())
    }

    /// Last modification time.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `path` does not resolve.
    pub fn modified_time(&self, path: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(self
            .stat(path, Some(&Fields::parse("modifiedTime")))?
            .modified_time())
    }

    /// Last access time. The store does not track reads, so this is the
    /// modification time.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `path` does not resolve.
    pub fn accessed_time(&self, path: &str) -> Result<Option<DateTime<Utc>>> {
        self.modified_time(path)
    }
}
