//! The filesystem-semantics facade.

use crate::config::Settings;
use crate::error::Result;
use crate::path::PathResolver;
use crate::record::{Fields, ObjectRecord};
use crate::remote::RemoteStore;

/// POSIX-style path operations over a [`RemoteStore`].
///
/// The store is handed in at construction; nothing is created lazily and
/// nothing is cached between calls. Every operation resolves its paths from
/// scratch, so two calls never disagree because of stale local state, but
/// a check followed by a mutation is not atomic.
///
/// Any store works: a concrete store, a reference to one, or a
/// `Box<dyn RemoteStore>`.
///
/// # Examples
///
/// ```
/// use drivepath::remote::memory::MemoryStore;
/// use drivepath::DriveFs;
///
/// let fs = DriveFs::new(MemoryStore::new());
/// let file = fs.upload("/reports/2020/q1.csv", &b"a,b\n1,2\n"[..], None).unwrap();
/// assert_eq!(file.mime_type, "text/csv");
/// assert_eq!(fs.download("/reports/2020/q1.csv").unwrap(), b"a,b\n1,2\n");
/// assert!(fs.create("/reports/2020/q1.csv", None, None).unwrap_err().is_already_exists());
/// ```
#[derive(Debug)]
pub struct DriveFs<S> {
    store: S,
    settings: Settings,
}

impl<S: RemoteStore> DriveFs<S> {
    /// A filesystem over `store` with default settings.
    pub fn new(store: S) -> Self {
        Self::with_settings(store, Settings::default())
    }

    /// A filesystem over `store` with explicit settings.
    pub fn with_settings(store: S, settings: Settings) -> Self {
        Self { store, settings }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The active settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Give the store back.
    pub fn into_store(self) -> S {
        self.store
    }

    /// A resolver borrowing this filesystem's store.
    #[must_use]
    pub fn resolver(&self) -> PathResolver<'_, S> {
        PathResolver::new(&self.store)
    }

    /// Resolve `path` to its record, fetching `fields` for the final segment.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` tagged with `path` if it does not resolve.
    pub fn stat(&self, path: &str, fields: Option<&Fields>) -> Result<ObjectRecord> {
        self.resolver().stat(path, fields)
    }

    /// [`DriveFs::stat`] with the default projection.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` tagged with `path` if it does not resolve.
    pub fn resolve(&self, path: &str) -> Result<ObjectRecord> {
        self.stat(path, None)
    }

    /// Whether `path` resolves.
    ///
    /// # Errors
    ///
    /// Failures other than `NotFound` propagate.
    pub fn exists(&self, path: &str) -> Result<bool> {
        self.resolver().exists(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::memory::MemoryStore;

    #[test]
    fn test_works_over_borrowed_and_boxed_stores() {
        let store = MemoryStore::new();
        store.insert_folder("a", Some("root"));

        let borrowed = DriveFs::new(&store);
        assert!(borrowed.exists("/a").unwrap());

        let boxed: DriveFs<Box<dyn RemoteStore>> = DriveFs::new(Box::new(MemoryStore::new()));
        assert!(!boxed.exists("/a").unwrap());
    }

    #[test]
    fn test_resolve_root() {
        let fs = DriveFs::new(MemoryStore::new());
        let root = fs.resolve("/").unwrap();
        assert_eq!(root.id, fs.store().root_id());
    }

    #[test]
    fn test_settings_are_kept() {
        let settings = Settings {
            page_size: Some(3),
            ..Settings::default()
        };
        let fs = DriveFs::with_settings(MemoryStore::new(), settings.clone());
        assert_eq!(fs.settings(), &settings);
        assert!(fs.into_store().is_empty());
    }
}
