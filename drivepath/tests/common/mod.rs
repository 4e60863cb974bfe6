//! Common test utilities for integration tests.
//!
//! This module provides a fixture builder for populating a `MemoryStore`
//! with a known tree, plus a few assertion helpers.

use drivepath::remote::memory::{CallKind, MemoryStore};
use drivepath::{DriveFs, Error, ErrorKind};

/// Builder for an in-memory drive with a prepared tree.
///
/// Paths starting with `/` hang under the root; others are unparented,
/// as if shared into the drive from outside. Folders are created as needed
/// along the way; files are always added, so adding the same file path twice
/// leaves two objects with one name.
///
/// # Examples
///
/// ```no_run
/// # use common::DriveFixture;
/// let store = DriveFixture::new()
///     .folder("/projects/alpha")
///     .file("/projects/alpha/notes.txt", b"hello")
///     .build();
/// ```
#[allow(dead_code)]
pub struct DriveFixture {
    store: MemoryStore,
}

#[allow(dead_code)]
impl DriveFixture {
    /// An empty drive.
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
        }
    }

    /// An empty drive serving `page_size` records per listing page.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            store: MemoryStore::new().with_page_size(page_size),
        }
    }

    /// Make sure every folder along `path` exists.
    pub fn folder(self, path: &str) -> Self {
        self.chain(path);
        self
    }

    /// Add a plain-text file at `path`, creating its folders.
    pub fn file(self, path: &str, content: &[u8]) -> Self {
        let (dir, name) = path.rsplit_once('/').unwrap_or(("", path));
        let parent = self.chain_for(path.starts_with('/'), dir);
        self.store
            .insert_file(name, "text/plain", parent.as_deref(), content);
        self
    }

    /// Finish and hand back the store.
    pub fn build(self) -> MemoryStore {
        self.store.clear_calls();
        self.store
    }

    fn chain(&self, path: &str) -> Option<String> {
        self.chain_for(path.starts_with('/'), path)
    }

    /// Walk `path` folder by folder, reusing folders that already exist.
    fn chain_for(&self, rooted: bool, path: &str) -> Option<String> {
        let mut parent = rooted.then(|| self.store.root_id());
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let existing = self.store.ids_named(segment).into_iter().find(|id| {
                self.store.record(id).is_some_and(|record| {
                    record.is_folder() && record.first_parent() == parent.as_deref()
                })
            });
            parent = Some(match existing {
                Some(id) => id,
                None => self.store.insert_folder(segment, parent.as_deref()),
            });
        }
        parent
    }
}

/// A filesystem over a borrowed store with default settings.
#[allow(dead_code)]
pub fn drive(store: &MemoryStore) -> DriveFs<&MemoryStore> {
    DriveFs::new(store)
}

/// Assert that `result` failed with `kind` about `filename`.
#[allow(dead_code)]
pub fn assert_fs_error<T: std::fmt::Debug>(
    result: Result<T, Error>,
    kind: ErrorKind,
    filename: &str,
) {
    let err = result.unwrap_err();
    assert_eq!(err.kind(), kind, "unexpected error: {err}");
    assert_eq!(err.filename(), Some(filename), "unexpected error: {err}");
}

/// Number of mutating calls issued against `store`.
#[allow(dead_code)]
pub fn mutation_count(store: &MemoryStore) -> usize {
    [CallKind::Create, CallKind::Update, CallKind::Delete, CallKind::Copy]
        .into_iter()
        .map(|kind| store.count(kind))
        .sum()
}
