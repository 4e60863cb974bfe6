//! Path resolution against the remote store.
//!
//! The store can only answer "objects named N under parent P", so a path is
//! resolved as a walk: start from the outermost anchor, resolve it as a
//! folder, pair its id with the next segment, and repeat until the leaf.

use log::debug;

use crate::error::{map_remote_error, Error, Result};
use crate::path::normalize;
use crate::path::types::{Anchor, PathComponents};
use crate::record::{Fields, ObjectRecord, ROOT_ID};
use crate::remote::{Clause, Query, QueryRequest, RemoteStore};

/// Resolves paths to object records.
///
/// Nothing is cached: every call re-walks its path from the anchor.
///
/// # Examples
///
/// ```
/// use drivepath::path::PathResolver;
/// use drivepath::remote::memory::MemoryStore;
///
/// let store = MemoryStore::new();
/// let docs = store.insert_folder("docs", Some("root"));
/// store.insert_file("a.txt", "text/plain", Some(&docs), b"hello");
///
/// let resolver = PathResolver::new(&store);
/// let record = resolver.stat("//docs//a.txt", None).unwrap();
/// assert_eq!(record.name, "a.txt");
/// assert!(resolver.stat("docs/a.txt", None).unwrap_err().is_not_found());
/// ```
pub struct PathResolver<'s, S: RemoteStore + ?Sized> {
    store: &'s S,
}

impl<S: RemoteStore + ?Sized> Clone for PathResolver<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: RemoteStore + ?Sized> Copy for PathResolver<'_, S> {}

impl<'s, S: RemoteStore + ?Sized> PathResolver<'s, S> {
    /// Create a resolver over `store`.
    #[must_use]
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// The store this resolver queries.
    #[must_use]
    pub fn store(&self) -> &'s S {
        self.store
    }

    /// Resolve `path` to a single record.
    ///
    /// Intermediate segments must be folders; the leaf may be anything and
    /// is fetched with `fields` (the default projection when `None`).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` tagged with `path` when any segment fails to
    /// resolve. Other remote failures propagate.
    pub fn stat(&self, path: &str, fields: Option<&Fields>) -> Result<ObjectRecord> {
        let fields = Fields::from(fields);
        self.resolve(normalize::split(path), &fields)
            .map_err(|e| e.with_filename(path))
    }

    /// Walk already-split components down to the leaf.
    ///
    /// Errors are tagged with the failing segment; [`PathResolver::stat`]
    /// re-tags them with the caller's path.
    ///
    /// # Errors
    ///
    /// Returns the first failing hop's error.
    pub fn resolve(&self, components: PathComponents, fields: &Fields) -> Result<ObjectRecord> {
        let (mut anchor, mut pending) = components.into_parts();
        while let Some(next) = pending.pop() {
            let folder = self.stat_segment(&anchor, Some(Clause::is_folder()), &Fields::default())?;
            debug!("resolved folder '{}' -> {}", anchor.name, folder.id);
            anchor = Anchor::child_of(next, folder.id);
        }
        self.stat_segment(&anchor, None, fields)
    }

    /// Resolve a single segment.
    ///
    /// The root anchor is a direct lookup of [`ROOT_ID`]; an empty name never
    /// resolves. Otherwise one page of `name = N [and N in parents P]
    /// [and filter]` is requested and the first match wins. Without a parent
    /// only unparented objects qualify.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` tagged with the segment name when nothing matches.
    pub fn stat_segment(
        &self,
        anchor: &Anchor,
        filter: Option<Clause>,
        fields: &Fields,
    ) -> Result<ObjectRecord> {
        if anchor.is_root() {
            return self
                .store
                .get(ROOT_ID, fields)
                .map_err(|e| map_remote_error(e, &anchor.name));
        }
        if anchor.name.is_empty() {
            return Err(Error::not_found(""));
        }

        let query = Query::new()
            .filter(filter)
            .and(Clause::NameEquals(anchor.name.clone()))
            .filter(anchor.parent_id.clone().map(Clause::InParents));
        debug!("query: {query}");

        let page = self
            .store
            .query(&QueryRequest::new(query, fields.clone()))
            .map_err(|e| map_remote_error(e, &anchor.name))?;

        let unparented_only = anchor.parent_id.is_none();
        page.files
            .into_iter()
            .find(|record| !unparented_only || record.is_unparented())
            .ok_or_else(|| Error::not_found(anchor.name.as_str()))
    }

    /// Whether `path` resolves.
    ///
    /// # Errors
    ///
    /// Only `NotFound` counts as "does not exist"; any other failure
    /// propagates.
    pub fn exists(&self, path: &str) -> Result<bool> {
        match self.stat(path, None) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}
