//! Lazy, paged listing of a container's children.

use std::fmt;
use std::iter::FusedIterator;
use std::vec;

use log::{debug, warn};

use crate::error::{map_remote_error, Result};
use crate::filesystem::DriveFs;
use crate::path::normalize::{collapse_separators, ROOT};
use crate::record::{Fields, ObjectRecord, ROOT_ID};
use crate::remote::{Clause, Query, QueryRequest, RemoteStore};

/// Children of one container, fetched a page at a time.
///
/// A page is requested only once the previous page's records are used up,
/// so stopping early saves the remaining round-trips. The iterator is
/// single-pass and ends after the first error.
pub struct ListIter<'a, S: RemoteStore + ?Sized> {
    store: &'a S,
    path: String,
    /// `None` once the last page has been fetched.
    request: Option<QueryRequest>,
    buffer: vec::IntoIter<ObjectRecord>,
    warn_incomplete: bool,
    pages: usize,
}

impl<'a, S: RemoteStore + ?Sized> ListIter<'a, S> {
    fn new(store: &'a S, path: &str, request: QueryRequest, warn_incomplete: bool) -> Self {
        Self {
            store,
            path: path.to_string(),
            request: Some(request),
            buffer: Vec::new().into_iter(),
            warn_incomplete,
            pages: 0,
        }
    }

    /// Pages fetched so far.
    #[must_use]
    pub fn pages_fetched(&self) -> usize {
        self.pages
    }

    fn fetch_page(&mut self) -> Option<Result<()>> {
        let request = self.request.as_ref()?;
        let page = match self.store.query(request) {
            Ok(page) => page,
            Err(e) => {
                self.request = None;
                return Some(Err(map_remote_error(e, &self.path)));
            }
        };
        self.pages += 1;
        debug!(
            "listing '{}': page {} with {} records",
            self.path,
            self.pages,
            page.files.len()
        );

        if page.incomplete_search && self.warn_incomplete {
            warn!("listing of '{}' may be incomplete", self.path);
            self.warn_incomplete = false;
        }

        match page.next_page_token {
            Some(token) => {
                if let Some(request) = self.request.as_mut() {
                    request.page_token = Some(token);
                }
            }
            None => self.request = None,
        }
        self.buffer = page.files.into_iter();
        Some(Ok(()))
    }
}

impl<S: RemoteStore + ?Sized> Iterator for ListIter<'_, S> {
    type Item = Result<ObjectRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.buffer.next() {
                return Some(Ok(record));
            }
            if let Err(e) = self.fetch_page()? {
                return Some(Err(e));
            }
        }
    }
}

impl<S: RemoteStore + ?Sized> FusedIterator for ListIter<'_, S> {}

impl<S: RemoteStore + ?Sized> fmt::Debug for ListIter<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListIter")
            .field("path", &self.path)
            .field("pages", &self.pages)
            .field("exhausted", &self.request.is_none())
            .finish_non_exhaustive()
    }
}

impl<S: RemoteStore> DriveFs<S> {
    /// Lazily list the children of `path`.
    ///
    /// `/` lists the root container and the empty path lists objects shared
    /// into this space. Any other path is resolved first; its resolution
    /// failure is returned immediately, while remote failures on later pages
    /// surface as an `Err` item.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `path` does not resolve.
    ///
    /// # Examples
    ///
    /// ```
    /// use drivepath::remote::memory::MemoryStore;
    /// use drivepath::DriveFs;
    ///
    /// let store = MemoryStore::new().with_page_size(2);
    /// for name in ["a", "b", "c"] {
    ///     store.insert_file(name, "text/plain", Some("root"), b"");
    /// }
    /// let fs = DriveFs::new(&store);
    ///
    /// let first: Vec<_> = fs.list_children("/", None, None).unwrap().take(1).collect();
    /// assert_eq!(first.len(), 1);
    /// ```
    pub fn list_children(
        &self,
        path: &str,
        fields: Option<&Fields>,
        filter: Option<Clause>,
    ) -> Result<ListIter<'_, S>> {
        let normalized = collapse_separators(path);
        let container = if normalized.is_empty() {
            Clause::SharedWithMe
        } else if normalized == ROOT {
            Clause::InParents(ROOT_ID.to_string())
        } else {
            Clause::InParents(self.stat(path, None)?.id)
        };

        let query = Query::new().filter(filter).and(container);
        let request = QueryRequest::new(query, Fields::from(fields))
            .with_page_size(self.settings().page_size);
        Ok(ListIter::new(
            self.store(),
            path,
            request,
            self.settings().warn_incomplete_listing,
        ))
    }

    /// [`DriveFs::list_children`] with the default projection and no filter.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `path` does not resolve.
    pub fn iter(&self, path: &str) -> Result<ListIter<'_, S>> {
        self.list_children(path, None, None)
    }

    /// Collect every child of `path`.
    ///
    /// # Errors
    ///
    /// Returns the resolution failure or the first page failure.
    pub fn list(
        &self,
        path: &str,
        fields: Option<&Fields>,
        filter: Option<Clause>,
    ) -> Result<Vec<ObjectRecord>> {
        self.list_children(path, fields, filter)?.collect()
    }
}
