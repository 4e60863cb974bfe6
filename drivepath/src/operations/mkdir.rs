//! Idempotent folder materialization.

use log::debug;

use crate::error::{map_remote_error, Error, Result};
use crate::filesystem::DriveFs;
use crate::path::normalize;
use crate::path::{Anchor, PathComponents};
use crate::record::{Fields, ObjectRecord};
use crate::remote::{Clause, NewObject, RemoteStore};

impl<S: RemoteStore> DriveFs<S> {
    /// Return the folder at `path`, creating it and any missing ancestors.
    ///
    /// Intermediate segments are looked up as folders and created when
    /// missing. The final segment is looked up without the folder
    /// restriction, so an existing object of any type there is returned
    /// as-is. Calling this twice yields the same id and creates nothing the
    /// second time.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` tagged with `path` when a folder would have to be
    /// created without a parent: paths not anchored at `/` whose first
    /// segment does not exist, and empty segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use drivepath::remote::memory::MemoryStore;
    /// use drivepath::DriveFs;
    ///
    /// let fs = DriveFs::new(MemoryStore::new());
    /// let first = fs.ensure_folder("/a/b").unwrap();
    /// let second = fs.ensure_folder("/a/b").unwrap();
    /// assert_eq!(first.id, second.id);
    /// assert!(fs.ensure_folder("unanchored").unwrap_err().is_not_found());
    /// ```
    #[doc(alias = "get_or_create_folder")]
    #[doc(alias = "mkdir")]
    pub fn ensure_folder(&self, path: &str) -> Result<ObjectRecord> {
        self.materialize(normalize::split(path))
            .map_err(|e| e.with_filename(path))
    }

    fn materialize(&self, components: PathComponents) -> Result<ObjectRecord> {
        let (mut anchor, mut pending) = components.into_parts();
        while let Some(next) = pending.pop() {
            let folder = self.find_or_create_folder(&anchor, Some(Clause::is_folder()))?;
            anchor = Anchor::child_of(next, folder.id);
        }
        self.find_or_create_folder(&anchor, None)
    }

    fn find_or_create_folder(&self, anchor: &Anchor, filter: Option<Clause>) -> Result<ObjectRecord> {
        match self.resolver().stat_segment(anchor, filter, &Fields::default()) {
            Err(e) if e.is_not_found() => self.create_folder(anchor),
            other => other,
        }
    }

    fn create_folder(&self, anchor: &Anchor) -> Result<ObjectRecord> {
        let parent_id = match &anchor.parent_id {
            Some(parent_id) if !anchor.name.is_empty() => parent_id,
            _ => return Err(Error::not_found(anchor.name.as_str())),
        };

        let folder = self
            .store()
            .create(NewObject::folder(&anchor.name, parent_id), &Fields::default())
            .map_err(|e| map_remote_error(e, &anchor.name))?;
        debug!("created folder '{}' ({}) under {}", folder.name, folder.id, parent_id);
        Ok(folder)
    }
}
