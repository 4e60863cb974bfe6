//! Renaming in place.

use log::debug;

use crate::error::{map_remote_error, Error, Result};
use crate::filesystem::DriveFs;
use crate::path::normalize::{collapse_separators, dirname, join, SEPARATOR};
use crate::path::Anchor;
use crate::record::{Fields, ObjectRecord};
use crate::remote::{ObjectUpdate, RemoteStore};

impl<S: RemoteStore> DriveFs<S> {
    /// Give the object at `path` a new name under the same parent.
    ///
    /// The collision check looks for `new_name` under the object's first
    /// parent, or among unparented objects when it has none. Renaming to the
    /// current name counts as a collision.
    ///
    /// # Errors
    ///
    /// - `Validation` if `new_name` is empty or contains `/`.
    /// - `NotFound(path)` if `path` does not resolve.
    /// - `AlreadyExists(dir/new_name)` if a sibling already has the name.
    ///
    /// # Examples
    ///
    /// ```
    /// use drivepath::remote::memory::MemoryStore;
    /// use drivepath::DriveFs;
    ///
    /// let fs = DriveFs::new(MemoryStore::new());
    /// fs.create("/docs/draft.txt", None, None).unwrap();
    /// fs.rename("/docs/draft.txt", "final.txt").unwrap();
    /// assert!(fs.exists("/docs/final.txt").unwrap());
    ///
    /// fs.create("/docs/draft.txt", None, None).unwrap();
    /// let err = fs.rename("/docs/draft.txt", "final.txt").unwrap_err();
    /// assert_eq!(err.filename(), Some("/docs/final.txt"));
    /// ```
    pub fn rename(&self, path: &str, new_name: &str) -> Result<ObjectRecord> {
        if new_name.is_empty() || new_name.contains(SEPARATOR) {
            return Err(Error::Validation {
                field: "new_name".into(),
                message: format!("'{new_name}' is not a single path segment"),
            });
        }

        let source = self.stat(path, None)?;
        let target = join(dirname(&collapse_separators(path)), new_name);
        let sibling = match source.first_parent() {
            Some(parent_id) => Anchor::child_of(new_name, parent_id),
            None => Anchor::unparented(new_name),
        };

        match self
            .resolver()
            .stat_segment(&sibling, None, &Fields::default())
        {
            Ok(_) => return Err(Error::already_exists(target)),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e.with_filename(&target)),
        }

        let renamed = self
            .store()
            .update(&source.id, &ObjectUpdate::rename(new_name), &Fields::default())
            .map_err(|e| map_remote_error(e, path))?;
        debug!("renamed '{}' to '{}'", path, target);
        Ok(renamed)
    }
}
