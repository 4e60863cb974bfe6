//! Moving and copying between folders.
//!
//! Both operations leave the result with exactly one parent, the
//! destination. Multi-parenting is not carried across.

use log::debug;

use crate::error::{map_remote_error, Error, Result};
use crate::filesystem::DriveFs;
use crate::path::normalize::{basename, collapse_separators, join};
use crate::path::Anchor;
use crate::record::{Fields, ObjectRecord};
use crate::remote::{ObjectUpdate, RemoteStore};

impl<S: RemoteStore> DriveFs<S> {
    /// Move the object at `path` into the folder at `dest`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `path` or `dest` does not resolve.
    /// - `AlreadyExists(dest/name)` if `dest` already holds an object with
    ///   the same name, including when `dest` is the current parent.
    ///
    /// # Examples
    ///
    /// ```
    /// use drivepath::remote::memory::MemoryStore;
    /// use drivepath::DriveFs;
    ///
    /// let fs = DriveFs::new(MemoryStore::new());
    /// fs.create("/inbox/report.pdf", None, None).unwrap();
    /// fs.ensure_folder("/archive").unwrap();
    ///
    /// fs.move_to("/inbox/report.pdf", "/archive").unwrap();
    /// assert!(fs.exists("/archive/report.pdf").unwrap());
    /// assert!(!fs.exists("/inbox/report.pdf").unwrap());
    /// ```
    pub fn move_to(&self, path: &str, dest: &str) -> Result<ObjectRecord> {
        let (source, destination) = self.relocation(path, dest)?;
        let update = ObjectUpdate::reparent(destination.id.as_str(), source.parent_ids());
        let moved = self
            .store()
            .update(&source.id, &update, &Fields::default())
            .map_err(|e| map_remote_error(e, path))?;
        debug!("moved '{}' into '{}'", path, dest);
        Ok(moved)
    }

    /// Copy the object at `path` into the folder at `dest`.
    ///
    /// # Errors
    ///
    /// Same as [`DriveFs::move_to`].
    pub fn copy_to(&self, path: &str, dest: &str) -> Result<ObjectRecord> {
        let (source, destination) = self.relocation(path, dest)?;
        let copied = self
            .store()
            .copy(&source.id, &destination.id, &Fields::default())
            .map_err(|e| map_remote_error(e, path))?;
        debug!("copied '{}' into '{}' as {}", path, dest, copied.id);
        Ok(copied)
    }

    /// Resolve both ends and make sure the name is free under `dest`.
    fn relocation(&self, path: &str, dest: &str) -> Result<(ObjectRecord, ObjectRecord)> {
        let source = self.stat(path, None)?;
        let destination = self.stat(dest, None)?;

        let target = join(
            &collapse_separators(dest),
            basename(&collapse_separators(path)),
        );
        let occupant = Anchor::child_of(source.name.as_str(), destination.id.as_str());
        match self
            .resolver()
            .stat_segment(&occupant, None, &Fields::default())
        {
            Ok(_) => Err(Error::already_exists(target)),
            Err(e) if e.is_not_found() => Ok((source, destination)),
            Err(e) => Err(e.with_filename(&target)),
        }
    }
}
