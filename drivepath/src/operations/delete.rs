//! Object removal.

use log::debug;

use crate::error::{map_remote_error, Result};
use crate::filesystem::DriveFs;
use crate::remote::RemoteStore;

impl<S: RemoteStore> DriveFs<S> {
    /// Remove the object at `path`.
    ///
    /// # Errors
    ///
    /// - `NotFound(path)` if `path` does not resolve.
    /// - `PermissionDenied(path)` carrying the store's message if the store
    ///   refuses.
    #[doc(alias = "remove")]
    pub fn delete(&self, path: &str) -> Result<()> {
        let target = self.stat(path, None)?;
        self.store()
            .delete(&target.id)
            .map_err(|e| map_remote_error(e, path))?;
        debug!("deleted '{}' ({})", path, target.id);
        Ok(())
    }
}
