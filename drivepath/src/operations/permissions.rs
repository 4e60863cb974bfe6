//! Permission management by path.
//!
//! Only the path-to-id translation happens here; roles and grantee types
//! are passed to the store untouched.

use log::debug;

use crate::error::{map_remote_error, Result};
use crate::filesystem::DriveFs;
use crate::remote::{NewPermission, Permission, RemoteStore};

impl<S: RemoteStore> DriveFs<S> {
    /// Permissions granted on the object at `path`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `path` does not resolve, or the mapped remote
    /// failure.
    pub fn list_permissions(&self, path: &str) -> Result<Vec<Permission>> {
        let target = self.stat(path, None)?;
        self.store()
            .list_permissions(&target.id)
            .map_err(|e| map_remote_error(e, path))
    }

    /// Grant `role` to a grantee on the object at `path`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `path` does not resolve, or the mapped remote
    /// failure.
    pub fn create_permission(
        &self,
        path: &str,
        role: &str,
        grantee_type: &str,
        email_address: Option<&str>,
    ) -> Result<Permission> {
        let target = self.stat(path, None)?;
        let request = NewPermission {
            role: role.to_string(),
            grantee_type: grantee_type.to_string(),
            email_address: email_address.map(str::to_string),
        };
        let granted = self
            .store()
            .create_permission(&target.id, &request)
            .map_err(|e| map_remote_error(e, path))?;
        debug!("granted {} to {} on '{}'", role, grantee_type, path);
        Ok(granted)
    }

    /// Revoke a permission on the object at `path`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `path` or the permission does not exist.
    pub fn delete_permission(&self, path: &str, permission_id: &str) -> Result<()> {
        let target = self.stat(path, None)?;
        self.store()
            .delete_permission(&target.id, permission_id)
            .map_err(|e| map_remote_error(e, path))
    }
}

#[cfg(test)]
mod tests {
    use crate::filesystem::DriveFs;
    use crate::remote::memory::MemoryStore;

    #[test]
    fn test_grant_list_revoke() {
        let store = MemoryStore::new();
        store.insert_file("shared.doc", "text/plain", Some("root"), b"");
        let fs = DriveFs::new(&store);

        let owner = fs.list_permissions("/shared.doc").unwrap();
        assert_eq!(owner.len(), 1);
        assert_eq!(owner[0].role, "owner");

        let granted = fs
            .create_permission("/shared.doc", "reader", "user", Some("friend@example.com"))
            .unwrap();
        assert_eq!(granted.email_address.as_deref(), Some("friend@example.com"));
        assert_eq!(fs.list_permissions("/shared.doc").unwrap().len(), 2);

        fs.delete_permission("/shared.doc", &granted.id).unwrap();
        assert_eq!(fs.list_permissions("/shared.doc").unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_permission_maps_to_not_found() {
        let store = MemoryStore::new();
        store.insert_file("f", "text/plain", Some("root"), b"");
        let fs = DriveFs::new(&store);
        let err = fs.delete_permission("/f", "nope").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.filename(), Some("/f"));
    }

    #[test]
    fn test_missing_path() {
        let store = MemoryStore::new();
        let fs = DriveFs::new(&store);
        assert!(fs.list_permissions("/missing").unwrap_err().is_not_found());
    }
}
