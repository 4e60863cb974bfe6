//! Object creation under a materialized folder chain.

use log::debug;

use crate::error::{map_remote_error, Error, Result};
use crate::filesystem::DriveFs;
use crate::path::normalize::{collapse_separators, split_last};
use crate::record::{Fields, ObjectRecord};
use crate::remote::{Media, NewObject, RemoteStore};

impl<S: RemoteStore> DriveFs<S> {
    /// Create an object at `path`, creating missing parent folders first.
    ///
    /// `mime_type` of `None` lets the store decide, or takes the media's
    /// type when `media` is given.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists(path)` if `path` already resolves.
    /// - `NotFound(path)` if the final segment is empty or the parent chain
    ///   cannot be materialized (e.g. an unanchored path).
    pub fn create(
        &self,
        path: &str,
        mime_type: Option<&str>,
        media: Option<Media>,
    ) -> Result<ObjectRecord> {
        match self.stat(path, None) {
            Ok(_) => return Err(Error::already_exists(path)),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }

        let normalized = collapse_separators(path);
        let (dir, name) = split_last(&normalized);
        if name.is_empty() {
            return Err(Error::not_found(path));
        }

        let parent = self.ensure_folder(dir).map_err(|e| {
            if e.is_not_found() {
                e.with_filename(path)
            } else {
                e
            }
        })?;

        let object = NewObject {
            name: name.to_string(),
            mime_type: mime_type.map(str::to_string),
            parents: vec![parent.id],
            media,
        };
        let created = self
            .store()
            .create(object, &Fields::default())
            .map_err(|e| map_remote_error(e, path))?;
        debug!("created '{}' as {}", path, created.id);
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use crate::filesystem::DriveFs;
    use crate::record::FOLDER_MIME_TYPE;
    use crate::remote::memory::{CallKind, MemoryStore, RemoteCall};
    use crate::remote::{Media, RemoteError};

    #[test]
    fn test_create_materializes_parents() {
        let store = MemoryStore::new();
        let fs = DriveFs::new(&store);
        let rec = fs.create("/a/b/c.txt", Some("text/plain"), None).unwrap();
        assert_eq!(rec.name, "c.txt");
        assert_eq!(rec.mime_type, "text/plain");
        assert_eq!(rec.parents, Some(vec![store.ids_named("b")[0].clone()]));

        let creates: Vec<(String, bool)> = store
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                RemoteCall::Create { name, folder, .. } => Some((name, folder)),
                _ => None,
            })
            .collect();
        assert_eq!(
            creates,
            vec![
                ("a".to_string(), true),
                ("b".to_string(), true),
                ("c.txt".to_string(), false)
            ]
        );
    }

    #[test]
    fn test_create_existing_path_fails() {
        let store = MemoryStore::new();
        let fs = DriveFs::new(&store);
        fs.create("/doc", None, None).unwrap();
        let err = fs.create("/doc", None, None).unwrap_err();
        assert!(err.is_already_exists());
        assert_eq!(err.filename(), Some("/doc"));
    }

    #[test]
    fn test_create_folder_by_mime_type() {
        let store = MemoryStore::new();
        let fs = DriveFs::new(&store);
        let rec = fs.create("/dir", Some(FOLDER_MIME_TYPE), None).unwrap();
        assert!(rec.is_folder());
        assert!(fs.stat("/dir", None).unwrap().is_folder());
    }

    #[test]
    fn test_create_with_media() {
        let store = MemoryStore::new();
        let fs = DriveFs::new(&store);
        let media = Media::resumable("text/plain", &b"payload"[..], 262_144);
        let rec = fs.create("/p.txt", None, Some(media)).unwrap();
        assert_eq!(rec.mime_type, "text/plain");
        assert_eq!(store.content(&rec.id).unwrap(), b"payload");
    }

    #[test]
    fn test_create_empty_name_refused() {
        let store = MemoryStore::new();
        let fs = DriveFs::new(&store);
        for path in ["", "/a/"] {
            let err = fs.create(path, None, None).unwrap_err();
            assert!(err.is_not_found(), "{path}");
            assert_eq!(err.filename(), Some(path));
        }
        assert_eq!(store.count(CallKind::Create), 0);
    }

    #[test]
    fn test_create_unanchored_path_refused() {
        let store = MemoryStore::new();
        let fs = DriveFs::new(&store);
        let err = fs.create("loose.txt", None, None).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.filename(), Some("loose.txt"));
        assert_eq!(store.count(CallKind::Create), 0);
    }

    #[test]
    fn test_create_remote_failure_passes_through() {
        let store = MemoryStore::new();
        let fs = DriveFs::new(&store);
        store.fail_next(CallKind::Create, RemoteError::new(429, "rate limited"));
        let err = fs.create("/x", None, None).unwrap_err();
        assert!(err.filename().is_none());
        assert!(err.to_string().contains("rate limited"));
    }
}
