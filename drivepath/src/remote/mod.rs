//! The remote object store interface.
//!
//! The store's native model is a sparse graph: every object carries zero or
//! more parent references and names are not unique per parent. The path
//! layer talks to it only through [`RemoteStore`], one method per remote
//! primitive. Transport, authentication and retries live behind the trait.
//!
//! [`memory::MemoryStore`] is a complete in-process implementation used by
//! tests, benches and examples.

pub mod error;
pub mod memory;
pub mod query;

use std::fmt;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::record::{Fields, ObjectRecord};

pub use error::{RemoteError, RemoteResult};
pub use query::{Clause, Query};

/// One page request against the query primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    /// Filter expression.
    pub query: Query,
    /// Projection applied to every returned record.
    pub fields: Fields,
    /// Continuation token from the previous page.
    pub page_token: Option<String>,
    /// Maximum records per page; `None` leaves it to the store.
    pub page_size: Option<u32>,
}

impl QueryRequest {
    /// A first-page request.
    #[must_use]
    pub fn new(query: Query, fields: Fields) -> Self {
        Self {
            query,
            fields,
            page_token: None,
            page_size: None,
        }
    }

    /// Set the page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }
}

/// One page of query results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectPage {
    /// Records on this page.
    #[serde(default)]
    pub files: Vec<ObjectRecord>,
    /// Token for the next page; `None` on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    /// The store could not search everything and results may be partial.
    #[serde(default)]
    pub incomplete_search: bool,
}

/// Content attached to an object on creation.
///
/// The body is consumed by a resumable transfer in `chunk_size` pieces.
pub struct Media {
    /// MIME type of the content.
    pub mime_type: String,
    /// The content source.
    pub body: Box<dyn Read + Send>,
    /// Bytes sent per transfer request.
    pub chunk_size: usize,
    /// Whether the transfer may resume after an interruption.
    pub resumable: bool,
}

impl Media {
    /// A resumable upload of `body`.
    pub fn resumable(mime_type: impl Into<String>, body: impl Read + Send + 'static, chunk_size: usize) -> Self {
        Self {
            mime_type: mime_type.into(),
            body: Box::new(body),
            chunk_size,
            resumable: true,
        }
    }
}

impl fmt::Debug for Media {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Media")
            .field("mime_type", &self.mime_type)
            .field("chunk_size", &self.chunk_size)
            .field("resumable", &self.resumable)
            .finish_non_exhaustive()
    }
}

/// Body of a create call.
#[derive(Debug)]
pub struct NewObject {
    /// Name of the new object.
    pub name: String,
    /// MIME type; `None` lets the store decide.
    pub mime_type: Option<String>,
    /// Parent ids of the new object.
    pub parents: Vec<String>,
    /// Optional content.
    pub media: Option<Media>,
}

impl NewObject {
    /// A folder named `name` under `parent_id`.
    #[must_use]
    pub fn folder(name: impl Into<String>, parent_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime_type: Some(crate::record::FOLDER_MIME_TYPE.to_string()),
            parents: vec![parent_id.into()],
            media: None,
        }
    }

    /// Whether this creates a folder.
    #[must_use]
    pub fn is_folder(&self) -> bool {
        self.mime_type.as_deref() == Some(crate::record::FOLDER_MIME_TYPE)
    }
}

/// Body of an update call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectUpdate {
    /// New name, if renaming.
    pub name: Option<String>,
    /// Parent ids to add.
    pub add_parents: Vec<String>,
    /// Parent ids to remove.
    pub remove_parents: Vec<String>,
}

impl ObjectUpdate {
    /// Change only the name.
    #[must_use]
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Replace `current` parents with exactly `parent_id`.
    #[must_use]
    pub fn reparent(parent_id: impl Into<String>, current: &[String]) -> Self {
        Self {
            name: None,
            add_parents: vec![parent_id.into()],
            remove_parents: current.to_vec(),
        }
    }
}

/// Progress reported by one download chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadProgress {
    /// Bytes received so far.
    pub received: u64,
    /// Total size, when known.
    pub total: Option<u64>,
    /// The transfer has finished.
    pub done: bool,
}

/// One chunk of a media download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The bytes of this chunk.
    pub data: Vec<u8>,
    /// Progress after this chunk.
    pub progress: DownloadProgress,
}

/// An opaque, resumable media download.
///
/// Callers invoke [`MediaDownload::next_chunk`] until the returned progress
/// reports `done`.
pub trait MediaDownload {
    /// Fetch the next chunk.
    ///
    /// # Errors
    ///
    /// Returns the remote failure for this chunk.
    fn next_chunk(&mut self) -> RemoteResult<Chunk>;
}

/// An access grant on an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    /// Permission id.
    pub id: String,
    /// Granted role (`owner`, `writer`, `reader`, ...).
    pub role: String,
    /// Grantee type (`user`, `group`, `domain`, `anyone`).
    #[serde(rename = "type")]
    pub grantee_type: String,
    /// Grantee address, for user and group grants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    /// Grantee display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Body of a permission create call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPermission {
    /// Role to grant.
    pub role: String,
    /// Grantee type.
    #[serde(rename = "type")]
    pub grantee_type: String,
    /// Grantee address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}

/// The remote primitives the path layer is built on.
///
/// Every method issues exactly one remote operation. Implementations own
/// transport, authentication, retries and quota handling.
pub trait RemoteStore {
    /// One page of a filtered query.
    ///
    /// # Errors
    ///
    /// Returns the remote failure.
    fn query(&self, request: &QueryRequest) -> RemoteResult<ObjectPage>;

    /// Direct lookup by id. Must accept [`crate::record::ROOT_ID`].
    ///
    /// # Errors
    ///
    /// Returns the remote failure, status 404 when the id is unknown.
    fn get(&self, id: &str, fields: &Fields) -> RemoteResult<ObjectRecord>;

    /// Create an object, optionally with content.
    ///
    /// # Errors
    ///
    /// Returns the remote failure.
    fn create(&self, object: NewObject, fields: &Fields) -> RemoteResult<ObjectRecord>;

    /// Update an object's name and/or parent set.
    ///
    /// # Errors
    ///
    /// Returns the remote failure.
    fn update(&self, id: &str, update: &ObjectUpdate, fields: &Fields) -> RemoteResult<ObjectRecord>;

    /// Remove an object.
    ///
    /// # Errors
    ///
    /// Returns the remote failure.
    fn delete(&self, id: &str) -> RemoteResult<()>;

    /// Duplicate an object, content included, under `parent_id`.
    ///
    /// # Errors
    ///
    /// Returns the remote failure.
    fn copy(&self, id: &str, parent_id: &str, fields: &Fields) -> RemoteResult<ObjectRecord>;

    /// Start a chunked download of an object's content.
    ///
    /// # Errors
    ///
    /// Returns the remote failure.
    fn open_download(&self, id: &str, chunk_size: usize) -> RemoteResult<Box<dyn MediaDownload + '_>>;

    /// Permissions granted on an object.
    ///
    /// # Errors
    ///
    /// Returns the remote failure.
    fn list_permissions(&self, id: &str) -> RemoteResult<Vec<Permission>>;

    /// Grant a permission on an object.
    ///
    /// # Errors
    ///
    /// Returns the remote failure.
    fn create_permission(&self, id: &str, permission: &NewPermission) -> RemoteResult<Permission>;

    /// Revoke a permission.
    ///
    /// # Errors
    ///
    /// Returns the remote failure.
    fn delete_permission(&self, id: &str, permission_id: &str) -> RemoteResult<()>;
}

macro_rules! forward_remote_store {
    ($($target:ty),*) => {$(
        impl<T: RemoteStore + ?Sized> RemoteStore for $target {
            fn query(&self, request: &QueryRequest) -> RemoteResult<ObjectPage> {
                (**self).query(request)
            }

            fn get(&self, id: &str, fields: &Fields) -> RemoteResult<ObjectRecord> {
                (**self).get(id, fields)
            }

            fn create(&self, object: NewObject, fields: &Fields) -> RemoteResult<ObjectRecord> {
                (**self).create(object, fields)
            }

            fn update(
                &self,
                id: &str,
                update: &ObjectUpdate,
                fields: &Fields,
            ) -> RemoteResult<ObjectRecord> {
                (**self).update(id, update, fields)
            }

            fn delete(&self, id: &str) -> RemoteResult<()> {
                (**self).delete(id)
            }

            fn copy(&self, id: &str, parent_id: &str, fields: &Fields) -> RemoteResult<ObjectRecord> {
                (**self).copy(id, parent_id, fields)
            }

            fn open_download(
                &self,
                id: &str,
                chunk_size: usize,
            ) -> RemoteResult<Box<dyn MediaDownload + '_>> {
                (**self).open_download(id, chunk_size)
            }

            fn list_permissions(&self, id: &str) -> RemoteResult<Vec<Permission>> {
                (**self).list_permissions(id)
            }

            fn create_permission(
                &self,
                id: &str,
                permission: &NewPermission,
            ) -> RemoteResult<Permission> {
                (**self).create_permission(id, permission)
            }

            fn delete_permission(&self, id: &str, permission_id: &str) -> RemoteResult<()> {
                (**self).delete_permission(id, permission_id)
            }
        }
    )*};
}

forward_remote_store!(&T, Box<T>, std::sync::Arc<T>);
