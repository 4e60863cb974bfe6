//! An in-process [`RemoteStore`].
//!
//! `MemoryStore` models the remote graph faithfully: a root container
//! reachable through the `root` alias, objects with zero or more parents,
//! no name uniqueness, paged queries with continuation tokens, content and
//! permissions. It also records every call and can fail the next call of a
//! given kind, which is what the test suites use to check the exact remote
//! traffic an operation produces.
//!
//! # Examples
//!
//! ```
//! use drivepath::remote::memory::{CallKind, MemoryStore};
//! use drivepath::DriveFs;
//!
//! let store = MemoryStore::new();
//! store.insert_folder("docs", Some("root"));
//!
//! let fs = DriveFs::new(&store);
//! assert!(fs.exists("/docs").unwrap());
//! assert_eq!(store.count(CallKind::Query), 1);
//! ```

use std::collections::{HashMap, VecDeque};
use std::io::Read;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

use super::{
    Chunk, Clause, DownloadProgress, MediaDownload, NewObject, NewPermission, ObjectPage,
    ObjectUpdate, Permission, QueryRequest, RemoteError, RemoteResult, RemoteStore,
};
use crate::record::{Fields, ObjectRecord, FOLDER_MIME_TYPE, ROOT_ID};

/// Page size used when neither the request nor the store sets one.
pub const DEFAULT_PAGE_SIZE: usize = 100;

const KIND: &str = "drive#file";
const OWNER_PERMISSION_ID: &str = "owner";
const OWNER_EMAIL: &str = "owner@memory.invalid";

/// The remote primitive a call used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// [`RemoteStore::query`].
    Query,
    /// [`RemoteStore::get`].
    Get,
    /// [`RemoteStore::create`].
    Create,
    /// [`RemoteStore::update`].
    Update,
    /// [`RemoteStore::delete`].
    Delete,
    /// [`RemoteStore::copy`].
    Copy,
    /// [`RemoteStore::open_download`].
    Download,
    /// [`RemoteStore::list_permissions`].
    ListPermissions,
    /// [`RemoteStore::create_permission`].
    CreatePermission,
    /// [`RemoteStore::delete_permission`].
    DeletePermission,
}

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    /// A page query.
    Query {
        /// Rendered query expression.
        query: String,
        /// Continuation token sent.
        page_token: Option<String>,
    },
    /// A lookup by id.
    Get {
        /// Requested id.
        id: String,
    },
    /// An object creation.
    Create {
        /// Name of the new object.
        name: String,
        /// Parents of the new object.
        parents: Vec<String>,
        /// Whether a folder was created.
        folder: bool,
    },
    /// An update.
    Update {
        /// Updated id.
        id: String,
        /// The requested change.
        update: ObjectUpdate,
    },
    /// A deletion.
    Delete {
        /// Deleted id.
        id: String,
    },
    /// A copy.
    Copy {
        /// Source id.
        id: String,
        /// Destination parent.
        parent_id: String,
    },
    /// A download start.
    Download {
        /// Downloaded id.
        id: String,
    },
    /// A permission listing.
    ListPermissions {
        /// Object id.
        id: String,
    },
    /// A permission grant.
    CreatePermission {
        /// Object id.
        id: String,
    },
    /// A permission revocation.
    DeletePermission {
        /// Object id.
        id: String,
        /// Revoked permission.
        permission_id: String,
    },
}

impl RemoteCall {
    /// The primitive this call used.
    #[must_use]
    pub fn kind(&self) -> CallKind {
        match self {
            Self::Query { .. } => CallKind::Query,
            Self::Get { .. } => CallKind::Get,
            Self::Create { .. } => CallKind::Create,
            Self::Update { .. } => CallKind::Update,
            Self::Delete { .. } => CallKind::Delete,
            Self::Copy { .. } => CallKind::Copy,
            Self::Download { .. } => CallKind::Download,
            Self::ListPermissions { .. } => CallKind::ListPermissions,
            Self::CreatePermission { .. } => CallKind::CreatePermission,
            Self::DeletePermission { .. } => CallKind::DeletePermission,
        }
    }
}

#[derive(Debug, Clone)]
struct StoredObject {
    record: ObjectRecord,
    content: Vec<u8>,
    permissions: Vec<Permission>,
}

impl StoredObject {
    fn project(&self, fields: &Fields) -> ObjectRecord {
        let mut extra = Map::new();
        for name in fields.iter() {
            if let Some(value) = self.computed_field(name) {
                extra.insert(name.to_string(), value);
            }
        }
        ObjectRecord {
            extra,
            ..self.record.clone()
        }
    }

    fn computed_field(&self, name: &str) -> Option<Value> {
        let file = !self.record.is_folder();
        match name {
            "size" if file => Some(Value::String(self.content.len().to_string())),
            "webContentLink" if file => Some(Value::String(format!(
                "memory://{}?export=download",
                self.record.id
            ))),
            _ => self.record.extra.get(name).cloned(),
        }
    }

    fn touch(&mut self) {
        self.record
            .extra
            .insert("modifiedTime".to_string(), Value::String(now()));
    }

    fn has_parent(&self, id: &str) -> bool {
        self.record.parent_ids().iter().any(|p| p == id)
    }
}

#[derive(Debug)]
struct State {
    objects: Vec<StoredObject>,
    root_id: String,
    next_id: u64,
    page_size: usize,
    incomplete_search: bool,
    calls: Vec<RemoteCall>,
    failures: HashMap<CallKind, VecDeque<RemoteError>>,
}

impl State {
    fn allocate_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}-{:06}", self.next_id);
        self.next_id += 1;
        id
    }

    fn canonical<'a>(&'a self, id: &'a str) -> &'a str {
        if id == ROOT_ID {
            &self.root_id
        } else {
            id
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        let id = self.canonical(id);
        self.objects.iter().position(|o| o.record.id == id)
    }

    fn find(&self, id: &str) -> RemoteResult<&StoredObject> {
        self.position(id)
            .map(|i| &self.objects[i])
            .ok_or_else(|| not_found(id))
    }

    fn find_mut(&mut self, id: &str) -> RemoteResult<&mut StoredObject> {
        match self.position(id) {
            Some(i) => Ok(&mut self.objects[i]),
            None => Err(not_found(id)),
        }
    }

    fn begin(&mut self, call: RemoteCall) -> RemoteResult<()> {
        let kind = call.kind();
        self.calls.push(call);
        match self.failures.get_mut(&kind).and_then(VecDeque::pop_front) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn matches(&self, object: &StoredObject, clause: &Clause) -> bool {
        let record = &object.record;
        match clause {
            Clause::NameEquals(name) => record.name == *name,
            Clause::InParents(id) => object.has_parent(self.canonical(id)),
            Clause::MimeTypeEquals(mime) => record.mime_type == *mime,
            Clause::SharedWithMe => record.is_unparented(),
        }
    }

    fn insert(&mut self, name: &str, mime_type: &str, parents: Vec<String>, content: Vec<u8>) -> String {
        let id = self.allocate_id("mem");
        let stamp = now();
        let mut extra = Map::new();
        extra.insert("createdTime".to_string(), Value::String(stamp.clone()));
        extra.insert("modifiedTime".to_string(), Value::String(stamp));
        self.objects.push(StoredObject {
            record: ObjectRecord {
                id: id.clone(),
                kind: KIND.to_string(),
                mime_type: mime_type.to_string(),
                name: name.to_string(),
                parents: if parents.is_empty() { None } else { Some(parents) },
                extra,
            },
            content,
            permissions: vec![owner_permission()],
        });
        id
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn not_found(id: &str) -> RemoteError {
    RemoteError::new(404, format!("File not found: {id}.")).with_reason("notFound")
}

fn owner_permission() -> Permission {
    Permission {
        id: OWNER_PERMISSION_ID.to_string(),
        role: "owner".to_string(),
        grantee_type: "user".to_string(),
        email_address: Some(OWNER_EMAIL.to_string()),
        display_name: None,
    }
}

/// An in-process object store.
#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// A store holding only the root container, named `My Drive`.
    #[must_use]
    pub fn new() -> Self {
        let mut state = State {
            objects: Vec::new(),
            root_id: String::new(),
            next_id: 0,
            page_size: DEFAULT_PAGE_SIZE,
            incomplete_search: false,
            calls: Vec::new(),
            failures: HashMap::new(),
        };
        state.root_id = state.insert("My Drive", FOLDER_MIME_TYPE, Vec::new(), Vec::new());
        Self {
            state: Mutex::new(state),
        }
    }

    /// Set the default page size.
    #[must_use]
    pub fn with_page_size(self, page_size: usize) -> Self {
        self.set_page_size(page_size);
        self
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Canonical id of the root container.
    #[must_use]
    pub fn root_id(&self) -> String {
        self.lock().root_id.clone()
    }

    /// Change the default page size; zero is treated as one.
    pub fn set_page_size(&self, page_size: usize) {
        self.lock().page_size = page_size.max(1);
    }

    /// Make every query page report a possibly incomplete search.
    pub fn set_incomplete_search(&self, incomplete: bool) {
        self.lock().incomplete_search = incomplete;
    }

    /// Add a folder without recording a call. `parent` may be `root`;
    /// `None` makes an unparented (shared-in) folder.
    pub fn insert_folder(&self, name: &str, parent: Option<&str>) -> String {
        self.insert_object(name, FOLDER_MIME_TYPE, parent, Vec::new())
    }

    /// Add a file without recording a call.
    pub fn insert_file(&self, name: &str, mime_type: &str, parent: Option<&str>, content: &[u8]) -> String {
        self.insert_object(name, mime_type, parent, content.to_vec())
    }

    fn insert_object(&self, name: &str, mime_type: &str, parent: Option<&str>, content: Vec<u8>) -> String {
        let mut state = self.lock();
        let parents = parent
            .map(|p| vec![state.canonical(p).to_string()])
            .unwrap_or_default();
        state.insert(name, mime_type, parents, content)
    }

    /// Fail the next call of `kind` with `err`. Failures queue up per kind.
    pub fn fail_next(&self, kind: CallKind, err: RemoteError) {
        self.lock().failures.entry(kind).or_default().push_back(err);
    }

    /// Every call recorded so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<RemoteCall> {
        self.lock().calls.clone()
    }

    /// Number of recorded calls of `kind`.
    #[must_use]
    pub fn count(&self, kind: CallKind) -> usize {
        self.lock().calls.iter().filter(|c| c.kind() == kind).count()
    }

    /// Forget the recorded calls.
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Full, unprojected record of `id`, without recording a call.
    #[must_use]
    pub fn record(&self, id: &str) -> Option<ObjectRecord> {
        let state = self.lock();
        state.find(id).ok().map(|o| o.record.clone())
    }

    /// Stored content of `id`.
    #[must_use]
    pub fn content(&self, id: &str) -> Option<Vec<u8>> {
        let state = self.lock();
        state.find(id).ok().map(|o| o.content.clone())
    }

    /// Ids of every object named `name`, in insertion order.
    #[must_use]
    pub fn ids_named(&self, name: &str) -> Vec<String> {
        self.lock()
            .objects
            .iter()
            .filter(|o| o.record.name == name)
            .map(|o| o.record.id.clone())
            .collect()
    }

    /// Number of objects, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().objects.len()
    }

    /// Whether the store holds nothing but the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 1
    }
}

impl RemoteStore for MemoryStore {
    fn query(&self, request: &QueryRequest) -> RemoteResult<ObjectPage> {
        let mut state = self.lock();
        state.begin(RemoteCall::Query {
            query: request.query.to_string(),
            page_token: request.page_token.clone(),
        })?;

        let offset = match &request.page_token {
            Some(token) => token.parse::<usize>().map_err(|_| {
                RemoteError::new(400, format!("Invalid Value: pageToken {token}"))
                    .with_reason("invalid")
            })?,
            None => 0,
        };
        let page_size = request
            .page_size
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(state.page_size)
            .max(1);

        let matching: Vec<&StoredObject> = state
            .objects
            .iter()
            .filter(|o| o.record.id != state.root_id)
            .filter(|o| request.query.clauses().iter().all(|c| state.matches(o, c)))
            .collect();

        let end = matching.len().min(offset.saturating_add(page_size));
        let files = matching
            .get(offset..end)
            .unwrap_or_default()
            .iter()
            .map(|o| o.project(&request.fields))
            .collect();

        Ok(ObjectPage {
            files,
            next_page_token: (end < matching.len()).then(|| end.to_string()),
            incomplete_search: state.incomplete_search,
        })
    }

    fn get(&self, id: &str, fields: &Fields) -> RemoteResult<ObjectRecord> {
        let mut state = self.lock();
        state.begin(RemoteCall::Get { id: id.to_string() })?;
        Ok(state.find(id)?.project(fields))
    }

    fn create(&self, object: NewObject, fields: &Fields) -> RemoteResult<ObjectRecord> {
        let mut state = self.lock();
        state.begin(RemoteCall::Create {
            name: object.name.clone(),
            parents: object.parents.clone(),
            folder: object.is_folder(),
        })?;

        let mut parents = Vec::with_capacity(object.parents.len());
        for parent in &object.parents {
            parents.push(state.find(parent)?.record.id.clone());
        }

        let mut content = Vec::new();
        let mime_type = match object.media {
            Some(mut media) => {
                media.body.read_to_end(&mut content).map_err(|e| {
                    RemoteError::new(400, format!("Media upload failed: {e}"))
                        .with_reason("uploadBrokenConnection")
                })?;
                object.mime_type.unwrap_or(media.mime_type)
            }
            None => object
                .mime_type
                .unwrap_or_else(|| "application/octet-stream".to_string()),
        };

        let id = state.insert(&object.name, &mime_type, parents, content);
        Ok(state.find(&id)?.project(fields))
    }

    fn update(&self, id: &str, update: &ObjectUpdate, fields: &Fields) -> RemoteResult<ObjectRecord> {
        let mut state = self.lock();
        state.begin(RemoteCall::Update {
            id: id.to_string(),
            update: update.clone(),
        })?;

        let mut added = Vec::with_capacity(update.add_parents.len());
        for parent in &update.add_parents {
            added.push(state.find(parent)?.record.id.clone());
        }
        let removed: Vec<String> = update
            .remove_parents
            .iter()
            .map(|p| state.canonical(p).to_string())
            .collect();

        let object = state.find_mut(id)?;
        if let Some(name) = &update.name {
            object.record.name.clone_from(name);
        }
        let mut parents: Vec<String> = object
            .record
            .parent_ids()
            .iter()
            .filter(|p| !removed.contains(*p))
            .cloned()
            .collect();
        for parent in added {
            if !parents.contains(&parent) {
                parents.push(parent);
            }
        }
        object.record.parents = if parents.is_empty() { None } else { Some(parents) };
        object.touch();
        Ok(object.project(fields))
    }

    fn delete(&self, id: &str) -> RemoteResult<()> {
        let mut state = self.lock();
        state.begin(RemoteCall::Delete { id: id.to_string() })?;

        let id = state.find(id)?.record.id.clone();
        if id == state.root_id {
            return Err(RemoteError::new(403, "The root folder cannot be deleted.")
                .with_reason("cannotDeleteRoot"));
        }

        // Children left without any parent go with their folder.
        let mut doomed = vec![id];
        while let Some(gone) = doomed.pop() {
            state.objects.retain(|o| o.record.id != gone);
            for object in &mut state.objects {
                if let Some(parents) = object.record.parents.as_mut() {
                    let before = parents.len();
                    parents.retain(|p| *p != gone);
                    if parents.len() != before && parents.is_empty() {
                        doomed.push(object.record.id.clone());
                    }
                }
            }
        }
        Ok(())
    }

    fn copy(&self, id: &str, parent_id: &str, fields: &Fields) -> RemoteResult<ObjectRecord> {
        let mut state = self.lock();
        state.begin(RemoteCall::Copy {
            id: id.to_string(),
            parent_id: parent_id.to_string(),
        })?;

        let source = state.find(id)?.clone();
        if source.record.is_folder() {
            return Err(RemoteError::new(403, "This file cannot be copied by the user.")
                .with_reason("cannotCopyFile"));
        }
        let parent = state.find(parent_id)?.record.id.clone();
        let copy = state.insert(
            &source.record.name,
            &source.record.mime_type,
            vec![parent],
            source.content,
        );
        Ok(state.find(&copy)?.project(fields))
    }

    fn open_download(&self, id: &str, chunk_size: usize) -> RemoteResult<Box<dyn MediaDownload + '_>> {
        let mut state = self.lock();
        state.begin(RemoteCall::Download { id: id.to_string() })?;

        let object = state.find(id)?;
        if object.record.is_folder() {
            return Err(RemoteError::new(
                403,
                "Only files with binary content can be downloaded.",
            )
            .with_reason("fileNotDownloadable"));
        }
        Ok(Box::new(MemoryDownload {
            data: object.content.clone(),
            offset: 0,
            chunk_size: chunk_size.max(1),
        }))
    }

    fn list_permissions(&self, id: &str) -> RemoteResult<Vec<Permission>> {
        let mut state = self.lock();
        state.begin(RemoteCall::ListPermissions { id: id.to_string() })?;
        Ok(state.find(id)?.permissions.clone())
    }

    fn create_permission(&self, id: &str, permission: &NewPermission) -> RemoteResult<Permission> {
        let mut state = self.lock();
        state.begin(RemoteCall::CreatePermission { id: id.to_string() })?;

        state.find(id)?;
        let created = Permission {
            id: state.allocate_id("perm"),
            role: permission.role.clone(),
            grantee_type: permission.grantee_type.clone(),
            email_address: permission.email_address.clone(),
            display_name: None,
        };
        state.find_mut(id)?.permissions.push(created.clone());
        Ok(created)
    }

    fn delete_permission(&self, id: &str, permission_id: &str) -> RemoteResult<()> {
        let mut state = self.lock();
        state.begin(RemoteCall::DeletePermission {
            id: id.to_string(),
            permission_id: permission_id.to_string(),
        })?;

        let object = state.find_mut(id)?;
        let before = object.permissions.len();
        object.permissions.retain(|p| p.id != permission_id);
        if object.permissions.len() == before {
            return Err(RemoteError::new(404, format!("Permission not found: {permission_id}."))
                .with_reason("notFound"));
        }
        Ok(())
    }
}

/// Chunked reader over a snapshot of stored content.
struct MemoryDownload {
    data: Vec<u8>,
    offset: usize,
    chunk_size: usize,
}

impl MediaDownload for MemoryDownload {
    fn next_chunk(&mut self) -> RemoteResult<Chunk> {
        let end = self.data.len().min(self.offset.saturating_add(self.chunk_size));
        let data = self.data[self.offset..end].to_vec();
        self.offset = end;
        Ok(Chunk {
            data,
            progress: DownloadProgress {
                received: self.offset as u64,
                total: Some(self.data.len() as u64),
                done: self.offset == self.data.len(),
            },
        })
    }
}
