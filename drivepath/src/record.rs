//! Object records and field projections.
//!
//! An [`ObjectRecord`] is an immutable snapshot of one remote object as
//! returned by a single remote call. Records are never cached; every
//! operation re-resolves its path.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// MIME type marking an object as a folder.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Well-known id that always denotes the canonical root container.
pub const ROOT_ID: &str = "root";

/// Fields every projection includes, so a record can re-enter the resolver.
pub const DEFAULT_FIELDS: [&str; 5] = ["id", "kind", "mimeType", "name", "parents"];

/// A set of field names to request from the remote store.
///
/// A projection is always the union of the caller's fields and
/// [`DEFAULT_FIELDS`].
///
/// # Examples
///
/// ```
/// use drivepath::record::Fields;
///
/// let fields = Fields::parse("size, createdTime");
/// assert!(fields.contains("size"));
/// assert!(fields.contains("parents"));
/// assert_eq!(Fields::default().to_string(), "id,kind,mimeType,name,parents");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fields {
    names: BTreeSet<String>,
}

impl Default for Fields {
    fn default() -> Self {
        Self {
            names: DEFAULT_FIELDS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Fields {
    /// The mandatory projection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated field list, adding the mandatory fields.
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        Self::default().with_all(spec.split(','))
    }

    /// Add one field to the projection.
    #[must_use]
    pub fn with(mut self, name: &str) -> Self {
        let name = name.trim();
        if !name.is_empty() {
            self.names.insert(name.to_string());
        }
        self
    }

    /// Add several fields to the projection.
    #[must_use]
    pub fn with_all<'a, I>(self, names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        names.into_iter().fold(self, Fields::with)
    }

    /// Whether the projection requests `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Iterate the requested names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{}", joined.join(","))
    }
}

impl From<Option<&Fields>> for Fields {
    fn from(fields: Option<&Fields>) -> Self {
        fields.cloned().unwrap_or_default()
    }
}

/// One object as returned by the remote store.
///
/// Identity is [`ObjectRecord::id`]; `name` plus `parents` approximate a path
/// segment. Any extra projected fields land in [`ObjectRecord::extra`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRecord {
    /// Opaque object id.
    pub id: String,

    /// Resource kind reported by the store.
    #[serde(default)]
    pub kind: String,

    /// MIME type; folders use [`FOLDER_MIME_TYPE`].
    #[serde(default)]
    pub mime_type: String,

    /// Object name; not unique within a parent.
    #[serde(default)]
    pub name: String,

    /// Parent object ids, absent for unparented (shared-in) objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parents: Option<Vec<String>>,

    /// Additional projected fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ObjectRecord {
    /// Whether the object is a folder.
    #[must_use]
    pub fn is_folder(&self) -> bool {
        self.mime_type == FOLDER_MIME_TYPE
    }

    /// Whether the object has no parent reference at all.
    ///
    /// An empty parent list counts as no parent.
    #[must_use]
    pub fn is_unparented(&self) -> bool {
        self.parents.as_ref().map_or(true, Vec::is_empty)
    }

    /// The parent ids, empty when unparented.
    #[must_use]
    pub fn parent_ids(&self) -> &[String] {
        self.parents.as_deref().unwrap_or_default()
    }

    /// The first parent id, if any.
    #[must_use]
    pub fn first_parent(&self) -> Option<&str> {
        self.parent_ids().first().map(String::as_str)
    }

    /// A projected field that is not one of the fixed fields.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    /// Content size in bytes; the store reports it as a decimal string.
    #[must_use]
    pub fn size(&self) -> Option<u64> {
        match self.field("size")? {
            Value::String(s) => s.parse().ok(),
            Value::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    /// Direct download link.
    #[must_use]
    pub fn web_content_link(&self) -> Option<&str> {
        self.field("webContentLink").and_then(Value::as_str)
    }

    /// Creation timestamp.
    #[must_use]
    pub fn created_time(&self) -> Option<DateTime<Utc>> {
        self.timestamp("createdTime")
    }

    /// Last modification timestamp.
    #[must_use]
    pub fn modified_time(&self) -> Option<DateTime<Utc>> {
        self.timestamp("modifiedTime")
    }

    fn timestamp(&self, name: &str) -> Option<DateTime<Utc>> {
        let raw = self.field(name).and_then(Value::as_str)?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}
