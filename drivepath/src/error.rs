//! Error types for the drivepath library.
//!
//! Failures are reported the way a local filesystem reports them: every
//! filesystem-semantics error carries an [`ErrorKind`], an errno-equivalent
//! code, a human-readable message and the path the caller asked about.
//! Callers branch on [`Error::kind`], never on message text.
//!
//! Remote failures are translated by [`map_remote_error`]; anything the
//! mapper does not recognise passes through unchanged as [`Error::Remote`].

use std::fmt;
use std::io;

use thiserror::Error;

use crate::remote::RemoteError;

/// Result type alias for operations that may fail with a drivepath error.
///
/// # Examples
///
/// ```
/// use drivepath::{Error, Result};
///
/// fn example_operation() -> Result<u64> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Message used for [`ErrorKind::NotFound`].
pub const STRERROR_NOT_FOUND: &str = "No such file or directory";

/// Message used for [`ErrorKind::AlreadyExists`].
pub const STRERROR_ALREADY_EXISTS: &str = "File exists";

/// Message used for [`ErrorKind::PermissionDenied`] when the store gave none.
pub const STRERROR_PERMISSION_DENIED: &str = "Operation not permitted";

/// The category of a failure.
///
/// # Examples
///
/// ```
/// use drivepath::{Error, ErrorKind};
///
/// let err = Error::not_found("/a/b");
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No object resolves at the path.
    NotFound,
    /// An object already occupies the target name.
    AlreadyExists,
    /// The store refused the operation.
    PermissionDenied,
    /// Anything not mapped onto a filesystem condition.
    Unmapped,
}

impl ErrorKind {
    /// The errno-equivalent code for this kind, if it has one.
    #[must_use]
    pub fn errno(self) -> Option<i32> {
        match self {
            Self::NotFound => Some(libc::ENOENT),
            Self::AlreadyExists => Some(libc::EEXIST),
            Self::PermissionDenied => Some(libc::EPERM),
            Self::Unmapped => None,
        }
    }

    /// The default strerror text for this kind.
    #[must_use]
    pub fn strerror(self) -> &'static str {
        match self {
            Self::NotFound => STRERROR_NOT_FOUND,
            Self::AlreadyExists => STRERROR_ALREADY_EXISTS,
            Self::PermissionDenied => STRERROR_PERMISSION_DENIED,
            Self::Unmapped => "unmapped error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::AlreadyExists => write!(f, "already exists"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::Unmapped => write!(f, "unmapped"),
        }
    }
}

/// The main error type for the drivepath library.
#[derive(Debug, Error)]
pub enum Error {
    /// A POSIX-flavoured filesystem failure.
    #[error("[Errno {errno}] {strerror}: '{filename}'")]
    FileSystem {
        /// What went wrong.
        kind: ErrorKind,
        /// The errno-equivalent code.
        errno: i32,
        /// Human-readable description.
        strerror: String,
        /// The caller-supplied path the failure refers to.
        filename: String,
    },

    /// A remote failure the mapper does not translate.
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    /// A local I/O error occurred while streaming content.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A value failed local validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

impl Error {
    /// Build a filesystem error of `kind` using its default errno and message.
    #[must_use]
    pub fn filesystem(kind: ErrorKind, filename: impl Into<String>) -> Self {
        Self::FileSystem {
            kind,
            errno: kind.errno().unwrap_or(0),
            strerror: kind.strerror().to_string(),
            filename: filename.into(),
        }
    }

    /// A `NotFound` error for `filename`.
    ///
    /// # Examples
    ///
    /// ```
    /// use drivepath::Error;
    ///
    /// let err = Error::not_found("quickstart/test sheet");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "[Errno 2] No such file or directory: 'quickstart/test sheet'"
    /// );
    /// ```
    #[must_use]
    pub fn not_found(filename: impl Into<String>) -> Self {
        Self::filesystem(ErrorKind::NotFound, filename)
    }

    /// An `AlreadyExists` error for `filename`.
    #[must_use]
    pub fn already_exists(filename: impl Into<String>) -> Self {
        Self::filesystem(ErrorKind::AlreadyExists, filename)
    }

    /// A `PermissionDenied` error carrying the store's explanation.
    #[must_use]
    pub fn permission_denied(filename: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::FileSystem {
            kind: ErrorKind::PermissionDenied,
            errno: libc::EPERM,
            strerror: if message.is_empty() {
                STRERROR_PERMISSION_DENIED.to_string()
            } else {
                message
            },
            filename: filename.into(),
        }
    }

    /// The category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileSystem { kind, .. } => *kind,
            Self::Remote(_) | Self::Io(_) | Self::Configuration(_) | Self::Validation { .. } => {
                ErrorKind::Unmapped
            }
        }
    }

    /// The path this error refers to, for filesystem errors.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        match self {
            Self::FileSystem { filename, .. } => Some(filename),
            _ => None,
        }
    }

    /// The errno-equivalent code, for filesystem errors.
    #[must_use]
    pub fn errno(&self) -> Option<i32> {
        match self {
            Self::FileSystem { errno, .. } => Some(*errno),
            _ => None,
        }
    }

    /// Re-tag a filesystem error with a different path.
    ///
    /// Multi-hop resolution uses this so a failure always names the path the
    /// caller supplied rather than the segment that failed.
    #[must_use]
    pub fn with_filename(self, path: &str) -> Self {
        match self {
            Self::FileSystem {
                kind,
                errno,
                strerror,
                ..
            } => Self::FileSystem {
                kind,
                errno,
                strerror,
                filename: path.to_string(),
            },
            other => other,
        }
    }

    /// Check if error indicates the path does not resolve.
    ///
    /// # Examples
    ///
    /// ```
    /// use drivepath::Error;
    ///
    /// assert!(Error::not_found("/nonexistent").is_not_found());
    /// assert!(!Error::already_exists("/x").is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Check if error indicates a name collision.
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        self.kind() == ErrorKind::AlreadyExists
    }

    /// Check if error is permission-related.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        self.kind() == ErrorKind::PermissionDenied
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        if let Error::Io(inner) = err {
            return inner;
        }
        let kind = match err.kind() {
            ErrorKind::NotFound => io::ErrorKind::NotFound,
            ErrorKind::AlreadyExists => io::ErrorKind::AlreadyExists,
            ErrorKind::PermissionDenied => io::ErrorKind::PermissionDenied,
            ErrorKind::Unmapped => io::ErrorKind::Other,
        };
        io::Error::new(kind, err)
    }
}

/// Translate a remote failure into the filesystem taxonomy.
///
/// Status 404 becomes `NotFound`, 403 becomes `PermissionDenied` carrying the
/// remote message; every other status passes through as [`Error::Remote`].
///
/// # Examples
///
/// ```
/// use drivepath::error::map_remote_error;
/// use drivepath::remote::RemoteError;
/// use drivepath::ErrorKind;
///
/// let err = map_remote_error(RemoteError::new(404, "File not found: ."), "/a");
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// assert_eq!(err.filename(), Some("/a"));
///
/// let err = map_remote_error(RemoteError::new(500, "backend error"), "/a");
/// assert_eq!(err.kind(), ErrorKind::Unmapped);
/// ```
#[must_use]
pub fn map_remote_error(err: RemoteError, filename: &str) -> Error {
    match err.status {
        404 => Error::not_found(filename),
        403 => Error::permission_denied(filename, err.message),
        _ => Error::Remote(err),
    }
}
