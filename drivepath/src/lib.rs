#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # drivepath
//!
//! POSIX-style paths over a remote object store whose native model is a
//! graph of parent references.
//!
//! The store knows nothing about paths: any object may have zero or more
//! parents, names need not be unique under a parent, and folders are plain
//! objects with a marker MIME type. This library resolves slash-delimited
//! paths against that graph one segment at a time and layers filesystem
//! rules on top: no duplicate names under one parent, `mkdir -p` folder
//! materialization, collision-checked rename/move/copy, and errors that
//! carry an errno, a message and the path they are about.
//!
//! ## Core Types
//!
//! - [`DriveFs`]: the filesystem facade over any [`RemoteStore`]
//! - [`PathResolver`]: path-to-record resolution
//! - [`ObjectRecord`] and [`Fields`]: remote records and field projections
//! - [`Error`], [`ErrorKind`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//! - [`MemoryStore`]: an in-process store for tests and experiments
//!
//! ## Examples
//!
//! ```
//! use drivepath::{DriveFs, ErrorKind, MemoryStore};
//!
//! let fs = DriveFs::new(MemoryStore::new());
//! fs.create("/a/b/c.txt", Some("text/plain"), None).unwrap();
//!
//! // Intermediate folders were created on the way.
//! assert!(fs.stat("/a/b", None).unwrap().is_folder());
//!
//! // Runs of separators collapse.
//! assert!(fs.exists("//a///b/c.txt").unwrap());
//!
//! // A trailing separator leaves an empty final segment.
//! let err = fs.stat("/a/b/", None).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::NotFound);
//! assert_eq!(err.filename(), Some("/a/b/"));
//! ```

pub mod config;
pub mod error;
pub mod filesystem;
pub mod logging;
pub mod operations;
pub mod path;
pub mod record;
pub mod remote;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder, Settings};
pub use error::{Error, ErrorKind, Result};
pub use filesystem::DriveFs;
pub use logging::{init_logger, install_logger, LogLevel, Logger};
pub use operations::ListIter;
pub use path::PathResolver;
pub use record::{Fields, ObjectRecord};
pub use remote::memory::MemoryStore;
pub use remote::RemoteStore;
