//! Filesystem operations on [`DriveFs`](crate::DriveFs).
//!
//! Each submodule adds one group of methods to `DriveFs`. Every operation
//! resolves its paths from scratch through the resolver, then issues the
//! mutating remote call, so the check-then-act pairs below are not atomic
//! against concurrent writers.
//!
//! | Module | Operations |
//! |---|---|
//! | `listing` | `list_children`, `list`, `iter` |
//! | `mkdir` | `ensure_folder` |
//! | `create` | `create` |
//! | `rename` | `rename` |
//! | `relocate` | `move_to`, `copy_to` |
//! | `delete` | `delete` |
//! | `transfer` | `upload`, `upload_from_file`, `download`, `download_to`, `download_to_file` |
//! | `metadata` | `size`, `url`, `created_time`, `modified_time`, `accessed_time` |
//! | `permissions` | `list_permissions`, `create_permission`, `delete_permission` |
//!
//! # Examples
//!
//! ```
//! use drivepath::remote::memory::MemoryStore;
//! use drivepath::DriveFs;
//!
//! let fs = DriveFs::new(MemoryStore::new());
//! fs.ensure_folder("/projects/alpha").unwrap();
//! fs.upload("/projects/alpha/notes.txt", &b"hello"[..], None).unwrap();
//!
//! let names: Vec<String> = fs
//!     .list("/projects/alpha", None, None)
//!     .unwrap()
//!     .into_iter()
//!     .map(|record| record.name)
//!     .collect();
//! assert_eq!(names, ["notes.txt"]);
//! ```

mod create;
mod delete;
pub mod listing;
mod metadata;
mod mkdir;
mod permissions;
mod relocate;
mod rename;
pub mod transfer;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use listing::ListIter;
pub use transfer::guess_mime_type;
