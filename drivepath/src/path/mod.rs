//! Slash-delimited paths over a parent-referencing object graph.
//!
//! # Key Concepts
//!
//! ## Normalization
//!
//! Runs of separators collapse to one. A path made only of separators is the
//! root; a trailing separator leaves an empty final segment, which never
//! resolves.
//!
//! ## Anchors
//!
//! Resolution starts from the outermost segment, the anchor:
//!
//! - `/name` anchors `name` under the root container.
//! - `name` anchors `name` among *unparented* objects, the ones shared into
//!   this space from outside. This is not the same lookup as `/name`.
//!
//! The walk then goes down one segment per remote query, requiring every
//! intermediate segment to be a folder.
//!
//! # Examples
//!
//! ```
//! use drivepath::path::normalize::split;
//!
//! let rooted = split("/reports/2020");
//! let shared = split("reports/2020");
//! assert_eq!(rooted.anchor().parent_id.as_deref(), Some("root"));
//! assert_eq!(shared.anchor().parent_id, None);
//! assert_eq!(rooted.remaining(), shared.remaining());
//! ```

pub mod normalize;
pub mod resolver;
mod types;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use resolver::PathResolver;
pub use types::{Anchor, PathComponents};
