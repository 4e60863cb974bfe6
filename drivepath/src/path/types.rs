//! Core types for path resolution.
//!
//! An [`Anchor`] is the `{name, parent_id}` pair driving one resolution hop.
//! [`PathComponents`] is an anchor plus the segments still to resolve below
//! it. Both live for a single call and are never cached.

use crate::path::normalize::ROOT;

/// The pair resolved by one hop: a name, optionally under a known parent.
///
/// # Examples
///
/// ```
/// use drivepath::path::Anchor;
///
/// let anchor = Anchor::child_of("docs", "root");
/// assert!(!anchor.is_unparented());
///
/// let shared = Anchor::unparented("shared");
/// assert!(shared.is_unparented());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Anchor {
    /// The segment name.
    pub name: String,
    /// The resolved parent id; `None` means "objects with no parent".
    pub parent_id: Option<String>,
}

impl Anchor {
    /// The root marker.
    #[must_use]
    pub fn root() -> Self {
        Self {
            name: ROOT.to_string(),
            parent_id: None,
        }
    }

    /// `name` as a child of `parent_id`.
    pub fn child_of(name: impl Into<String>, parent_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent_id: Some(parent_id.into()),
        }
    }

    /// `name` as an unparented top-level object.
    pub fn unparented(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent_id: None,
        }
    }

    /// Whether this anchor denotes the root container.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.name == ROOT
    }

    /// Whether lookups are restricted to unparented objects.
    #[must_use]
    pub fn is_unparented(&self) -> bool {
        self.parent_id.is_none() && !self.is_root()
    }
}

/// A path decomposed for resolution.
///
/// Resolution starts at [`PathComponents::anchor`] and walks down through the
/// pending segments, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathComponents {
    anchor: Anchor,
    /// Leaf at index 0; the next segment to resolve is at the end.
    pending: Vec<String>,
}

impl PathComponents {
    /// Build from an anchor and a leaf-first stack of pending segments.
    #[must_use]
    pub fn new(anchor: Anchor, pending: Vec<String>) -> Self {
        Self { anchor, pending }
    }

    /// The first anchor to resolve.
    #[must_use]
    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    /// Segments after the anchor, in root-to-leaf order.
    #[must_use]
    pub fn remaining(&self) -> Vec<&str> {
        self.pending.iter().rev().map(String::as_str).collect()
    }

    /// Number of hops needed to resolve the whole path.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.pending.len() + 1
    }

    /// Split into the anchor and the pending stack, popped outermost first.
    #[must_use]
    pub fn into_parts(self) -> (Anchor, Vec<String>) {
        (self.anchor, self.pending)
    }
}
