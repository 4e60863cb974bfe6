//! Path normalization functions.
//!
//! Paths are slash-delimited strings. Normalization only collapses runs of
//! separators; it never interprets `.` or `..`, since the remote store has
//! no notion of them and a segment named `..` is just a name.

use std::borrow::Cow;

use crate::path::types::{Anchor, PathComponents};
use crate::record::ROOT_ID;

/// The path separator.
pub const SEPARATOR: char = '/';

/// The root path.
pub const ROOT: &str = "/";

/// Collapse every run of two or more separators into one.
///
/// A path made only of separators collapses to [`ROOT`]. A trailing
/// separator survives as a single separator.
///
/// # Examples
///
/// ```
/// use drivepath::path::normalize::collapse_separators;
///
/// assert_eq!(collapse_separators("///"), "/");
/// assert_eq!(collapse_separators("a//b///c"), "a/b/c");
/// assert_eq!(collapse_separators("a//"), "a/");
/// assert_eq!(collapse_separators("plain"), "plain");
/// ```
#[must_use]
pub fn collapse_separators(path: &str) -> Cow<'_, str> {
    if !path.contains("//") {
        return Cow::Borrowed(path);
    }

    let mut out = String::with_capacity(path.len());
    let mut previous = None;
    for c in path.chars() {
        if c == SEPARATOR && previous == Some(SEPARATOR) {
            continue;
        }
        out.push(c);
        previous = Some(c);
    }
    Cow::Owned(out)
}

/// Split a path into its head and final segment.
///
/// Trailing separators are removed from the head unless the head is made
/// only of separators. The tail is empty when the path ends with a
/// separator.
///
/// # Examples
///
/// ```
/// use drivepath::path::normalize::split_last;
///
/// assert_eq!(split_last("/a/b"), ("/a", "b"));
/// assert_eq!(split_last("/a"), ("/", "a"));
/// assert_eq!(split_last("a"), ("", "a"));
/// assert_eq!(split_last("a/"), ("a", ""));
/// assert_eq!(split_last(""), ("", ""));
/// ```
#[must_use]
pub fn split_last(path: &str) -> (&str, &str) {
    let cut = path.rfind(SEPARATOR).map_or(0, |i| i + 1);
    let (head, tail) = path.split_at(cut);
    let trimmed = head.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() {
        (head, tail)
    } else {
        (trimmed, tail)
    }
}

/// The final segment of a path.
#[must_use]
pub fn basename(path: &str) -> &str {
    split_last(path).1
}

/// Everything before the final segment.
#[must_use]
pub fn dirname(path: &str) -> &str {
    split_last(path).0
}

/// Join `name` onto `dir` with exactly one separator between them.
///
/// An absolute `name` replaces `dir`, and an empty `dir` leaves `name`
/// relative.
///
/// # Examples
///
/// ```
/// use drivepath::path::normalize::join;
///
/// assert_eq!(join("/a", "b"), "/a/b");
/// assert_eq!(join("/", "b"), "/b");
/// assert_eq!(join("", "b"), "b");
/// assert_eq!(join("/a", "/b"), "/b");
/// ```
#[must_use]
pub fn join(dir: &str, name: &str) -> String {
    if name.starts_with(SEPARATOR) || dir.is_empty() {
        name.to_string()
    } else if dir.ends_with(SEPARATOR) {
        format!("{dir}{name}")
    } else {
        format!("{dir}{SEPARATOR}{name}")
    }
}

/// Decompose a path into the anchor resolved first and the segments that
/// follow it.
///
/// The anchor is the outermost segment: a child of [`ROOT_ID`] when the
/// path starts with a separator, an unparented top-level name otherwise.
/// A path that normalizes to [`ROOT`] yields the root anchor; the empty
/// path yields an anchor with an empty name.
///
/// # Examples
///
/// ```
/// use drivepath::path::normalize::split;
///
/// let components = split("//a/b//c.txt");
/// assert_eq!(components.anchor().name, "a");
/// assert_eq!(components.anchor().parent_id.as_deref(), Some("root"));
/// assert_eq!(components.remaining(), vec!["b", "c.txt"]);
///
/// let shared = split("shared/doc");
/// assert_eq!(shared.anchor().parent_id, None);
///
/// assert!(split("///").anchor().is_root());
/// ```
#[must_use]
pub fn split(path: &str) -> PathComponents {
    let path = collapse_separators(path);
    if path == ROOT {
        return PathComponents::new(Anchor::root(), Vec::new());
    }

    // Leaf first; the resolver pops from the end.
    let mut pending = Vec::new();
    let mut rest: &str = &path;
    loop {
        let (head, tail) = split_last(rest);
        if head.is_empty() {
            return PathComponents::new(Anchor::unparented(tail), pending);
        }
        if head == ROOT {
            return PathComponents::new(Anchor::child_of(tail, ROOT_ID), pending);
        }
        pending.push(tail.to_string());
        rest = head;
    }
}
