//! Query expressions for the remote query primitive.
//!
//! A [`Query`] is an AND-combination of [`Clause`]s, built fresh for every
//! resolution step and rendered into the store's query language by its
//! `Display` implementation.

use std::fmt;

use crate::record::FOLDER_MIME_TYPE;

/// One condition of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// The object's name equals the literal exactly.
    NameEquals(String),
    /// The object lists the given id among its parents.
    InParents(String),
    /// The object's MIME type equals the literal.
    MimeTypeEquals(String),
    /// The object was shared into this space from outside.
    SharedWithMe,
}

impl Clause {
    /// Restrict matches to folders.
    #[must_use]
    pub fn is_folder() -> Self {
        Self::MimeTypeEquals(FOLDER_MIME_TYPE.to_string())
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameEquals(name) => write!(f, "name='{}'", escape(name)),
            Self::InParents(id) => write!(f, "'{}' in parents", escape(id)),
            Self::MimeTypeEquals(mime) => write!(f, "mimeType='{}'", escape(mime)),
            Self::SharedWithMe => write!(f, "sharedWithMe"),
        }
    }
}

/// Escape a string literal for the query language.
fn escape(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    for c in literal.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// An AND-combination of clauses.
///
/// # Examples
///
/// ```
/// use drivepath::remote::{Clause, Query};
///
/// let query = Query::new()
///     .filter(Some(Clause::is_folder()))
///     .and(Clause::NameEquals("it's".into()))
///     .and(Clause::InParents("root".into()));
/// assert_eq!(
///     query.to_string(),
///     "mimeType='application/vnd.google-apps.folder' and name='it\\'s' and 'root' in parents"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    clauses: Vec<Clause>,
}

impl Query {
    /// An empty query, matching everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a clause.
    #[must_use]
    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Add an optional caller-supplied clause.
    #[must_use]
    pub fn filter(self, clause: Option<Clause>) -> Self {
        match clause {
            Some(clause) => self.and(clause),
            None => self,
        }
    }

    /// The clauses in the order they were added.
    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" and ")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}
