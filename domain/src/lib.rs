use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

// --- Document ID ---
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}
impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
impl From<DocumentId> for String {
    fn from(doc_id: DocumentId) -> Self {
        doc_id.0
    }
}
// Lets maps keyed by `DocumentId` be queried with a plain `&str`.
impl Borrow<str> for DocumentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Author ---

/// The author attached to a document. Immutable once built.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: String,
    pub name: String,
}

impl Author {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

// --- Document ---

/// A stored record. Every field is optional: the repository assigns `id` on
/// save, and `created` is carried verbatim from whatever the caller supplied.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Document {
    #[serde(default)]
    pub id: Option<DocumentId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<DocumentId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_author(mut self, author: Author) -> Self {
        self.author = Some(author);
        self
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    /// True when the document carries a non-empty identifier.
    pub fn has_id(&self) -> bool {
        self.id.as_ref().is_some_and(|id| !id.is_empty())
    }
}

// --- Search Request ---

/// Filter criteria for a repository search.
///
/// Dimensions are combined with AND; candidates inside one dimension are
/// combined with OR. A `None` field leaves its dimension unconstrained, while
/// `Some(vec![])` is an OR over zero alternatives and matches nothing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SearchRequest {
    /// Title must start with at least one of these.
    #[serde(default)]
    pub title_prefixes: Option<Vec<String>>,
    /// Content must contain at least one of these.
    #[serde(default)]
    pub contains_contents: Option<Vec<String>>,
    /// Author id must be one of these.
    #[serde(default)]
    pub author_ids: Option<Vec<String>>,
    /// Inclusive lower bound on the creation time.
    #[serde(default)]
    pub created_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the creation time.
    #[serde(default)]
    pub created_to: Option<DateTime<Utc>>,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title_prefixes<I, T>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.title_prefixes = Some(prefixes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_contains_contents<I, T>(mut self, needles: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.contains_contents = Some(needles.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_author_ids<I, T>(mut self, author_ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.author_ids = Some(author_ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_created_from(mut self, from: DateTime<Utc>) -> Self {
        self.created_from = Some(from);
        self
    }

    pub fn with_created_to(mut self, to: DateTime<Utc>) -> Self {
        self.created_to = Some(to);
        self
    }

    /// True when no dimension is constrained, i.e. the request matches everything.
    pub fn is_unconstrained(&self) -> bool {
        self.title_prefixes.is_none()
            && self.contains_contents.is_none()
            && self.author_ids.is_none()
            && self.created_from.is_none()
            && self.created_to.is_none()
    }

    /// Evaluates every active dimension against `doc`.
    pub fn matches(&self, doc: &Document) -> bool {
        self.matches_title(doc)
            && self.matches_content(doc)
            && self.matches_author(doc)
            && self.matches_created_from(doc)
            && self.matches_created_to(doc)
    }

    fn matches_title(&self, doc: &Document) -> bool {
        match (&self.title_prefixes, &doc.title) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(wanted), Some(title)) => wanted.iter().any(|p| title.starts_with(p.as_str())),
        }
    }

    fn matches_content(&self, doc: &Document) -> bool {
        match (&self.contains_contents, &doc.content) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(wanted), Some(content)) => wanted.iter().any(|n| content.contains(n.as_str())),
        }
    }

    fn matches_author(&self, doc: &Document) -> bool {
        match (&self.author_ids, &doc.author) {
            (None, _) => true,
            // Absent author never satisfies an allowlist.
            (Some(_), None) => false,
            (Some(allowed), Some(author)) => allowed.iter().any(|id| *id == author.id),
        }
    }

    fn matches_created_from(&self, doc: &Document) -> bool {
        match (self.created_from, doc.created) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(from), Some(created)) => created >= from,
        }
    }

    fn matches_created_to(&self, doc: &Document) -> bool {
        match (self.created_to, doc.created) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(to), Some(created)) => created <= to,
        }
    }
}
