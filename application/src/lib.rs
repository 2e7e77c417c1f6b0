use domain::{Document, DocumentId, SearchRequest};
use tracing::{debug, instrument, trace};
use uuid::Uuid;

// --- Infrastructure Interfaces (Traits) ---

/// Storage object owned by a [`DocumentManager`].
///
/// Keys are unique. Implementations decide the listing order of
/// [`DocumentStore::documents`], but it must be stable for a given content.
pub trait DocumentStore {
    /// Inserts `document` under `id`, replacing any previous value.
    fn put(&mut self, id: DocumentId, document: Document);
    /// Exact-match lookup.
    fn get(&self, id: &str) -> Option<&Document>;
    /// Iterates every stored document.
    fn documents(&self) -> Box<dyn Iterator<Item = &Document> + '_>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Source of identifiers for documents saved without one.
pub trait IdGenerator {
    fn next_id(&mut self) -> DocumentId;
}

/// Random 128-bit (UUID v4) identifiers, rendered hyphenated and lowercase.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&mut self) -> DocumentId {
        DocumentId::new(Uuid::new_v4().to_string())
    }
}

// --- Repository ---

/// The document repository: upsert, predicate search and lookup by id over
/// an injected [`DocumentStore`].
///
/// Mutation goes through `&mut self`; sharing one manager across threads needs
/// an outer lock.
#[derive(Debug, Clone)]
pub struct DocumentManager<S, G = RandomIdGenerator> {
    store: S,
    ids: G,
}

impl<S: DocumentStore> DocumentManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            ids: RandomIdGenerator,
        }
    }
}

impl<S: DocumentStore + Default> Default for DocumentManager<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: DocumentStore, G: IdGenerator> DocumentManager<S, G> {
    pub fn with_id_generator(store: S, ids: G) -> Self {
        Self { store, ids }
    }

    /// Upserts `document`, generating an identifier when it has none (or an
    /// empty one). The stored value is replaced wholesale; `created` is kept
    /// exactly as given.
    #[instrument(skip(self, document))]
    pub fn save(&mut self, mut document: Document) -> Document {
        let id = match document.id.take().filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => {
                let id = self.ids.next_id();
                debug!(doc_id = %id, "Assigned new document id");
                id
            }
        };
        document.id = Some(id.clone());

        debug!(doc_id = %id, "Saving document");
        self.store.put(id, document.clone());
        document
    }

    /// Full scan of the store. `None` and an unconstrained request both
    /// return every document, in the store's listing order.
    #[instrument(skip(self, request), fields(has_request = request.is_some()))]
    pub fn search(&self, request: Option<&SearchRequest>) -> Vec<Document> {
        let matched: Vec<Document> = match request {
            Some(request) if !request.is_unconstrained() => self
                .store
                .documents()
                .filter(|doc| {
                    let hit = request.matches(doc);
                    trace!(doc_id = ?doc.id, hit, "Evaluated search predicate");
                    hit
                })
                .cloned()
                .collect(),
            _ => self.store.documents().cloned().collect(),
        };

        debug!(
            scanned = self.store.len(),
            matched = matched.len(),
            "Search finished"
        );
        matched
    }

    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: &str) -> Option<Document> {
        let found = self.store.get(id).cloned();
        debug!(doc_id = %id, found = found.is_some(), "Looked up document");
        found
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use domain::Author;

    /// Insertion-ordered store used to pin down listing order in tests.
    #[derive(Default)]
    struct VecStore {
        entries: Vec<(DocumentId, Document)>,
    }

    impl DocumentStore for VecStore {
        fn put(&mut self, id: DocumentId, document: Document) {
            match self.entries.iter_mut().find(|(key, _)| *key == id) {
                Some(entry) => entry.1 = document,
                None => self.entries.push((id, document)),
            }
        }
        fn get(&self, id: &str) -> Option<&Document> {
            self.entries
                .iter()
                .find(|(key, _)| key.as_str() == id)
                .map(|(_, doc)| doc)
        }
        fn documents(&self) -> Box<dyn Iterator<Item = &Document> + '_> {
            Box::new(self.entries.iter().map(|(_, doc)| doc))
        }
        fn len(&self) -> usize {
            self.entries.len()
        }
    }

    struct SequentialIds(u32);

    impl IdGenerator for SequentialIds {
        fn next_id(&mut self) -> DocumentId {
            self.0 += 1;
            DocumentId::new(format!("gen-{}", self.0))
        }
    }

    fn sequential_manager() -> DocumentManager<VecStore, SequentialIds> {
        DocumentManager::with_id_generator(VecStore::default(), SequentialIds(0))
    }

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s)
            .expect("valid RFC 3339 timestamp")
            .with_timezone(&Utc)
    }

    #[test]
    fn random_ids_are_uuid_shaped_and_distinct() {
        let mut ids = RandomIdGenerator;
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn save_assigns_id_from_generator() {
        let mut manager = sequential_manager();
        let first = manager.save(Document::new().with_title("a"));
        let second = manager.save(Document::new().with_id("").with_title("b"));

        assert_eq!(first.id, Some(DocumentId::new("gen-1")));
        assert_eq!(second.id, Some(DocumentId::new("gen-2")));
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn save_keeps_existing_id_and_replaces_stored_value() {
        let mut manager = sequential_manager();
        let created = ts("2025-01-01T10:00:00Z");
        manager.save(
            Document::new()
                .with_id("doc")
                .with_title("Old")
                .with_author(Author::new("1", "John Doe"))
                .with_created(created),
        );
        // Replacement is total: the author is not carried over.
        let replacement = Document::new()
            .with_id("doc")
            .with_title("New")
            .with_created(created);
        let updated = manager.save(replacement);

        assert_eq!(updated.id, Some(DocumentId::new("doc")));
        assert_eq!(manager.len(), 1);
        let stored = manager.find_by_id("doc").unwrap();
        assert_eq!(stored.title.as_deref(), Some("New"));
        assert_eq!(stored.author, None);
        assert_eq!(stored.created, Some(created));
    }

    #[test]
    fn save_does_not_touch_created() {
        let mut manager = DocumentManager::new(VecStore::default());
        let saved = manager.save(Document::new().with_title("undated"));
        assert_eq!(saved.created, None);
    }

    #[test]
    fn search_follows_store_order() {
        let mut manager = DocumentManager::new(VecStore::default());
        for id in ["c", "a", "b"] {
            let title = format!("Title {id}");
            manager.save(Document::new().with_id(id).with_title(title));
        }

        let ids: Vec<String> = manager
            .search(None)
            .into_iter()
            .filter_map(|doc| doc.id.map(String::from))
            .collect();
        assert_eq!(ids, ["c", "a", "b"]);

        let request = SearchRequest::new()
            .with_title_prefixes(["Title a", "Title b"]);
        let filtered = manager.search(Some(&request));
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id, Some(DocumentId::new("a")));
    }

    #[test]
    fn search_on_empty_store_is_empty() {
        let manager = DocumentManager::new(VecStore::default());
        assert!(manager.is_empty());
        assert!(manager.search(None).is_empty());
        assert!(manager.search(Some(&SearchRequest::default())).is_empty());
    }

    #[test]
    fn find_by_id_misses_cleanly() {
        let mut manager = DocumentManager::new(VecStore::default());
        manager.save(Document::new().with_id("present"));
        assert!(manager.find_by_id("present").is_some());
        assert!(manager.find_by_id("absent").is_none());
        assert!(manager.find_by_id("").is_none());
    }
}
