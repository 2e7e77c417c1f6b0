// ./infrastructure/src/persistence/in_memory_store.rs
use application::DocumentStore;
use domain::{Document, DocumentId};
use std::collections::{BTreeMap, HashMap};
use tracing::{trace, warn};

/// Ordered in-memory storage. Listing order is ascending by identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryDocumentStore {
    // Document ID -> Document
    documents: BTreeMap<DocumentId, Document>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            documents: BTreeMap::new(),
        }
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn put(&mut self, id: DocumentId, document: Document) {
        trace!(doc_id = %id, "Writing document to in-memory store");
        self.documents.insert(id, document);
    }

    fn get(&self, id: &str) -> Option<&Document> {
        self.documents.get(id)
    }

    fn documents(&self) -> Box<dyn Iterator<Item = &Document> + '_> {
        Box::new(self.documents.values())
    }

    fn len(&self) -> usize {
        self.documents.len()
    }
}

/// Seeds a store from documents that already carry identifiers. Documents
/// without one are skipped; save them through the manager to get an id.
impl FromIterator<Document> for InMemoryDocumentStore {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        let mut store = Self::new();
        for doc in iter {
            match doc.id.clone().filter(|id| !id.is_empty()) {
                Some(id) => store.put(id, doc),
                None => warn!(title = ?doc.title, "Skipping seed document without an id"),
            }
        }
        store
    }
}

/// Seeds a store from an identifier -> document map. The map key is
/// authoritative: every document is stored with its id set to its key.
impl From<HashMap<String, Document>> for InMemoryDocumentStore {
    fn from(initial: HashMap<String, Document>) -> Self {
        let documents = initial
            .into_iter()
            .map(|(key, mut doc)| {
                let id = DocumentId::new(key);
                if doc.has_id() && doc.id.as_ref() != Some(&id) {
                    warn!(key = %id, doc_id = ?doc.id, "Seed document id differs from its key");
                }
                doc.id = Some(id.clone());
                (id, doc)
            })
            .collect();
        Self { documents }
    }
}
