//! Nullable stores: thread-safe in-memory graph, settings and membership.

use docgov_store::graph::{GraphBatch, GraphOp, GraphStore};
use docgov_store::{MemberStore, SettingsStore, StoreError};
use docgov_types::{AccountName, ContentValue, DocHash, Document, Edge, EdgeKey};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

#[derive(Clone, Default)]
struct GraphTables {
    documents: HashMap<DocHash, Document>,
    edges: BTreeMap<EdgeKey, Edge>,
}

impl GraphTables {
    fn apply_op(&mut self, op: GraphOp) -> Result<(), StoreError> {
        match op {
            GraphOp::PutDocument(doc) => {
                if self.documents.contains_key(&doc.hash()) {
                    return Err(StoreError::Duplicate(format!("document {}", doc.hash())));
                }
                self.documents.insert(doc.hash(), doc);
            }
            GraphOp::DeleteDocument(hash) => {
                self.documents
                    .remove(&hash)
                    .ok_or_else(|| StoreError::NotFound(format!("document {}", hash)))?;
            }
            GraphOp::PutEdge(edge) => {
                let key = edge.key();
                if self.edges.contains_key(&key) {
                    return Err(StoreError::Duplicate(format!(
                        "edge {} -[{}]-> {}",
                        key.from, key.label, key.to
                    )));
                }
                self.edges.insert(key, edge);
            }
            GraphOp::DeleteEdge(key) => {
                if self.edges.remove(&key).is_none() {
                    return Err(StoreError::NotFound(format!(
                        "edge {} -[{}]-> {}",
                        key.from, key.label, key.to
                    )));
                }
            }
        }
        Ok(())
    }
}

/// An in-memory document graph for testing.
///
/// Batches are applied to a copy of the tables and swapped in only if every
/// operation succeeds, so a failing batch leaves no trace.
pub struct NullGraphStore {
    tables: Mutex<GraphTables>,
    batches_applied: Mutex<usize>,
}

impl NullGraphStore {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(GraphTables::default()),
            batches_applied: Mutex::new(0),
        }
    }

    /// Seed a document directly, bypassing batches.
    pub fn insert_document(&self, doc: Document) {
        self.tables.lock().unwrap().documents.insert(doc.hash(), doc);
    }

    /// Seed an edge directly, bypassing batches.
    pub fn insert_edge(&self, edge: Edge) {
        self.tables.lock().unwrap().edges.insert(edge.key(), edge);
    }

    pub fn document_count(&self) -> usize {
        self.tables.lock().unwrap().documents.len()
    }

    pub fn edge_count(&self) -> usize {
        self.tables.lock().unwrap().edges.len()
    }

    /// Every edge in the graph, in key order.
    pub fn all_edges(&self) -> Vec<Edge> {
        self.tables.lock().unwrap().edges.values().cloned().collect()
    }

    /// Number of batches successfully applied.
    pub fn batches_applied(&self) -> usize {
        *self.batches_applied.lock().unwrap()
    }
}

impl Default for NullGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore for NullGraphStore {
    fn get_document(&self, hash: &DocHash) -> Result<Option<Document>, StoreError> {
        Ok(self.tables.lock().unwrap().documents.get(hash).cloned())
    }

    fn edges_from(&self, from: &DocHash, label: &str) -> Result<Vec<Edge>, StoreError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .edges
            .values()
            .filter(|e| &e.from == from && e.label == label)
            .cloned()
            .collect())
    }

    fn edges_to(&self, to: &DocHash, label: &str) -> Result<Vec<Edge>, StoreError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .edges
            .values()
            .filter(|e| &e.to == to && e.label == label)
            .cloned()
            .collect())
    }

    fn edges_touching(&self, hash: &DocHash) -> Result<Vec<Edge>, StoreError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .edges
            .values()
            .filter(|e| e.touches(hash))
            .cloned()
            .collect())
    }

    fn apply(&self, batch: GraphBatch) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let mut staged = tables.clone();
        for op in batch.into_ops() {
            staged.apply_op(op)?;
        }
        *tables = staged;
        *self.batches_applied.lock().unwrap() += 1;
        Ok(())
    }
}

/// An in-memory settings store for testing.
pub struct NullSettings {
    values: Mutex<HashMap<String, ContentValue>>,
}

impl NullSettings {
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
        }
    }

    pub fn set(&self, key: &str, value: impl Into<ContentValue>) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.into());
    }

    pub fn unset(&self, key: &str) {
        self.values.lock().unwrap().remove(key);
    }
}

impl Default for NullSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for NullSettings {
    fn get_setting(&self, key: &str) -> Result<Option<ContentValue>, StoreError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }
}

/// An in-memory membership registry for testing.
pub struct NullMembers {
    members: Mutex<HashSet<AccountName>>,
}

impl NullMembers {
    pub fn new() -> Self {
        Self {
            members: Mutex::new(HashSet::new()),
        }
    }

    pub fn with_members(names: &[&str]) -> Self {
        let registry = Self::new();
        for name in names {
            registry.add(AccountName::new(*name));
        }
        registry
    }

    pub fn add(&self, account: AccountName) {
        self.members.lock().unwrap().insert(account);
    }

    pub fn remove(&self, account: &AccountName) {
        self.members.lock().unwrap().remove(account);
    }
}

impl Default for NullMembers {
    fn default() -> Self {
        Self::new()
    }
}

impl MemberStore for NullMembers {
    fn is_member(&self, account: &AccountName) -> Result<bool, StoreError> {
        Ok(self.members.lock().unwrap().contains(account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgov_types::{ContentGroup, Timestamp};

    fn doc(title: &str) -> Document {
        Document::new(
            AccountName::new("alice"),
            Timestamp::new(1000),
            vec![ContentGroup::new("details").with("title", title)],
        )
        .unwrap()
    }

    fn edge(from: &Document, to: &Document, label: &str) -> Edge {
        Edge::new(from.hash(), to.hash(), label, AccountName::new("dao"), Timestamp::new(1000))
    }

    #[test]
    fn batch_writes_documents_and_edges() {
        let store = NullGraphStore::new();
        let a = doc("a");
        let b = doc("b");
        let mut batch = GraphBatch::new();
        batch.push(GraphOp::PutDocument(a.clone()));
        batch.push(GraphOp::PutDocument(b.clone()));
        batch.push(GraphOp::PutEdge(edge(&a, &b, "original")));
        store.apply(batch).unwrap();

        assert!(store.contains_document(&a.hash()).unwrap());
        assert_eq!(store.edges_from(&a.hash(), "original").unwrap().len(), 1);
        assert_eq!(store.edges_to(&b.hash(), "original").unwrap().len(), 1);
        assert_eq!(store.edges_touching(&b.hash()).unwrap().len(), 1);
        assert_eq!(store.batches_applied(), 1);
    }

    #[test]
    fn failed_batch_leaves_no_trace() {
        let store = NullGraphStore::new();
        let a = doc("a");
        store.insert_document(a.clone());

        let mut batch = GraphBatch::new();
        batch.push(GraphOp::PutDocument(doc("b")));
        batch.push(GraphOp::PutDocument(a));
        assert!(matches!(store.apply(batch), Err(StoreError::Duplicate(_))));
        assert_eq!(store.document_count(), 1);
        assert_eq!(store.batches_applied(), 0);
    }

    #[test]
    fn deleting_a_missing_edge_fails() {
        let store = NullGraphStore::new();
        let a = doc("a");
        let mut batch = GraphBatch::new();
        batch.push(GraphOp::DeleteEdge(edge(&a, &a, "loop").key()));
        assert!(matches!(store.apply(batch), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn settings_and_members_are_scripted() {
        let settings = NullSettings::new();
        settings.set("voting_duration_sec", 3600i64);
        assert_eq!(
            settings.get_setting("voting_duration_sec").unwrap(),
            Some(ContentValue::Int(3600))
        );
        settings.unset("voting_duration_sec");
        assert_eq!(settings.get_setting("voting_duration_sec").unwrap(), None);

        let members = NullMembers::with_members(&["alice"]);
        assert!(members.is_member(&AccountName::new("alice")).unwrap());
        assert!(!members.is_member(&AccountName::new("mallory")).unwrap());
    }
}
