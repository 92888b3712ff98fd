//! Staged access to the document graph.
//!
//! Every engine call works against a [`DocumentGraph`]: reads fall through to the
//! backing [`GraphStore`] but see the call's own pending writes, and writes are
//! recorded as a [`GraphBatch`]. Nothing reaches the store until [`DocumentGraph::commit`],
//! so a failure anywhere in a call simply drops the overlay.

use std::collections::{BTreeMap, HashMap};

use docgov_store::{GraphBatch, GraphOp, GraphStore};
use docgov_types::{AccountName, ContentGroups, DocHash, Document, Edge, EdgeKey, Timestamp};
use tracing::trace;

use crate::GovernanceError;

pub struct DocumentGraph<'s> {
    store: &'s dyn GraphStore,
    /// `Some` = staged insert, `None` = staged erase.
    documents: HashMap<DocHash, Option<Document>>,
    edges: BTreeMap<EdgeKey, Option<Edge>>,
    batch: GraphBatch,
}

impl<'s> DocumentGraph<'s> {
    pub fn new(store: &'s dyn GraphStore) -> Self {
        Self {
            store,
            documents: HashMap::new(),
            edges: BTreeMap::new(),
            batch: GraphBatch::new(),
        }
    }

    /// Number of pending primitive operations.
    pub fn pending(&self) -> usize {
        self.batch.len()
    }

    /// Hand every staged write to the store as one batch.
    pub fn commit(self) -> Result<usize, GovernanceError> {
        let ops = self.batch.len();
        if ops > 0 {
            self.store.apply(self.batch)?;
        }
        trace!(ops, "graph batch committed");
        Ok(ops)
    }

    // ── Documents ───────────────────────────────────────────────────────

    pub fn get_document(&self, hash: &DocHash) -> Result<Option<Document>, GovernanceError> {
        match self.documents.get(hash) {
            Some(staged) => Ok(staged.clone()),
            None => Ok(self.store.get_document(hash)?),
        }
    }

    pub fn document_or_fail(&self, hash: &DocHash) -> Result<Document, GovernanceError> {
        self.get_document(hash)?
            .ok_or(GovernanceError::DocumentNotFound(*hash))
    }

    pub fn contains_document(&self, hash: &DocHash) -> Result<bool, GovernanceError> {
        Ok(self.get_document(hash)?.is_some())
    }

    /// Create a node. Content-identical documents share a hash, so creating one
    /// that already exists is refused rather than silently merged.
    pub fn create_document(
        &mut self,
        creator: AccountName,
        created: Timestamp,
        groups: ContentGroups,
    ) -> Result<Document, GovernanceError> {
        let doc = Document::new(creator, created, groups)?;
        if self.contains_document(&doc.hash())? {
            return Err(GovernanceError::DocumentExists(doc.hash()));
        }
        self.documents.insert(doc.hash(), Some(doc.clone()));
        self.batch.push(GraphOp::PutDocument(doc.clone()));
        Ok(doc)
    }

    /// Erase a node, and with `cascade` every edge touching it.
    pub fn erase_document(&mut self, hash: &DocHash, cascade: bool) -> Result<(), GovernanceError> {
        if !self.contains_document(hash)? {
            return Err(GovernanceError::DocumentNotFound(*hash));
        }
        if cascade {
            for edge in self.edges_touching(hash)? {
                self.erase_edge(&edge.key())?;
            }
        }
        self.documents.insert(*hash, None);
        self.batch.push(GraphOp::DeleteDocument(*hash));
        Ok(())
    }

    /// Replace a document with new content: the new node takes over every edge of
    /// the old one and the old node is erased. Returns the new document.
    pub fn update_document(
        &mut self,
        old: &Document,
        created: Timestamp,
        groups: ContentGroups,
    ) -> Result<Document, GovernanceError> {
        let hash = Document::hash_content(&groups)?;
        if hash == old.hash() {
            return Ok(old.clone());
        }
        let updated = self.create_document(old.creator().clone(), created, groups)?;
        self.replace_node(&old.hash(), &updated.hash())?;
        self.erase_document(&old.hash(), false)?;
        Ok(updated)
    }

    // ── Edges ───────────────────────────────────────────────────────────

    fn staged_edges<'a>(&'a self, pred: impl Fn(&Edge) -> bool + 'a) -> impl Iterator<Item = Edge> + 'a {
        self.edges
            .values()
            .filter_map(|e| e.as_ref())
            .filter(move |e| pred(e))
            .cloned()
    }

    fn merge_view(&self, base: Vec<Edge>, pred: impl Fn(&Edge) -> bool) -> Vec<Edge> {
        let mut view: Vec<Edge> = base
            .into_iter()
            .filter(|e| !self.edges.contains_key(&e.key()))
            .collect();
        view.extend(self.staged_edges(pred));
        view
    }

    pub fn edges_from(&self, from: &DocHash, label: &str) -> Result<Vec<Edge>, GovernanceError> {
        let base = self.store.edges_from(from, label)?;
        Ok(self.merge_view(base, |e| &e.from == from && e.label == label))
    }

    pub fn edges_to(&self, to: &DocHash, label: &str) -> Result<Vec<Edge>, GovernanceError> {
        let base = self.store.edges_to(to, label)?;
        Ok(self.merge_view(base, |e| &e.to == to && e.label == label))
    }

    pub fn edges_touching(&self, hash: &DocHash) -> Result<Vec<Edge>, GovernanceError> {
        let base = self.store.edges_touching(hash)?;
        Ok(self.merge_view(base, |e| e.touches(hash)))
    }

    /// The edge `from -[label]-> to`, if present.
    pub fn get_edge_if_exists(
        &self,
        from: &DocHash,
        to: &DocHash,
        label: &str,
    ) -> Result<Option<Edge>, GovernanceError> {
        Ok(self
            .edges_from(from, label)?
            .into_iter()
            .find(|e| &e.to == to))
    }

    /// The edge `from -[label]-> to`, failing if absent.
    pub fn get_edge(&self, from: &DocHash, to: &DocHash, label: &str) -> Result<Edge, GovernanceError> {
        self.get_edge_if_exists(from, to, label)?
            .ok_or_else(|| GovernanceError::EdgeNotFound {
                from: *from,
                to: *to,
                label: label.to_string(),
            })
    }

    /// Any one edge leaving `from` with `label`.
    pub fn first_edge_from(&self, from: &DocHash, label: &str) -> Result<Option<Edge>, GovernanceError> {
        Ok(self.edges_from(from, label)?.into_iter().next())
    }

    pub fn write_edge(&mut self, edge: Edge) -> Result<(), GovernanceError> {
        if self.get_edge_if_exists(&edge.from, &edge.to, &edge.label)?.is_some() {
            return Err(GovernanceError::EdgeExists {
                from: edge.from,
                to: edge.to,
                label: edge.label,
            });
        }
        self.edges.insert(edge.key(), Some(edge.clone()));
        self.batch.push(GraphOp::PutEdge(edge));
        Ok(())
    }

    pub fn erase_edge(&mut self, key: &EdgeKey) -> Result<(), GovernanceError> {
        if self.get_edge_if_exists(&key.from, &key.to, &key.label)?.is_none() {
            return Err(GovernanceError::EdgeNotFound {
                from: key.from,
                to: key.to,
                label: key.label.clone(),
            });
        }
        self.edges.insert(key.clone(), None);
        self.batch.push(GraphOp::DeleteEdge(key.clone()));
        Ok(())
    }

    /// Point every edge touching `old` at `new` instead.
    pub fn replace_node(&mut self, old: &DocHash, new: &DocHash) -> Result<usize, GovernanceError> {
        let touching = self.edges_touching(old)?;
        for edge in &touching {
            self.erase_edge(&edge.key())?;
        }
        for edge in &touching {
            let rewired = edge.rewired(old, new);
            // Two edges can collapse into one when `new` already had the same relation.
            if self
                .get_edge_if_exists(&rewired.from, &rewired.to, &rewired.label)?
                .is_none()
            {
                self.write_edge(rewired)?;
            }
        }
        Ok(touching.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgov_nullables::NullGraphStore;
    use docgov_types::ContentGroup;

    fn groups(title: &str) -> ContentGroups {
        vec![ContentGroup::new("details").with("title", title)]
    }

    fn edge(from: DocHash, to: DocHash, label: &str) -> Edge {
        Edge::new(from, to, label, AccountName::new("dao"), Timestamp::new(10))
    }

    #[test]
    fn staged_writes_are_visible_but_not_stored() {
        let store = NullGraphStore::new();
        let mut graph = DocumentGraph::new(&store);
        let a = graph
            .create_document("alice".into(), Timestamp::new(1), groups("a"))
            .unwrap();
        let b = graph
            .create_document("alice".into(), Timestamp::new(1), groups("b"))
            .unwrap();
        graph.write_edge(edge(a.hash(), b.hash(), "original")).unwrap();

        assert!(graph.contains_document(&a.hash()).unwrap());
        assert_eq!(graph.edges_from(&a.hash(), "original").unwrap().len(), 1);
        assert_eq!(store.document_count(), 0);

        drop(graph);
        assert_eq!(store.document_count(), 0);
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn commit_applies_everything_at_once() {
        let store = NullGraphStore::new();
        let mut graph = DocumentGraph::new(&store);
        let a = graph
            .create_document("alice".into(), Timestamp::new(1), groups("a"))
            .unwrap();
        graph.write_edge(edge(a.hash(), a.hash(), "self")).unwrap();
        assert_eq!(graph.commit().unwrap(), 2);
        assert_eq!(store.document_count(), 1);
        assert_eq!(store.edge_count(), 1);
        assert_eq!(store.batches_applied(), 1);
    }

    #[test]
    fn duplicates_are_refused() {
        let store = NullGraphStore::new();
        let mut graph = DocumentGraph::new(&store);
        let a = graph
            .create_document("alice".into(), Timestamp::new(1), groups("a"))
            .unwrap();
        assert!(matches!(
            graph.create_document("bob".into(), Timestamp::new(2), groups("a")),
            Err(GovernanceError::DocumentExists(_))
        ));
        graph.write_edge(edge(a.hash(), a.hash(), "self")).unwrap();
        assert!(matches!(
            graph.write_edge(edge(a.hash(), a.hash(), "self")),
            Err(GovernanceError::EdgeExists { .. })
        ));
    }

    #[test]
    fn erased_base_edges_disappear_from_view() {
        let store = NullGraphStore::new();
        let a = DocHash::new([1; 32]);
        let b = DocHash::new([2; 32]);
        store.insert_edge(edge(a, b, "proposal"));

        let mut graph = DocumentGraph::new(&store);
        let existing = graph.get_edge(&a, &b, "proposal").unwrap();
        graph.erase_edge(&existing.key()).unwrap();
        assert!(graph.get_edge_if_exists(&a, &b, "proposal").unwrap().is_none());
        assert!(matches!(
            graph.erase_edge(&existing.key()),
            Err(GovernanceError::EdgeNotFound { .. })
        ));
        assert_eq!(store.edge_count(), 1);
    }

    #[test]
    fn replace_node_rewires_stored_and_staged_edges() {
        let store = NullGraphStore::new();
        let root = DocHash::new([9; 32]);
        let mut graph = DocumentGraph::new(&store);
        let old = graph
            .create_document("alice".into(), Timestamp::new(1), groups("old"))
            .unwrap();
        graph.commit().unwrap();
        store.insert_edge(edge(root, old.hash(), "assignment"));

        let mut graph = DocumentGraph::new(&store);
        graph.write_edge(edge(old.hash(), root, "ownedby")).unwrap();
        let new = graph
            .update_document(&old, Timestamp::new(2), groups("new"))
            .unwrap();

        assert!(!graph.contains_document(&old.hash()).unwrap());
        assert!(graph.edges_touching(&old.hash()).unwrap().is_empty());
        assert_eq!(graph.edges_to(&new.hash(), "assignment").unwrap().len(), 1);
        assert_eq!(graph.edges_from(&new.hash(), "ownedby").unwrap().len(), 1);

        graph.commit().unwrap();
        assert!(store.get_document(&old.hash()).unwrap().is_none());
        assert_eq!(store.edges_to(&new.hash(), "assignment").unwrap().len(), 1);
        assert_eq!(store.edge_count(), 2);
    }

    #[test]
    fn update_with_same_content_is_a_no_op() {
        let store = NullGraphStore::new();
        let mut graph = DocumentGraph::new(&store);
        let a = graph
            .create_document("alice".into(), Timestamp::new(1), groups("a"))
            .unwrap();
        let pending = graph.pending();
        let same = graph.update_document(&a, Timestamp::new(5), groups("a")).unwrap();
        assert_eq!(same.hash(), a.hash());
        assert_eq!(graph.pending(), pending);
    }
}
