//! Document graph storage trait.

use crate::StoreError;
use docgov_types::{DocHash, Document, Edge, EdgeKey};

/// A single primitive mutation of the graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphOp {
    /// Insert a document. Fails with [`StoreError::Duplicate`] if the hash exists.
    PutDocument(Document),
    /// Remove a document. Edges are not touched; callers erase them explicitly.
    DeleteDocument(DocHash),
    /// Insert an edge. Fails with [`StoreError::Duplicate`] if the key exists.
    PutEdge(Edge),
    /// Remove an edge. Fails with [`StoreError::NotFound`] if the key is absent.
    DeleteEdge(EdgeKey),
}

/// An ordered list of graph mutations applied as one unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphBatch {
    ops: Vec<GraphOp>,
}

impl GraphBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: GraphOp) {
        self.ops.push(op);
    }

    pub fn ops(&self) -> &[GraphOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn into_ops(self) -> Vec<GraphOp> {
        self.ops
    }
}

/// Trait for the node and edge tables of the document graph.
pub trait GraphStore {
    /// Get a document by hash.
    fn get_document(&self, hash: &DocHash) -> Result<Option<Document>, StoreError>;

    /// All edges leaving `from` with `label`.
    fn edges_from(&self, from: &DocHash, label: &str) -> Result<Vec<Edge>, StoreError>;

    /// All edges arriving at `to` with `label`.
    fn edges_to(&self, to: &DocHash, label: &str) -> Result<Vec<Edge>, StoreError>;

    /// All edges with either endpoint equal to `hash`, any label.
    fn edges_touching(&self, hash: &DocHash) -> Result<Vec<Edge>, StoreError>;

    /// Apply a batch in order. Either every operation takes effect or none does.
    fn apply(&self, batch: GraphBatch) -> Result<(), StoreError>;

    /// Whether a document with this hash exists.
    fn contains_document(&self, hash: &DocHash) -> Result<bool, StoreError> {
        self.get_document(hash).map(|d| d.is_some())
    }
}
