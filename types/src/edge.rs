//! Directed, labelled relationships between documents.

use crate::{AccountName, DocHash, Timestamp};
use serde::{Deserialize, Serialize};

/// Identity of an edge. At most one edge exists per key; a node may have many
/// outgoing edges with the same label as long as they point at different nodes.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    pub from: DocHash,
    pub to: DocHash,
    pub label: String,
}

/// A directed edge `from -[label]-> to`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: DocHash,
    pub to: DocHash,
    pub label: String,
    pub creator: AccountName,
    pub created: Timestamp,
}

impl Edge {
    pub fn new(
        from: DocHash,
        to: DocHash,
        label: impl Into<String>,
        creator: AccountName,
        created: Timestamp,
    ) -> Self {
        Self {
            from,
            to,
            label: label.into(),
            creator,
            created,
        }
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey {
            from: self.from,
            to: self.to,
            label: self.label.clone(),
        }
    }

    pub fn touches(&self, hash: &DocHash) -> bool {
        &self.from == hash || &self.to == hash
    }

    /// The same edge with every endpoint equal to `old` moved to `new`.
    pub fn rewired(&self, old: &DocHash, new: &DocHash) -> Self {
        let swap = |h: &DocHash| if h == old { *new } else { *h };
        Self {
            from: swap(&self.from),
            to: swap(&self.to),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewired_moves_both_endpoints() {
        let a = DocHash::new([1; 32]);
        let b = DocHash::new([2; 32]);
        let c = DocHash::new([3; 32]);
        let edge = Edge::new(a, b, "original", "dao".into(), Timestamp::EPOCH);

        let moved = edge.rewired(&b, &c);
        assert_eq!((moved.from, moved.to), (a, c));

        let looped = Edge::new(a, a, "self", "dao".into(), Timestamp::EPOCH).rewired(&a, &c);
        assert_eq!((looped.from, looped.to), (c, c));
        assert_eq!(looped.label, "self");
    }
}
