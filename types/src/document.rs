//! Content-hashed documents: the nodes of the graph.

use crate::content::{ContentGroup, ContentGroups};
use crate::error::ContentError;
use crate::{AccountName, DocHash, Timestamp};
use serde::{Deserialize, Serialize};

/// An immutable node in the document graph.
///
/// The hash covers the ordered content groups only, so two documents with identical
/// content are the same node regardless of who created them or when. "Editing" a
/// document always produces a new document under a new hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    hash: DocHash,
    creator: AccountName,
    created: Timestamp,
    groups: ContentGroups,
}

impl Document {
    /// Build a document, computing its content hash.
    pub fn new(
        creator: AccountName,
        created: Timestamp,
        groups: ContentGroups,
    ) -> Result<Self, ContentError> {
        let hash = Self::hash_content(&groups)?;
        Ok(Self {
            hash,
            creator,
            created,
            groups,
        })
    }

    /// The canonical hash of a sequence of content groups.
    pub fn hash_content(groups: &[ContentGroup]) -> Result<DocHash, ContentError> {
        let bytes =
            bincode::serialize(groups).map_err(|e| ContentError::Serialization(e.to_string()))?;
        Ok(DocHash::digest(&bytes))
    }

    pub fn hash(&self) -> DocHash {
        self.hash
    }

    pub fn creator(&self) -> &AccountName {
        &self.creator
    }

    pub fn created(&self) -> Timestamp {
        self.created
    }

    pub fn groups(&self) -> &[ContentGroup] {
        &self.groups
    }

    pub fn into_groups(self) -> ContentGroups {
        self.groups
    }
}
