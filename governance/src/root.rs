//! Graph identities of the governance root and of members.

use docgov_types::{AccountName, ContentError, ContentGroup, DocHash, Document};

/// The governance account and the graph node every proposal hangs off.
///
/// Built once from configuration and handed to the engine; nothing in the engine
/// derives the root from ambient context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GovernanceRoot {
    account: AccountName,
    hash: DocHash,
}

impl GovernanceRoot {
    pub fn new(account: AccountName) -> Result<Self, ContentError> {
        let hash = Document::hash_content(&root_content(&account))?;
        Ok(Self { account, hash })
    }

    /// The account recorded as creator of engine-written edges.
    pub fn account(&self) -> &AccountName {
        &self.account
    }

    pub fn hash(&self) -> DocHash {
        self.hash
    }

    /// The root document itself, for seeding a fresh graph.
    pub fn document(&self, created: docgov_types::Timestamp) -> Result<Document, ContentError> {
        Document::new(self.account.clone(), created, root_content(&self.account))
    }
}

fn root_content(account: &AccountName) -> Vec<ContentGroup> {
    vec![ContentGroup::new("root").with("root_node", account.clone())]
}

/// The graph identity of a member account.
pub fn member_hash(account: &AccountName) -> Result<DocHash, ContentError> {
    Document::hash_content(&[ContentGroup::new("member").with("member", account.clone())])
}
