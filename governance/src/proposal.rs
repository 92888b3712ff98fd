//! Proposal variants and their registry.
//!
//! The engine runs the same propose/vote/close protocol for every kind of
//! proposal and hands the kind-specific steps to a [`ProposalVariant`] looked
//! up by the proposal's type tag.

use std::collections::BTreeMap;
use std::fmt;

use docgov_types::{AccountName, ContentGroup, ContentGroups, Document, Timestamp};

use crate::decision::Decision;
use crate::graph::DocumentGraph;
use crate::root::GovernanceRoot;
use crate::variants::{AssignmentExtensionProposal, EditProposal};
use crate::GovernanceError;

/// What a variant hook may touch while the engine call is in flight.
pub struct ProposalContext<'c, 's> {
    /// The call's staged graph; hook writes commit or vanish with the call.
    pub graph: &'c mut DocumentGraph<'s>,
    pub root: &'c GovernanceRoot,
    pub now: Timestamp,
}

/// Kind-specific behaviour of a proposal.
///
/// Only `proposal_type` and `ballot_content` are required; the hooks default
/// to doing nothing.
pub trait ProposalVariant: Send + Sync {
    /// The type tag stored in `system.type`.
    fn proposal_type(&self) -> &'static str;

    /// Validate or reshape the author's groups before bookkeeping groups are added.
    fn propose_impl(
        &self,
        _proposer: &AccountName,
        _groups: &mut ContentGroups,
    ) -> Result<(), GovernanceError> {
        Ok(())
    }

    /// Runs after the proposal node and its bookkeeping edges are staged.
    fn post_propose_impl(
        &self,
        _ctx: &mut ProposalContext<'_, '_>,
        _proposal: &Document,
    ) -> Result<(), GovernanceError> {
        Ok(())
    }

    /// Runs on close when the proposal passed, before its approval is recorded.
    fn pass_impl(
        &self,
        _ctx: &mut ProposalContext<'_, '_>,
        _proposal: &Document,
    ) -> Result<(), GovernanceError> {
        Ok(())
    }

    /// Short text shown to voters.
    fn ballot_content(&self, groups: &[ContentGroup]) -> Result<String, GovernanceError>;
}

/// Variants by type tag.
pub struct ProposalRegistry {
    variants: BTreeMap<&'static str, Box<dyn ProposalVariant>>,
}

impl ProposalRegistry {
    pub fn new() -> Self {
        Self {
            variants: BTreeMap::new(),
        }
    }

    /// A registry with the built-in `edit` and `extension` variants.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(EditProposal));
        registry.register(Box::new(AssignmentExtensionProposal));
        registry
    }

    /// Add a variant, replacing any earlier one with the same tag.
    pub fn register(&mut self, variant: Box<dyn ProposalVariant>) {
        self.variants.insert(variant.proposal_type(), variant);
    }

    pub fn get(&self, proposal_type: &str) -> Result<&dyn ProposalVariant, GovernanceError> {
        self.variants
            .get(proposal_type)
            .map(|v| v.as_ref())
            .ok_or_else(|| GovernanceError::UnknownProposalType(proposal_type.to_string()))
    }

    pub fn types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.variants.keys().copied()
    }
}

impl Default for ProposalRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Where a proposal is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProposalStatus {
    /// Listed under the root's `proposal` edge; accepting votes.
    Open,
    /// Inside a `close` call, after leaving the open set and before an outcome edge exists.
    Resolving,
    /// Terminal.
    Passed,
    /// Terminal.
    Failed,
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Open => "open",
            Self::Resolving => "resolving",
            Self::Passed => "passed",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Result of closing a proposal.
#[derive(Clone, Debug)]
pub struct ProposalOutcome {
    pub status: ProposalStatus,
    /// The proposal as recorded after close. A passed proposal carries
    /// `system.approved_date` and therefore has a new hash.
    pub proposal: Document,
    pub decision: Decision,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels;

    struct Poll;

    impl ProposalVariant for Poll {
        fn proposal_type(&self) -> &'static str {
            "poll"
        }

        fn ballot_content(&self, _groups: &[ContentGroup]) -> Result<String, GovernanceError> {
            Ok("poll".to_string())
        }
    }

    #[test]
    fn defaults_are_registered() {
        let registry = ProposalRegistry::with_defaults();
        assert_eq!(registry.types().collect::<Vec<_>>(), vec![labels::EDIT, labels::EXTENSION]);
        assert_eq!(registry.get(labels::EDIT).unwrap().proposal_type(), labels::EDIT);
    }

    #[test]
    fn unknown_types_are_reported() {
        let registry = ProposalRegistry::new();
        assert!(matches!(
            registry.get("edit"),
            Err(GovernanceError::UnknownProposalType(t)) if t == "edit"
        ));
    }

    #[test]
    fn custom_variants_use_default_hooks() {
        let mut registry = ProposalRegistry::new();
        registry.register(Box::new(Poll));
        let variant = registry.get("poll").unwrap();
        let mut groups = ContentGroups::new();
        variant
            .propose_impl(&AccountName::new("alice"), &mut groups)
            .unwrap();
        assert!(groups.is_empty());
        assert_eq!(variant.ballot_content(&groups).unwrap(), "poll");
    }
}
