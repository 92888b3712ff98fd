use docgov_types::{AccountName, ContentGroup, ContentGroups, ContentGroupsExt, Document};

use super::{link_original, merge_into_original, title, OriginalKind};
use crate::labels;
use crate::proposal::{ProposalContext, ProposalVariant};
use crate::GovernanceError;

/// An edit restricted to assignments that must carry a new `period_count`.
pub struct AssignmentExtensionProposal;

impl ProposalVariant for AssignmentExtensionProposal {
    fn proposal_type(&self) -> &'static str {
        labels::EXTENSION
    }

    fn propose_impl(
        &self,
        _proposer: &AccountName,
        groups: &mut ContentGroups,
    ) -> Result<(), GovernanceError> {
        if groups.lookup(labels::DETAILS, labels::PERIOD_COUNT).is_none() {
            return Err(GovernanceError::MissingPeriodCount);
        }
        groups.get_as::<i64>(labels::DETAILS, labels::PERIOD_COUNT)?;
        Ok(())
    }

    fn post_propose_impl(
        &self,
        ctx: &mut ProposalContext<'_, '_>,
        proposal: &Document,
    ) -> Result<(), GovernanceError> {
        link_original(ctx, proposal, OriginalKind::Assignment)?;
        Ok(())
    }

    fn pass_impl(
        &self,
        ctx: &mut ProposalContext<'_, '_>,
        proposal: &Document,
    ) -> Result<(), GovernanceError> {
        merge_into_original(ctx, proposal)?;
        Ok(())
    }

    fn ballot_content(&self, groups: &[ContentGroup]) -> Result<String, GovernanceError> {
        title(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgov_types::DocHash;

    #[test]
    fn period_count_is_required_up_front() {
        let variant = AssignmentExtensionProposal;
        let alice = AccountName::new("alice");

        let mut missing = vec![ContentGroup::new(labels::DETAILS)
            .with(labels::TITLE, "Extend")
            .with(labels::ORIGINAL_DOCUMENT, DocHash::new([1; 32]))];
        assert!(matches!(
            variant.propose_impl(&alice, &mut missing),
            Err(GovernanceError::MissingPeriodCount)
        ));

        let mut present = missing.clone();
        present[0].push(docgov_types::Content::new(labels::PERIOD_COUNT, 6i64));
        assert!(variant.propose_impl(&alice, &mut present).is_ok());
    }
}
