use docgov_types::{ContentGroup, Document};

use super::{link_original, merge_into_original, title, OriginalKind};
use crate::labels;
use crate::proposal::{ProposalContext, ProposalVariant};
use crate::GovernanceError;

/// Proposes new content for an existing document.
///
/// `details.original_document` names the document. Every other `details` item,
/// and any extra group, is merged onto it if the proposal passes. When the
/// original is an assignment, a `details.period_count` must extend it.
pub struct EditProposal;

impl ProposalVariant for EditProposal {
    fn proposal_type(&self) -> &'static str {
        labels::EDIT
    }

    fn post_propose_impl(
        &self,
        ctx: &mut ProposalContext<'_, '_>,
        proposal: &Document,
    ) -> Result<(), GovernanceError> {
        link_original(ctx, proposal, OriginalKind::Any)?;
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
