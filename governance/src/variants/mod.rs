//! Built-in proposal variants.
//!
//! Both variants replace an existing document with a merged copy when they pass.
//! They differ only in what they accept as the original.

mod edit;
mod extension;

pub use edit::EditProposal;
pub use extension::AssignmentExtensionProposal;

use docgov_types::{ContentGroup, ContentGroupsExt, DocHash, Document, Edge};
use tracing::debug;

use crate::labels;
use crate::merge::merge_content;
use crate::period::Assignment;
use crate::proposal::ProposalContext;
use crate::GovernanceError;

/// What the original document of an edit must be.
#[derive(Clone, Copy, PartialEq, Eq)]
enum OriginalKind {
    Any,
    Assignment,
}

/// `details.title`, required on the ballot of every edit.
fn title(groups: &[ContentGroup]) -> Result<String, GovernanceError> {
    if groups.lookup(labels::DETAILS, labels::TITLE).is_none() {
        return Err(GovernanceError::MissingTitle);
    }
    Ok(groups.get_as(labels::DETAILS, labels::TITLE)?)
}

/// Validate the referenced original and link the proposal to it with an
/// `original` edge.
fn link_original(
    ctx: &mut ProposalContext<'_, '_>,
    proposal: &Document,
    kind: OriginalKind,
) -> Result<DocHash, GovernanceError> {
    let groups = proposal.groups();
    if groups.lookup(labels::DETAILS, labels::ORIGINAL_DOCUMENT).is_none() {
        return Err(GovernanceError::MissingOriginalDocument);
    }
    let hash: DocHash = groups.get_as(labels::DETAILS, labels::ORIGINAL_DOCUMENT)?;

    let original = match Assignment::load_if_assignment(ctx.graph, &hash)? {
        Some(assignment) => {
            let proposed = match groups.lookup(labels::DETAILS, labels::PERIOD_COUNT) {
                Some(_) => Some(groups.get_as::<i64>(labels::DETAILS, labels::PERIOD_COUNT)?),
                None => None,
            };
            assignment.check_extension(ctx.graph, proposed, ctx.now)?;
            assignment.into_document()
        }
        None if kind == OriginalKind::Assignment => {
            return Err(GovernanceError::NotAnAssignment(hash));
        }
        None => ctx
            .graph
            .get_document(&hash)?
            .ok_or(GovernanceError::OriginalNotFound(hash))?,
    };

    if ctx
        .graph
        .get_edge_if_exists(&proposal.hash(), &original.hash(), labels::ORIGINAL)?
        .is_none()
    {
        ctx.graph.write_edge(Edge::new(
            proposal.hash(),
            original.hash(),
            labels::ORIGINAL,
            ctx.root.account().clone(),
            ctx.now,
        ))?;
    }
    Ok(original.hash())
}

/// Replace the proposal's original with the merge of the two, graph-wide.
///
/// The original is found through the `original` edge rather than
/// `details.original_document`, since an earlier edit may have replaced it.
fn merge_into_original(
    ctx: &mut ProposalContext<'_, '_>,
    proposal: &Document,
) -> Result<Document, GovernanceError> {
    let edges = ctx.graph.edges_from(&proposal.hash(), labels::ORIGINAL)?;
    let [edge] = edges.as_slice() else {
        return Err(GovernanceError::MissingOriginalEdge {
            proposal: proposal.hash(),
            found: edges.len(),
        });
    };
    let original = ctx
        .graph
        .get_document(&edge.to)?
        .ok_or(GovernanceError::OriginalNotFound(edge.to))?;

    let merged = merge_content(original.groups(), proposal.groups());
    if Document::hash_content(&merged)? == original.hash() {
        return Ok(original);
    }

    let merged = ctx
        .graph
        .create_document(original.creator().clone(), ctx.now, merged)?;
    let rewired = ctx.graph.replace_node(&original.hash(), &merged.hash())?;
    ctx.graph.erase_document(&original.hash(), true)?;
    debug!(
        original = %original.hash().short(),
        merged = %merged.hash().short(),
        rewired,
        "original replaced by merge"
    );
    Ok(merged)
}
