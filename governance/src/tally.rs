//! Aggregated voting power per ballot option.

use docgov_types::{
    Asset, ContentGroup, ContentGroups, ContentGroupsExt, DocHash, Document, Edge, Symbol,
    Timestamp, CONTENT_GROUP_LABEL,
};
use tracing::debug;

use crate::decision::BallotTotals;
use crate::graph::DocumentGraph;
use crate::labels;
use crate::root::GovernanceRoot;
use crate::vote::votes_on;
use crate::GovernanceError;

const TALLY_GROUP: &str = "tally";
const TALLY_PROPOSAL: &str = "proposal";

/// The vote tally of one proposal.
///
/// Stored as one group per ballot option (`vote_power` = running total) plus a
/// `tally` group naming the proposal, which keeps the empty tallies of different
/// proposals distinct documents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteTally {
    pub proposal: DocHash,
    /// Totals in ballot-option order.
    pub options: Vec<(String, Asset)>,
}

impl VoteTally {
    /// A tally with every option at zero.
    pub fn empty(proposal: DocHash, options: &[String], symbol: &Symbol) -> Self {
        Self {
            proposal,
            options: options
                .iter()
                .map(|o| (o.clone(), Asset::zero(symbol.clone())))
                .collect(),
        }
    }

    /// Add `power` to `option`.
    pub fn add(&mut self, option: &str, power: &Asset) -> Result<(), GovernanceError> {
        let slot = self
            .options
            .iter_mut()
            .find(|(label, _)| label == option)
            .ok_or_else(|| GovernanceError::InvalidVoteOption(option.to_string()))?;
        slot.1 = slot.1.checked_add(power)?;
        Ok(())
    }

    pub fn power(&self, option: &str) -> Option<&Asset> {
        self.options
            .iter()
            .find(|(label, _)| label == option)
            .map(|(_, power)| power)
    }

    /// Pass, abstain and fail totals for the quorum decision.
    pub fn totals(&self) -> Result<BallotTotals, GovernanceError> {
        let get = |option: &str| {
            self.power(option)
                .cloned()
                .ok_or_else(|| GovernanceError::InvalidVoteOption(option.to_string()))
        };
        BallotTotals::from_options(
            get(labels::OPTION_PASS)?,
            get(labels::OPTION_ABSTAIN)?,
            get(labels::OPTION_FAIL)?,
        )
    }

    pub fn to_groups(&self) -> ContentGroups {
        let mut groups: ContentGroups = self
            .options
            .iter()
            .map(|(option, power)| ContentGroup::new(option).with(labels::VOTE_POWER, power.clone()))
            .collect();
        groups.push(ContentGroup::new(TALLY_GROUP).with(TALLY_PROPOSAL, self.proposal));
        groups
    }

    pub fn from_groups(groups: &[ContentGroup]) -> Result<Self, GovernanceError> {
        let proposal = groups.get_as(TALLY_GROUP, TALLY_PROPOSAL)?;
        let mut options = Vec::new();
        for group in groups {
            let Some(label) = group.label() else { continue };
            if label == TALLY_GROUP {
                continue;
            }
            options.push((label.to_string(), groups.get_as(label, labels::VOTE_POWER)?));
        }
        Ok(Self { proposal, options })
    }
}

/// Option labels of a proposal's `ballot_options` group, in order.
pub fn ballot_options(proposal: &[ContentGroup]) -> Result<Vec<String>, GovernanceError> {
    let group = proposal.group_or_fail(labels::BALLOT_OPTIONS)?;
    Ok(group
        .items()
        .iter()
        .filter(|c| c.label != CONTENT_GROUP_LABEL)
        .map(|c| c.label.clone())
        .collect())
}

/// Read the tally hanging off `proposal`, if it has one.
pub fn tally_of(
    graph: &DocumentGraph<'_>,
    proposal: &DocHash,
) -> Result<Option<(Document, VoteTally)>, GovernanceError> {
    let Some(edge) = graph.first_edge_from(proposal, labels::VOTE_TALLY)? else {
        return Ok(None);
    };
    let doc = graph.document_or_fail(&edge.to)?;
    let tally = VoteTally::from_groups(doc.groups())?;
    Ok(Some((doc, tally)))
}

/// Create the empty tally of a freshly proposed document and link it.
pub fn initialize(
    graph: &mut DocumentGraph<'_>,
    root: &GovernanceRoot,
    proposal: &Document,
    symbol: &Symbol,
    now: Timestamp,
) -> Result<VoteTally, GovernanceError> {
    let options = ballot_options(proposal.groups())?;
    let tally = VoteTally::empty(proposal.hash(), &options, symbol);
    let doc = graph.create_document(root.account().clone(), now, tally.to_groups())?;
    graph.write_edge(Edge::new(
        proposal.hash(),
        doc.hash(),
        labels::VOTE_TALLY,
        root.account().clone(),
        now,
    ))?;
    Ok(tally)
}

/// Recompute the tally of `proposal` from every vote cast on it and replace the
/// stored tally node.
pub fn recompute(
    graph: &mut DocumentGraph<'_>,
    proposal: &Document,
    symbol: &Symbol,
    now: Timestamp,
) -> Result<VoteTally, GovernanceError> {
    let (current, _) =
        tally_of(graph, &proposal.hash())?.ok_or(GovernanceError::MissingTally(proposal.hash()))?;

    let options = ballot_options(proposal.groups())?;
    let mut tally = VoteTally::empty(proposal.hash(), &options, symbol);
    let votes = votes_on(graph, &proposal.hash())?;
    for (_, vote) in &votes {
        tally.add(&vote.option, &vote.power)?;
    }

    let updated = graph.update_document(&current, now, tally.to_groups())?;
    debug!(
        proposal = %proposal.hash().short(),
        tally = %updated.hash().short(),
        votes = votes.len(),
        "tally recomputed"
    );
    Ok(tally)
}
