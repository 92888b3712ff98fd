//! Individual vote records.
//!
//! Each cast vote is a document hanging off its proposal via a `vote` edge. A
//! voter has at most one record per proposal; voting again replaces it.

use docgov_types::{
    AccountName, Asset, ContentGroup, ContentGroups, ContentGroupsExt, DocHash, Document,
    Edge, Timestamp,
};

use crate::graph::DocumentGraph;
use crate::labels;
use crate::GovernanceError;

const GROUP: &str = "vote";
const VOTER: &str = "voter";
const PROPOSAL: &str = "proposal";
const OPTION: &str = "vote";
const DATE: &str = "date";

/// One member's vote on one proposal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vote {
    pub voter: AccountName,
    pub proposal: DocHash,
    pub option: String,
    pub power: Asset,
    pub date: Timestamp,
}

impl Vote {
    pub fn to_groups(&self) -> ContentGroups {
        vec![ContentGroup::new(GROUP)
            .with(VOTER, self.voter.clone())
            .with(PROPOSAL, self.proposal)
            .with(OPTION, self.option.clone())
            .with(labels::VOTE_POWER, self.power.clone())
            .with(DATE, self.date)]
    }

    pub fn from_groups(groups: &[ContentGroup]) -> Result<Self, GovernanceError> {
        Ok(Self {
            voter: groups.get_as(GROUP, VOTER)?,
            proposal: groups.get_as(GROUP, PROPOSAL)?,
            option: groups.get_as(GROUP, OPTION)?,
            power: groups.get_as(GROUP, labels::VOTE_POWER)?,
            date: groups.get_as(GROUP, DATE)?,
        })
    }
}

/// Every vote cast on `proposal`, with the document holding it.
pub fn votes_on(
    graph: &DocumentGraph<'_>,
    proposal: &DocHash,
) -> Result<Vec<(Document, Vote)>, GovernanceError> {
    let mut votes = Vec::new();
    for edge in graph.edges_from(proposal, labels::VOTE)? {
        let doc = graph.document_or_fail(&edge.to)?;
        let vote = Vote::from_groups(doc.groups())?;
        votes.push((doc, vote));
    }
    Ok(votes)
}

/// Record `vote`, erasing any earlier vote by the same voter on the same proposal.
///
/// Returns `true` when an earlier vote was replaced.
pub fn cast(
    graph: &mut DocumentGraph<'_>,
    vote: Vote,
    signer: &AccountName,
) -> Result<bool, GovernanceError> {
    let mut replaced = false;
    for (doc, previous) in votes_on(graph, &vote.proposal)? {
        if previous.voter == vote.voter {
            graph.erase_document(&doc.hash(), true)?;
            replaced = true;
        }
    }

    let date = vote.date;
    let proposal = vote.proposal;
    let doc = graph.create_document(vote.voter.clone(), date, vote.to_groups())?;
    graph.write_edge(Edge::new(
        proposal,
        doc.hash(),
        labels::VOTE,
        signer.clone(),
        date,
    ))?;
    Ok(replaced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgov_nullables::NullGraphStore;
    use docgov_types::Symbol;

    fn vote(voter: &str, option: &str, power: i64) -> Vote {
        Vote {
            voter: AccountName::new(voter),
            proposal: DocHash::new([7; 32]),
            option: option.to_string(),
            power: Asset::new(power, Symbol::new("VOICE", 2)),
            date: Timestamp::new(500),
        }
    }

    #[test]
    fn groups_round_trip() {
        let v = vote("alice", "pass", 120);
        assert_eq!(Vote::from_groups(&v.to_groups()).unwrap(), v);
    }

    #[test]
    fn recasting_replaces_the_voters_record() {
        let store = NullGraphStore::new();
        let mut graph = DocumentGraph::new(&store);
        let dao = AccountName::new("dao");
        let proposal = DocHash::new([7; 32]);

        assert!(!cast(&mut graph, vote("alice", "pass", 100), &dao).unwrap());
        assert!(!cast(&mut graph, vote("bob", "fail", 40), &dao).unwrap());
        assert!(cast(&mut graph, vote("alice", "abstain", 100), &dao).unwrap());

        let votes = votes_on(&graph, &proposal).unwrap();
        assert_eq!(votes.len(), 2);
        let alice = votes
            .iter()
            .find(|(_, v)| v.voter.as_str() == "alice")
            .map(|(_, v)| v.option.clone());
        assert_eq!(alice.as_deref(), Some("abstain"));
    }

    #[test]
    fn identical_recast_is_accepted() {
        let store = NullGraphStore::new();
        let mut graph = DocumentGraph::new(&store);
        let dao = AccountName::new("dao");
        cast(&mut graph, vote("alice", "pass", 100), &dao).unwrap();
        graph.commit().unwrap();

        let mut graph = DocumentGraph::new(&store);
        assert!(cast(&mut graph, vote("alice", "pass", 100), &dao).unwrap());
        graph.commit().unwrap();
        assert_eq!(store.document_count(), 1);
        assert_eq!(store.edge_count(), 1);
    }
}
