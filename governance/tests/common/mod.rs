//! Shared fixture: an engine wired to nullable collaborators.

#![allow(dead_code)]

use docgov_governance::labels;
use docgov_governance::settings as keys;
use docgov_governance::{
    Collaborators, EngineConfig, GovernanceError, ProposalEngine, ProposalRegistry,
    ProposalVariant,
};
use docgov_nullables::{
    NullClock, NullGraphStore, NullLegacyBallots, NullMembers, NullSettings, NullVotingPower,
};
use docgov_store::GraphStore;
use docgov_types::{
    AccountName, ContentGroup, ContentGroups, DocHash, Document, Edge, Symbol, Timestamp,
};

pub const WEEK: u64 = 7 * 86_400;
pub const SUPPLY: i64 = 1_000;

pub fn name(s: &str) -> AccountName {
    AccountName::new(s)
}

pub fn quorum_source() -> AccountName {
    name("voice.token")
}

pub fn ballot_service() -> AccountName {
    name("trailservice")
}

/// A proposal kind with no behaviour of its own, for exercising the base protocol.
pub struct Poll;

impl ProposalVariant for Poll {
    fn proposal_type(&self) -> &'static str {
        "poll"
    }

    fn ballot_content(&self, groups: &[ContentGroup]) -> Result<String, GovernanceError> {
        use docgov_types::ContentGroupsExt;
        Ok(groups.get_as(labels::DETAILS, labels::TITLE)?)
    }
}

pub struct World {
    pub graph: NullGraphStore,
    pub settings: NullSettings,
    pub members: NullMembers,
    pub voting: NullVotingPower,
    pub legacy: NullLegacyBallots,
    pub clock: NullClock,
    pub config: EngineConfig,
}

impl World {
    /// Members alice, bob and carol; a week-long ballot; supply 1000.
    pub fn new() -> Self {
        let config = EngineConfig::default();
        let settings = NullSettings::new();
        settings.set(keys::VOTING_DURATION_SEC, WEEK as i64);
        settings.set(keys::QUORUM_SOURCE, quorum_source());
        settings.set(keys::LEGACY_BALLOT_SERVICE, ballot_service());

        let voting = NullVotingPower::new(config.symbol());
        voting.set_supply(&quorum_source(), SUPPLY);

        Self {
            graph: NullGraphStore::new(),
            settings,
            members: NullMembers::with_members(&["alice", "bob", "carol"]),
            voting,
            legacy: NullLegacyBallots::new(),
            clock: NullClock::default(),
            config,
        }
    }

    pub fn engine(&self) -> ProposalEngine<'_> {
        let mut registry = ProposalRegistry::with_defaults();
        registry.register(Box::new(Poll));
        ProposalEngine::new(
            Collaborators {
                graph: &self.graph,
                settings: &self.settings,
                members: &self.members,
                voting: &self.voting,
                legacy: &self.legacy,
            },
            self.config.clone(),
        )
        .expect("valid config")
        .with_registry(registry)
    }

    pub fn symbol(&self) -> Symbol {
        self.config.symbol()
    }

    pub fn root(&self) -> DocHash {
        self.config.root().unwrap().hash()
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Store a document outside of any proposal.
    pub fn seed(&self, creator: &str, groups: ContentGroups) -> Document {
        let doc = Document::new(name(creator), Timestamp::EPOCH, groups).unwrap();
        self.graph.insert_document(doc.clone());
        doc
    }

    pub fn link(&self, from: DocHash, to: DocHash, label: &str) {
        self.graph
            .insert_edge(Edge::new(from, to, label, name("dao"), Timestamp::EPOCH));
    }

    pub fn edges_from(&self, from: &DocHash, label: &str) -> Vec<Edge> {
        self.graph.edges_from(from, label).unwrap()
    }

    pub fn edges_to(&self, to: &DocHash, label: &str) -> Vec<Edge> {
        self.graph.edges_to(to, label).unwrap()
    }

    pub fn document(&self, hash: &DocHash) -> Option<Document> {
        self.graph.get_document(hash).unwrap()
    }

    /// (documents, edges, batches) for no-write assertions.
    pub fn footprint(&self) -> (usize, usize, usize) {
        (
            self.graph.document_count(),
            self.graph.edge_count(),
            self.graph.batches_applied(),
        )
    }

    /// Give `voter` power and cast `option` on `proposal`.
    pub fn vote(&self, voter: &str, option: &str, power: i64, proposal: &DocHash) {
        self.voting.set_power(&name(voter), power);
        self.engine()
            .vote(&name(voter), option, proposal, self.now())
            .unwrap();
    }
}

pub fn details(title: &str) -> ContentGroup {
    ContentGroup::new(labels::DETAILS)
        .with(labels::TITLE, title)
        .with(labels::DESCRIPTION, format!("{title}, explained"))
}
