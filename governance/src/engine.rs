//! The proposal lifecycle engine: propose, vote and close.
//!
//! Every call stages its graph writes in a [`DocumentGraph`] and commits them as
//! one batch at the very end, so a failure at any step leaves the store as it was.

use docgov_store::{GraphStore, LegacyBallotService, MemberStore, SettingsStore, VotingPowerSource};
use docgov_types::{
    AccountName, Asset, Content, ContentError, ContentGroup, ContentGroups, ContentGroupsExt, DocHash,
    Document, Edge, Timestamp,
};
use docgov_utils::{format_deadline, format_duration};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::decision::{DecisionInputs, OutcomeSource};
use crate::graph::DocumentGraph;
use crate::labels;
use crate::proposal::{ProposalContext, ProposalOutcome, ProposalRegistry, ProposalStatus};
use crate::root::{member_hash, GovernanceRoot};
use crate::settings::{self as keys, Settings};
use crate::tally::{self, VoteTally};
use crate::vote::{self, Vote};
use crate::GovernanceError;

/// Groups only the engine writes into a proposal.
const RESERVED_GROUPS: [&str; 3] = [labels::SYSTEM, labels::BALLOT, labels::BALLOT_OPTIONS];

/// The external systems the engine reads from and writes to.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub graph: &'a dyn GraphStore,
    pub settings: &'a dyn SettingsStore,
    pub members: &'a dyn MemberStore,
    pub voting: &'a dyn VotingPowerSource,
    pub legacy: &'a dyn LegacyBallotService,
}

pub struct ProposalEngine<'a> {
    io: Collaborators<'a>,
    config: EngineConfig,
    root: GovernanceRoot,
    registry: ProposalRegistry,
}

impl<'a> ProposalEngine<'a> {
    /// An engine with the built-in variants, rooted at the configured account.
    pub fn new(io: Collaborators<'a>, config: EngineConfig) -> Result<Self, GovernanceError> {
        config.validate()?;
        let root = config.root()?;
        Ok(Self {
            io,
            config,
            root,
            registry: ProposalRegistry::with_defaults(),
        })
    }

    pub fn with_registry(mut self, registry: ProposalRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn root(&self) -> &GovernanceRoot {
        &self.root
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry_mut(&mut self) -> &mut ProposalRegistry {
        &mut self.registry
    }

    fn settings(&self) -> Settings<'a> {
        Settings::new(self.io.settings)
    }

    fn require_member(&self, account: &AccountName) -> Result<(), GovernanceError> {
        if self.io.members.is_member(account)? {
            Ok(())
        } else {
            Err(GovernanceError::NotAMember(account.to_string()))
        }
    }

    /// Submit a proposal of `proposal_type` with the author's content groups.
    pub fn propose(
        &self,
        proposal_type: &str,
        proposer: &AccountName,
        mut groups: ContentGroups,
        now: Timestamp,
    ) -> Result<Document, GovernanceError> {
        self.require_member(proposer)?;
        let variant = self.registry.get(proposal_type)?;
        variant.propose_impl(proposer, &mut groups)?;
        if let Some(reserved) = groups
            .iter()
            .filter_map(ContentGroup::label)
            .find(|l| RESERVED_GROUPS.contains(l))
        {
            return Err(GovernanceError::ReservedGroup(reserved.to_string()));
        }

        let title = first_text(&groups, &[labels::TITLE, labels::BALLOT_TITLE])?
            .ok_or(GovernanceError::MissingTitle)?;
        let description = first_text(&groups, &[labels::DESCRIPTION, labels::BALLOT_DESCRIPTION])?
            .ok_or(GovernanceError::MissingDescription)?;

        let settings = self.settings();
        let duration = settings.get_or_fail::<i64>(keys::VOTING_DURATION_SEC)?;
        let duration = u64::try_from(duration).map_err(|_| {
            GovernanceError::Config(format!(
                "{} must not be negative, got {}",
                keys::VOTING_DURATION_SEC,
                duration
            ))
        })?;
        let expiration = now.plus_secs(duration);

        groups.push(
            ContentGroup::new(labels::SYSTEM)
                .with(
                    labels::CLIENT_VERSION,
                    settings.get_or_default(keys::CLIENT_VERSION, keys::DEFAULT_VERSION.to_string())?,
                )
                .with(
                    labels::CONTRACT_VERSION,
                    settings.get_or_default(keys::CONTRACT_VERSION, keys::DEFAULT_VERSION.to_string())?,
                )
                .with(labels::PROPOSER, proposer.clone())
                .with(labels::NODE_LABEL, title)
                .with(labels::DESCRIPTION, description)
                .with(labels::TYPE, variant.proposal_type()),
        );
        groups.push(ContentGroup::new(labels::BALLOT).with(labels::EXPIRATION, expiration));
        let zero = Asset::zero(self.config.symbol());
        groups.push(
            labels::BALLOT_DEFAULT_OPTIONS
                .iter()
                .fold(ContentGroup::new(labels::BALLOT_OPTIONS), |g, option| {
                    g.with(*option, zero.clone())
                }),
        );

        let mut graph = DocumentGraph::new(self.io.graph);
        let proposal = graph.create_document(proposer.clone(), now, groups)?;
        let member = member_hash(proposer)?;
        for (from, to, label) in [
            (member, proposal.hash(), labels::OWNS),
            (proposal.hash(), member, labels::OWNED_BY),
            (self.root.hash(), proposal.hash(), labels::PROPOSAL),
        ] {
            graph.write_edge(Edge::new(from, to, label, proposer.clone(), now))?;
        }
        tally::initialize(&mut graph, &self.root, &proposal, &self.config.symbol(), now)?;

        let mut ctx = ProposalContext {
            graph: &mut graph,
            root: &self.root,
            now,
        };
        variant.post_propose_impl(&mut ctx, &proposal)?;

        let ops = graph.commit()?;
        info!(
            proposal = %proposal.hash().short(),
            proposer = %proposer,
            proposal_type = variant.proposal_type(),
            voting = %format_duration(duration),
            ops,
            "proposal created"
        );
        Ok(proposal)
    }

    /// Cast or replace `voter`'s vote and return the recomputed tally.
    pub fn vote(
        &self,
        voter: &AccountName,
        option: &str,
        proposal_hash: &DocHash,
        now: Timestamp,
    ) -> Result<VoteTally, GovernanceError> {
        self.require_member(voter)?;
        let mut graph = DocumentGraph::new(self.io.graph);
        let proposal = self.open_proposal(&graph, proposal_hash)?;
        if tally::tally_of(&graph, proposal_hash)?.is_none() {
            return Err(GovernanceError::MissingTally(*proposal_hash));
        }

        let expiration: Timestamp = proposal.groups().get_as(labels::BALLOT, labels::EXPIRATION)?;
        if now > expiration {
            return Err(GovernanceError::VotingExpired(*proposal_hash));
        }
        if !tally::ballot_options(proposal.groups())?
            .iter()
            .any(|o| o == option)
        {
            return Err(GovernanceError::InvalidVoteOption(option.to_string()));
        }

        let source: AccountName = self.settings().get_or_fail(keys::QUORUM_SOURCE)?;
        let power = self.io.voting.voting_power(&source, voter)?;
        let replaced = vote::cast(
            &mut graph,
            Vote {
                voter: voter.clone(),
                proposal: *proposal_hash,
                option: option.to_string(),
                power: power.clone(),
                date: now,
            },
            self.root.account(),
        )?;
        let tally = tally::recompute(&mut graph, &proposal, &self.config.symbol(), now)?;

        graph.commit()?;
        debug!(
            proposal = %proposal_hash.short(),
            voter = %voter,
            option,
            power = %power,
            replaced,
            closes = %format_deadline(now.as_secs(), expiration.as_secs()),
            "vote recorded"
        );
        Ok(tally)
    }

    /// Resolve a proposal and record the outcome.
    pub fn close(
        &self,
        proposal_hash: &DocHash,
        now: Timestamp,
    ) -> Result<ProposalOutcome, GovernanceError> {
        let mut graph = DocumentGraph::new(self.io.graph);
        let proposal = self.open_proposal(&graph, proposal_hash)?;
        let source = OutcomeSource::detect(&graph, &proposal)?;

        let listing = graph.get_edge(&self.root.hash(), proposal_hash, labels::PROPOSAL)?;
        graph.erase_edge(&listing.key())?;
        debug!(
            proposal = %proposal_hash.short(),
            status = %ProposalStatus::Resolving,
            legacy = source.is_legacy(),
            "closing proposal"
        );

        let inputs = DecisionInputs {
            voting: self.io.voting,
            legacy: self.io.legacy,
            rules: self.config.rules(),
            symbol: self.config.symbol(),
        };
        let settings = self.settings();
        let (decision, legacy_ballot) = match &source {
            OutcomeSource::Tally(_) => {
                let quorum_source: AccountName = settings.get_or_fail(keys::QUORUM_SOURCE)?;
                (inputs.decide_tally(&graph, proposal_hash, &quorum_source)?, None)
            }
            OutcomeSource::Legacy(ballot_id) => {
                let service: AccountName = settings.get_or_fail(keys::LEGACY_BALLOT_SERVICE)?;
                (
                    inputs.decide_legacy(&service, ballot_id, now)?,
                    Some((service, ballot_id.clone())),
                )
            }
        };

        let (status, recorded, outcome_label) = if decision.passed {
            let mut stamped = proposal.groups().to_vec();
            stamped
                .group_mut(labels::SYSTEM)
                .ok_or_else(|| ContentError::GroupNotFound(labels::SYSTEM.to_string()))?
                .insert_or_replace(Content::new(labels::APPROVED_DATE, now));

            let proposal_type: String = proposal.groups().get_as(labels::SYSTEM, labels::TYPE)?;
            let variant = self.registry.get(&proposal_type)?;
            let mut ctx = ProposalContext {
                graph: &mut graph,
                root: &self.root,
                now,
            };
            variant.pass_impl(&mut ctx, &proposal)?;

            let approved = graph.update_document(&proposal, proposal.created(), stamped)?;
            (ProposalStatus::Passed, approved, labels::PASSED_PROPS)
        } else {
            (ProposalStatus::Failed, proposal, labels::FAILED_PROPS)
        };
        graph.write_edge(Edge::new(
            self.root.hash(),
            recorded.hash(),
            outcome_label,
            self.root.account().clone(),
            now,
        ))?;

        if let Some((service, ballot_id)) = &legacy_ballot {
            self.io.legacy.close_voting(service, ballot_id)?;
        }
        let ops = graph.commit()?;
        info!(
            proposal = %proposal_hash.short(),
            recorded = %recorded.hash().short(),
            status = %status,
            total = %decision.totals.total,
            quorum = %decision.quorum,
            legacy = legacy_ballot.is_some(),
            ops,
            "proposal closed"
        );
        Ok(ProposalOutcome {
            status,
            proposal: recorded,
            decision,
        })
    }

    /// Lifecycle status of a proposal node.
    pub fn status(&self, proposal_hash: &DocHash) -> Result<ProposalStatus, GovernanceError> {
        let graph = DocumentGraph::new(self.io.graph);
        if !graph.contains_document(proposal_hash)? {
            return Err(GovernanceError::ProposalNotFound(*proposal_hash));
        }
        let root = self.root.hash();
        for (label, status) in [
            (labels::PROPOSAL, ProposalStatus::Open),
            (labels::PASSED_PROPS, ProposalStatus::Passed),
            (labels::FAILED_PROPS, ProposalStatus::Failed),
        ] {
            if graph.get_edge_if_exists(&root, proposal_hash, label)?.is_some() {
                return Ok(status);
            }
        }
        Err(GovernanceError::ProposalNotFound(*proposal_hash))
    }

    /// The text shown to voters, as defined by the proposal's variant.
    pub fn ballot_content(&self, proposal_hash: &DocHash) -> Result<String, GovernanceError> {
        let graph = DocumentGraph::new(self.io.graph);
        let proposal = graph
            .get_document(proposal_hash)?
            .ok_or(GovernanceError::ProposalNotFound(*proposal_hash))?;
        let proposal_type: String = proposal.groups().get_as(labels::SYSTEM, labels::TYPE)?;
        self.registry
            .get(&proposal_type)?
            .ballot_content(proposal.groups())
    }

    /// The proposal document, provided it is still listed under the root.
    fn open_proposal(
        &self,
        graph: &DocumentGraph<'_>,
        proposal_hash: &DocHash,
    ) -> Result<Document, GovernanceError> {
        let proposal = graph
            .get_document(proposal_hash)?
            .ok_or(GovernanceError::ProposalNotFound(*proposal_hash))?;
        if graph
            .get_edge_if_exists(&self.root.hash(), proposal_hash, labels::PROPOSAL)?
            .is_none()
        {
            return Err(GovernanceError::ProposalClosed(*proposal_hash));
        }
        Ok(proposal)
    }
}

/// The first of `items` present in `details`, as text.
fn first_text(groups: &[ContentGroup], items: &[&str]) -> Result<Option<String>, GovernanceError> {
    for item in items {
        if groups.lookup(labels::DETAILS, item).is_some() {
            return Ok(Some(groups.get_as(labels::DETAILS, item)?));
        }
    }
    Ok(None)
}
