//! Proposal lifecycle engine for a document-graph governance system.
//!
//! Members propose changes as documents, vote with externally accounted voting
//! power, and closed proposals either record a failure or apply their change to
//! the graph.
//!
//! ## Module overview
//!
//! - [`engine`]: propose / vote / close over staged graph writes.
//! - [`graph`]: the staged [`DocumentGraph`] accessor; one batch per call.
//! - [`proposal`]: the [`ProposalVariant`] hooks and the type registry.
//! - [`variants`]: built-in `edit` and `extension` proposals.
//! - [`merge`]: pure merge of an edit onto its original.
//! - [`decision`]: quorum rules and the tally / legacy outcome sources.
//! - [`tally`], [`vote`]: vote records and per-option totals.
//! - [`period`]: period chains and assignment checks used by edits.
//! - [`config`], [`settings`]: static configuration and runtime settings.

pub mod config;
pub mod decision;
pub mod engine;
pub mod error;
pub mod graph;
pub mod labels;
pub mod merge;
pub mod period;
pub mod proposal;
pub mod root;
pub mod settings;
pub mod tally;
pub mod variants;
pub mod vote;

pub use config::EngineConfig;
pub use decision::{BallotTotals, Decision, OutcomeSource, QuorumRules};
pub use engine::{Collaborators, ProposalEngine};
pub use error::{ErrorKind, GovernanceError};
pub use graph::DocumentGraph;
pub use merge::merge_content;
pub use proposal::{
    ProposalContext, ProposalOutcome, ProposalRegistry, ProposalStatus, ProposalVariant,
};
pub use root::{member_hash, GovernanceRoot};
pub use tally::VoteTally;
pub use variants::{AssignmentExtensionProposal, EditProposal};
pub use vote::Vote;
