use docgov_store::StoreError;
use docgov_types::{ContentError, DocHash};
use thiserror::Error;

/// Broad classes of failure, used by callers to decide how to report an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller did not meet a requirement (membership, required content).
    Precondition,
    /// The proposal content is well-formed but not acceptable.
    Validation,
    /// The proposal is not in a state that allows the operation.
    State,
    /// The graph or an external source disagrees with what the engine expects.
    DataIntegrity,
    /// The storage backend failed.
    Storage,
}

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("only members can do this: {0}")]
    NotAMember(String),

    #[error("proposal [details] must contain at least one of [title, ballot_title]")]
    MissingTitle,

    #[error("proposal [details] must contain at least one of [description, ballot_description]")]
    MissingDescription,

    #[error("proposal content must not contain the [{0}] group")]
    ReservedGroup(String),

    #[error("proposal {0} not found")]
    ProposalNotFound(DocHash),

    #[error("unknown proposal type: {0}")]
    UnknownProposalType(String),

    #[error("setting {0} does not exist")]
    MissingSetting(String),

    #[error("setting {key} has type {found}, expected {expected}")]
    WrongSettingType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("edit proposal [details] must contain original_document")]
    MissingOriginalDocument,

    #[error("extension proposal [details] must contain period_count")]
    MissingPeriodCount,

    #[error("period_count on the proposal must be greater than the period count on the existing assignment; original: {current}; proposed: {proposed}")]
    InvalidPeriodCount { current: i64, proposed: i64 },

    #[error("there has to be at least 1 remaining period before editing an assignment")]
    InsufficientRemainingPeriods,

    #[error("document {0} is not an assignment")]
    NotAnAssignment(DocHash),

    #[error("invalid vote option: {0}")]
    InvalidVoteOption(String),

    #[error("content error: {0}")]
    Content(#[from] ContentError),

    #[error("voting is still active for this proposal")]
    VotingStillActive,

    #[error("voting period for proposal {0} has expired")]
    VotingExpired(DocHash),

    #[error("proposal {0} is already closed")]
    ProposalClosed(DocHash),

    #[error("proposal {0} has no vote tally")]
    MissingTally(DocHash),

    #[error("expected exactly one original edge from proposal {proposal}, found {found}")]
    MissingOriginalEdge { proposal: DocHash, found: usize },

    #[error("original document {0} not found")]
    OriginalNotFound(DocHash),

    #[error("period {0} not found")]
    PeriodNotFound(DocHash),

    #[error("no voting power supply found for {0}")]
    NoQuorumSource(String),

    #[error("ballot_id: {0} not found")]
    LegacyBallotNotFound(String),

    #[error("legacy ballot {ballot} has no {option} option")]
    LegacyBallotMalformed { ballot: String, option: String },

    #[error("document {0} already exists")]
    DocumentExists(DocHash),

    #[error("document {0} not found")]
    DocumentNotFound(DocHash),

    #[error("edge {from} -[{label}]-> {to} already exists")]
    EdgeExists {
        from: DocHash,
        to: DocHash,
        label: String,
    },

    #[error("edge {from} -[{label}]-> {to} not found")]
    EdgeNotFound {
        from: DocHash,
        to: DocHash,
        label: String,
    },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl GovernanceError {
    pub fn kind(&self) -> ErrorKind {
        use GovernanceError::*;
        match self {
            NotAMember(_)
            | MissingTitle
            | MissingDescription
            | ReservedGroup(_)
            | ProposalNotFound(_)
            | UnknownProposalType(_)
            | MissingSetting(_)
            | Config(_)
            | MissingOriginalDocument
            | MissingPeriodCount => ErrorKind::Precondition,

            InvalidPeriodCount { .. }
            | InsufficientRemainingPeriods
            | NotAnAssignment(_)
            | InvalidVoteOption(_)
            | WrongSettingType { .. }
            | Content(_) => ErrorKind::Validation,

            VotingStillActive | VotingExpired(_) | ProposalClosed(_) | MissingTally(_) => {
                ErrorKind::State
            }

            MissingOriginalEdge { .. }
            | OriginalNotFound(_)
            | PeriodNotFound(_)
            | NoQuorumSource(_)
            | LegacyBallotNotFound(_)
            | LegacyBallotMalformed { .. }
            | DocumentExists(_)
            | DocumentNotFound(_)
            | EdgeExists { .. }
            | EdgeNotFound { .. } => ErrorKind::DataIntegrity,

            Store(_) => ErrorKind::Storage,
        }
    }
}
