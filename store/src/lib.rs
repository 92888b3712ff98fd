//! Abstract collaborator traits for docgov.
//!
//! The proposal engine never talks to a concrete backend. Graph storage, the
//! settings store, the membership registry, the voting-power supply and the legacy
//! ballot service are all reached through these traits; in-memory implementations
//! for tests live in `docgov-nullables`.

pub mod error;
pub mod graph;
pub mod member;
pub mod settings;
pub mod voting;

pub use error::StoreError;
pub use graph::{GraphBatch, GraphOp, GraphStore};
pub use member::MemberStore;
pub use settings::SettingsStore;
pub use voting::{LegacyBallot, LegacyBallotService, VotingPowerSource};
