//! Nullable infrastructure for deterministic testing.
//!
//! Every external collaborator of the proposal engine (graph storage, settings,
//! membership, voting-power supply, legacy ballots, time) is abstracted behind a
//! trait. This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod store;
pub mod voting;

pub use clock::NullClock;
pub use store::{NullGraphStore, NullMembers, NullSettings};
pub use voting::{NullLegacyBallots, NullVotingPower};
