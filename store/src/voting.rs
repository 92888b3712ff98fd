//! External voting data sources.
//!
//! Voting power itself is accounted elsewhere; the engine only needs the total
//! outstanding supply (for quorum) and each voter's power at cast time. Proposals
//! created before vote tallies existed are resolved against a legacy ballot
//! service instead.

use crate::StoreError;
use docgov_types::{AccountName, Asset, Symbol, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Source of voting-power figures, addressed by a quorum-data identifier.
pub trait VotingPowerSource {
    /// Total outstanding voting power, or `None` if the source has no supply record.
    fn total_supply(&self, source: &AccountName) -> Result<Option<Asset>, StoreError>;

    /// Voting power held by `voter` right now.
    fn voting_power(&self, source: &AccountName, voter: &AccountName)
        -> Result<Asset, StoreError>;
}

/// A ballot as recorded by the legacy ballot service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyBallot {
    /// Voting power per option label.
    pub options: BTreeMap<String, Asset>,
    /// Sum of raw weight cast across all options.
    pub total_raw_weight: Asset,
    /// When voting on the ballot ends.
    pub end_time: Timestamp,
}

/// The external ballot service used by proposals that predate vote tallies.
pub trait LegacyBallotService {
    /// Look up a ballot by id.
    fn ballot(
        &self,
        service: &AccountName,
        ballot_id: &AccountName,
    ) -> Result<Option<LegacyBallot>, StoreError>;

    /// Supply recorded by the service's treasury for `symbol`.
    fn treasury_supply(
        &self,
        service: &AccountName,
        symbol: &Symbol,
    ) -> Result<Option<Asset>, StoreError>;

    /// Ask the service to close voting on a ballot.
    fn close_voting(&self, service: &AccountName, ballot_id: &AccountName)
        -> Result<(), StoreError>;
}
