//! Nullable voting sources: scripted supply, voter power and legacy ballots.

use docgov_store::{LegacyBallot, LegacyBallotService, StoreError, VotingPowerSource};
use docgov_types::{AccountName, Asset, Symbol};
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory voting-power source.
///
/// Voters without an explicit balance hold zero of the configured symbol.
pub struct NullVotingPower {
    symbol: Symbol,
    supply: Mutex<HashMap<AccountName, Asset>>,
    balances: Mutex<HashMap<AccountName, i64>>,
}

impl NullVotingPower {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            supply: Mutex::new(HashMap::new()),
            balances: Mutex::new(HashMap::new()),
        }
    }

    pub fn set_supply(&self, source: &AccountName, amount: i64) {
        self.supply
            .lock()
            .unwrap()
            .insert(source.clone(), Asset::new(amount, self.symbol.clone()));
    }

    pub fn set_power(&self, voter: &AccountName, amount: i64) {
        self.balances.lock().unwrap().insert(voter.clone(), amount);
    }
}

impl VotingPowerSource for NullVotingPower {
    fn total_supply(&self, source: &AccountName) -> Result<Option<Asset>, StoreError> {
        Ok(self.supply.lock().unwrap().get(source).cloned())
    }

    fn voting_power(
        &self,
        _source: &AccountName,
        voter: &AccountName,
    ) -> Result<Asset, StoreError> {
        let amount = self
            .balances
            .lock()
            .unwrap()
            .get(voter)
            .copied()
            .unwrap_or(0);
        Ok(Asset::new(amount, self.symbol.clone()))
    }
}

/// An in-memory legacy ballot service that records close requests.
pub struct NullLegacyBallots {
    ballots: Mutex<HashMap<AccountName, LegacyBallot>>,
    treasury: Mutex<HashMap<Symbol, Asset>>,
    closed: Mutex<Vec<AccountName>>,
    calls: Mutex<usize>,
}

impl NullLegacyBallots {
    pub fn new() -> Self {
        Self {
            ballots: Mutex::new(HashMap::new()),
            treasury: Mutex::new(HashMap::new()),
            closed: Mutex::new(Vec::new()),
            calls: Mutex::new(0),
        }
    }

    pub fn add_ballot(&self, ballot_id: &AccountName, ballot: LegacyBallot) {
        self.ballots
            .lock()
            .unwrap()
            .insert(ballot_id.clone(), ballot);
    }

    pub fn set_treasury_supply(&self, supply: Asset) {
        self.treasury
            .lock()
            .unwrap()
            .insert(supply.symbol().clone(), supply);
    }

    /// Ballot ids for which `close_voting` was requested, in order.
    pub fn closed(&self) -> Vec<AccountName> {
        self.closed.lock().unwrap().clone()
    }

    /// Number of calls of any kind made against the service.
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    fn record_call(&self) {
        *self.calls.lock().unwrap() += 1;
    }
}

impl Default for NullLegacyBallots {
    fn default() -> Self {
        Self::new()
    }
}

impl LegacyBallotService for NullLegacyBallots {
    fn ballot(
        &self,
        _service: &AccountName,
        ballot_id: &AccountName,
    ) -> Result<Option<LegacyBallot>, StoreError> {
        self.record_call();
        Ok(self.ballots.lock().unwrap().get(ballot_id).cloned())
    }

    fn treasury_supply(
        &self,
        _service: &AccountName,
        symbol: &Symbol,
    ) -> Result<Option<Asset>, StoreError> {
        self.record_call();
        Ok(self.treasury.lock().unwrap().get(symbol).cloned())
    }

    fn close_voting(
        &self,
        _service: &AccountName,
        ballot_id: &AccountName,
    ) -> Result<(), StoreError> {
        self.record_call();
        if !self.ballots.lock().unwrap().contains_key(ballot_id) {
            return Err(StoreError::NotFound(format!("ballot {}", ballot_id)));
        }
        self.closed.lock().unwrap().push(ballot_id.clone());
        Ok(())
    }
}
