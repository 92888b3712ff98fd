//! The pass/fail decision and where its inputs come from.
//!
//! A proposal passes when enough of the supply took part (quorum) and pass power,
//! scaled by the pass ratio, still beats fail power. Abstentions count toward
//! quorum only. With the default 20% quorum and 0.25 ratio a proposal needs at
//! least 80% of the decisive (pass + fail) vote.

use docgov_store::{LegacyBallot, LegacyBallotService, VotingPowerSource};
use docgov_types::{AccountName, Asset, ContentGroupsExt, DocHash, Document, Symbol, Timestamp};
use std::cmp::Ordering;

use crate::graph::DocumentGraph;
use crate::labels;
use crate::tally::tally_of;
use crate::GovernanceError;

/// Denominator of every basis-point figure.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Quorum and pass-ratio parameters, in basis points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuorumRules {
    pub quorum_bps: u32,
    pub pass_ratio_bps: u32,
}

impl Default for QuorumRules {
    fn default() -> Self {
        Self {
            quorum_bps: 2_000,
            pass_ratio_bps: 2_500,
        }
    }
}

/// Voting power per canonical option plus the participation total.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BallotTotals {
    pub pass: Asset,
    pub abstain: Asset,
    pub fail: Asset,
    /// Participation counted toward quorum.
    pub total: Asset,
}

impl BallotTotals {
    /// Totals whose participation is the sum of the three options.
    pub fn from_options(pass: Asset, abstain: Asset, fail: Asset) -> Result<Self, GovernanceError> {
        let total = pass.checked_add(&abstain)?.checked_add(&fail)?;
        Ok(Self {
            pass,
            abstain,
            fail,
            total,
        })
    }

    /// Totals from a legacy ballot, whose participation is its recorded raw weight.
    pub fn from_legacy(ballot_id: &AccountName, ballot: &LegacyBallot) -> Result<Self, GovernanceError> {
        let option = |name: &str| {
            ballot
                .options
                .get(name)
                .cloned()
                .ok_or_else(|| GovernanceError::LegacyBallotMalformed {
                    ballot: ballot_id.to_string(),
                    option: name.to_string(),
                })
        };
        Ok(Self {
            pass: option(labels::OPTION_PASS)?,
            abstain: option(labels::OPTION_ABSTAIN)?,
            fail: option(labels::OPTION_FAIL)?,
            total: ballot.total_raw_weight.clone(),
        })
    }
}

/// The outcome of applying [`QuorumRules`] to a set of totals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    pub totals: BallotTotals,
    pub supply: Asset,
    pub quorum: Asset,
    pub passed: bool,
}

impl QuorumRules {
    /// Decide a ballot against the outstanding `supply`.
    pub fn decide(&self, totals: BallotTotals, supply: Asset) -> Result<Decision, GovernanceError> {
        let quorum = supply.scale_bps(self.quorum_bps);
        let quorum_met = totals.total.cmp_amount(&quorum)? != Ordering::Less;
        let scaled_pass = totals.pass.scale_bps(self.pass_ratio_bps);
        let ratio_met = scaled_pass.cmp_amount(&totals.fail)? == Ordering::Greater;
        Ok(Decision {
            totals,
            supply,
            quorum,
            passed: quorum_met && ratio_met,
        })
    }
}

/// Where the votes of a proposal are counted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutcomeSource {
    /// The proposal's own tally document.
    Tally(DocHash),
    /// An external ballot, for proposals created before tallies existed.
    Legacy(AccountName),
}

impl OutcomeSource {
    /// A `votetally` edge selects the tally; without one the proposal must carry
    /// `system.ballot_id`.
    pub fn detect(graph: &DocumentGraph<'_>, proposal: &Document) -> Result<Self, GovernanceError> {
        if let Some(edge) = graph.first_edge_from(&proposal.hash(), labels::VOTE_TALLY)? {
            return Ok(Self::Tally(edge.to));
        }
        let ballot_id = proposal
            .groups()
            .get_as::<AccountName>(labels::SYSTEM, labels::BALLOT_ID)?;
        Ok(Self::Legacy(ballot_id))
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }
}

/// Everything needed to resolve an [`OutcomeSource`].
pub struct DecisionInputs<'a> {
    pub voting: &'a dyn VotingPowerSource,
    pub legacy: &'a dyn LegacyBallotService,
    pub rules: QuorumRules,
    pub symbol: Symbol,
}

impl DecisionInputs<'_> {
    /// Decide a current-mode proposal from its tally and the supply of `quorum_source`.
    pub fn decide_tally(
        &self,
        graph: &DocumentGraph<'_>,
        proposal: &DocHash,
        quorum_source: &AccountName,
    ) -> Result<Decision, GovernanceError> {
        let (_, tally) = tally_of(graph, proposal)?.ok_or(GovernanceError::MissingTally(*proposal))?;
        let supply = self
            .voting
            .total_supply(quorum_source)?
            .ok_or_else(|| GovernanceError::NoQuorumSource(quorum_source.to_string()))?;
        self.rules.decide(tally.totals()?, supply)
    }

    /// Decide a legacy proposal from the external ballot and treasury supply.
    ///
    /// Refuses while the external ballot is still open at `now`.
    pub fn decide_legacy(
        &self,
        service: &AccountName,
        ballot_id: &AccountName,
        now: Timestamp,
    ) -> Result<Decision, GovernanceError> {
        let ballot = self
            .legacy
            .ballot(service, ballot_id)?
            .ok_or_else(|| GovernanceError::LegacyBallotNotFound(ballot_id.to_string()))?;
        if now <= ballot.end_time {
            return Err(GovernanceError::VotingStillActive);
        }
        let supply = self
            .legacy
            .treasury_supply(service, &self.symbol)?
            .ok_or_else(|| GovernanceError::NoQuorumSource(format!("{} treasury", self.symbol)))?;
        self.rules
            .decide(BallotTotals::from_legacy(ballot_id, &ballot)?, supply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgov_types::ContentError;
    use std::collections::BTreeMap;

    fn voice(amount: i64) -> Asset {
        Asset::new(amount, Symbol::new("VOICE", 2))
    }

    fn decide(pass: i64, abstain: i64, fail: i64, supply: i64) -> bool {
        let totals = BallotTotals::from_options(voice(pass), voice(abstain), voice(fail)).unwrap();
        QuorumRules::default().decide(totals, voice(supply)).unwrap().passed
    }

    #[test]
    fn quorum_boundary() {
        assert!(!decide(199, 0, 0, 1000));
        assert!(decide(200, 0, 0, 1000));
        assert!(decide(150, 50, 0, 1000));
    }

    #[test]
    fn pass_ratio_boundary() {
        // 200 * 0.25 = 50
        assert!(!decide(200, 0, 51, 1000));
        assert!(!decide(200, 0, 50, 1000));
        assert!(decide(200, 0, 49, 1000));
    }

    #[test]
    fn abstentions_count_toward_quorum_only() {
        assert!(!decide(0, 1000, 0, 1000));
        assert!(decide(4, 196, 0, 1000));
    }

    #[test]
    fn zero_supply_needs_only_the_ratio() {
        assert!(!decide(3, 0, 0, 0));
        assert!(decide(4, 0, 0, 0));
        assert!(!decide(0, 0, 0, 0));
    }

    #[test]
    fn mismatched_symbols_are_refused() {
        let totals = BallotTotals::from_options(voice(1), voice(0), voice(0)).unwrap();
        let other = Asset::new(1000, Symbol::new("HUSD", 2));
        assert!(matches!(
            QuorumRules::default().decide(totals, other),
            Err(GovernanceError::Content(ContentError::SymbolMismatch { .. }))
        ));
    }

    #[test]
    fn legacy_totals_use_raw_weight() {
        let mut options = BTreeMap::new();
        options.insert("pass".to_string(), voice(100));
        options.insert("abstain".to_string(), voice(0));
        options.insert("fail".to_string(), voice(0));
        let ballot = LegacyBallot {
            options,
            total_raw_weight: voice(250),
            end_time: Timestamp::new(10),
        };
        let totals = BallotTotals::from_legacy(&AccountName::new("b1"), &ballot).unwrap();
        assert_eq!(totals.total, voice(250));

        let mut broken = ballot.clone();
        broken.options.remove("fail");
        assert!(matches!(
            BallotTotals::from_legacy(&AccountName::new("b1"), &broken),
            Err(GovernanceError::LegacyBallotMalformed { .. })
        ));
    }
}
