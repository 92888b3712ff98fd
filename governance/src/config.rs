//! Engine configuration with TOML file support.
//!
//! Static deployment choices live here. Values the community governs at runtime
//! (voting duration, data-source accounts, version stamps) stay in the settings
//! store and are read on every call.

use serde::{Deserialize, Serialize};
use std::path::Path;

use docgov_types::{AccountName, Symbol};
use docgov_utils::LogFormat;

use crate::decision::{QuorumRules, BPS_DENOMINATOR};
use crate::root::GovernanceRoot;
use crate::GovernanceError;

/// Raw amounts are i64, which holds at most 18 full decimal digits.
pub const MAX_VOTE_PRECISION: u8 = 18;

/// Configuration for a proposal engine.
///
/// Can be loaded from a TOML file via [`EngineConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Account that owns the governance root and signs engine-written edges.
    #[serde(default = "default_governance_account")]
    pub governance_account: String,

    /// Ticker of the voting-power token.
    #[serde(default = "default_vote_symbol")]
    pub vote_symbol: String,

    /// Decimal places of the voting-power token.
    #[serde(default = "default_vote_precision")]
    pub vote_precision: u8,

    /// Share of total supply that must vote, in basis points.
    #[serde(default = "default_quorum_bps")]
    pub quorum_bps: u32,

    /// Pass power scaled by this factor (basis points) must exceed fail power.
    #[serde(default = "default_pass_ratio_bps")]
    pub pass_ratio_bps: u32,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_governance_account() -> String {
    "dao".to_string()
}

fn default_vote_symbol() -> String {
    "VOICE".to_string()
}

fn default_vote_precision() -> u8 {
    2
}

fn default_quorum_bps() -> u32 {
    2_000
}

fn default_pass_ratio_bps() -> u32 {
    2_500
}

fn default_log_format() -> LogFormat {
    LogFormat::Human
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, GovernanceError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| GovernanceError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string and validate it.
    pub fn from_toml_str(s: &str) -> Result<Self, GovernanceError> {
        let config: Self = toml::from_str(s).map_err(|e| GovernanceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, GovernanceError> {
        toml::to_string_pretty(self).map_err(|e| GovernanceError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), GovernanceError> {
        if AccountName::parse(&self.governance_account).is_none() {
            return Err(GovernanceError::Config(format!(
                "invalid governance_account {:?}",
                self.governance_account
            )));
        }
        if self.vote_symbol.is_empty() || !self.vote_symbol.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(GovernanceError::Config(format!(
                "invalid vote_symbol {:?}",
                self.vote_symbol
            )));
        }
        if self.vote_precision > MAX_VOTE_PRECISION {
            return Err(GovernanceError::Config(format!(
                "vote_precision {} exceeds {}",
                self.vote_precision, MAX_VOTE_PRECISION
            )));
        }
        if self.quorum_bps > BPS_DENOMINATOR {
            return Err(GovernanceError::Config(format!(
                "quorum_bps {} exceeds {}",
                self.quorum_bps, BPS_DENOMINATOR
            )));
        }
        Ok(())
    }

    pub fn symbol(&self) -> Symbol {
        Symbol::new(self.vote_symbol.clone(), self.vote_precision)
    }

    pub fn rules(&self) -> QuorumRules {
        QuorumRules {
            quorum_bps: self.quorum_bps,
            pass_ratio_bps: self.pass_ratio_bps,
        }
    }

    pub fn root(&self) -> Result<GovernanceRoot, GovernanceError> {
        Ok(GovernanceRoot::new(AccountName::new(
            self.governance_account.clone(),
        ))?)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            governance_account: default_governance_account(),
            vote_symbol: default_vote_symbol(),
            vote_precision: default_vote_precision(),
            quorum_bps: default_quorum_bps(),
            pass_ratio_bps: default_pass_ratio_bps(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
