//! Typed access to the settings store.

use docgov_store::SettingsStore;
use docgov_types::FromContent;

use crate::GovernanceError;

/// Seconds a ballot stays open after proposing (int, required).
pub const VOTING_DURATION_SEC: &str = "voting_duration_sec";
/// Account of the voting-power source used for quorum (name, required when voting or closing).
pub const QUORUM_SOURCE: &str = "quorum_source";
/// Account of the legacy ballot service (name, required for legacy proposals).
pub const LEGACY_BALLOT_SERVICE: &str = "legacy_ballot_service";
/// Version stamps copied into every proposal's system group (text, optional).
pub const CLIENT_VERSION: &str = "client_version";
pub const CONTRACT_VERSION: &str = "contract_version";

pub const DEFAULT_VERSION: &str = "undefined";

/// Read-only typed view over a [`SettingsStore`].
pub struct Settings<'s> {
    store: &'s dyn SettingsStore,
}

impl<'s> Settings<'s> {
    pub fn new(store: &'s dyn SettingsStore) -> Self {
        Self { store }
    }

    /// The setting as `T`, or `None` if it is unset.
    pub fn get_opt<T: FromContent>(&self, key: &str) -> Result<Option<T>, GovernanceError> {
        match self.store.get_setting(key)? {
            None => Ok(None),
            Some(value) => T::from_content(&value).map(Some).ok_or_else(|| {
                GovernanceError::WrongSettingType {
                    key: key.to_string(),
                    expected: T::KIND,
                    found: value.kind(),
                }
            }),
        }
    }

    pub fn get_or_fail<T: FromContent>(&self, key: &str) -> Result<T, GovernanceError> {
        self.get_opt(key)?
            .ok_or_else(|| GovernanceError::MissingSetting(key.to_string()))
    }

    pub fn get_or_default<T: FromContent>(&self, key: &str, default: T) -> Result<T, GovernanceError> {
        Ok(self.get_opt(key)?.unwrap_or(default))
    }
}
