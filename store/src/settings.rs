//! Settings store trait.

use crate::StoreError;
use docgov_types::ContentValue;

/// Typed key-value settings maintained outside the engine (voting duration,
/// quorum data source, version stamps).
pub trait SettingsStore {
    /// Get a setting by key, or `None` if it was never set.
    fn get_setting(&self, key: &str) -> Result<Option<ContentValue>, StoreError>;
}
