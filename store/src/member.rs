//! Membership registry trait.

use crate::StoreError;
use docgov_types::AccountName;

pub trait MemberStore {
    /// Whether `account` is a recognised member.
    fn is_member(&self, account: &AccountName) -> Result<bool, StoreError>;
}
