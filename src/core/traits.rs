//! Core traits for account storage
//!
//! The ledger service only ever talks to an [`AccountStore`], so alternative
//! backings can be swapped in without touching the service.

use crate::types::{Account, AccountId, LedgerError};
use std::fmt::Debug;
use std::sync::Arc;

/// Trait for owning and indexing accounts by identifier
///
/// Implementations hold the authoritative `Arc<Account>` for every identifier
/// and must always hand out that same instance, so that mutations made through
/// one lookup are visible through every later lookup.
pub trait AccountStore: Send + Sync + Debug {
    /// Allocate the next identifier and insert a new account holding `initial_balance`
    ///
    /// An invalid initial balance is rejected before an identifier is allocated.
    fn create(&self, initial_balance: f64) -> Result<Arc<Account>, LedgerError>;

    /// Get the account stored under `id`
    fn get_by_id(&self, id: AccountId) -> Result<Arc<Account>, LedgerError>;

    /// Confirm the stored record for `account`'s identifier
    ///
    /// Fails with `AccountNotFound` if the identifier was never created.
    fn update(&self, account: &Arc<Account>) -> Result<(), LedgerError>;

    /// All stored accounts, in no particular order
    fn accounts(&self) -> Vec<Arc<Account>>;

    /// Number of stored accounts
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
