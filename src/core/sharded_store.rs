//! Sharded account store
//!
//! This module provides the `ShardedAccountStore`, an
//! [`AccountStore`](super::traits::AccountStore) that trades the single
//! readers-writer lock of the in-memory store for `DashMap`'s internal
//! sharding.
//!
//! # Design
//!
//! - Identifiers come from an `AtomicU64`, so creation never takes a global lock
//! - Each insert or lookup only locks the shard that owns the identifier
//! - The initial balance is validated before an identifier is allocated
//!
//! An identifier becomes visible to lookups once its insert completes. Since
//! `create` returns only after inserting, no caller can hold an identifier that
//! a lookup cannot yet find.

use crate::core::traits::AccountStore;
use crate::types::account::validate_initial_balance;
use crate::types::{Account, AccountId, LedgerError};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Account store backed by a sharded concurrent map
#[derive(Debug)]
pub struct ShardedAccountStore {
    /// Concurrent map of identifiers to the authoritative account instances
    accounts: DashMap<AccountId, Arc<Account>>,

    /// Identifier handed to the next created account
    next_id: AtomicU64,
}

impl ShardedAccountStore {
    /// Create an empty store whose first account gets identifier 1
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for ShardedAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for ShardedAccountStore {
    fn create(&self, initial_balance: f64) -> Result<Arc<Account>, LedgerError> {
        validate_initial_balance(initial_balance)?;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let account = Arc::new(Account::new(id, initial_balance)?);
        self.accounts.insert(id, Arc::clone(&account));

        debug!(id, initial_balance, "account inserted");
        Ok(account)
    }

    fn get_by_id(&self, id: AccountId) -> Result<Arc<Account>, LedgerError> {
        self.accounts
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    fn update(&self, account: &Arc<Account>) -> Result<(), LedgerError> {
        match self.accounts.get_mut(&account.id()) {
            Some(mut entry) => {
                *entry.value_mut() = Arc::clone(account);
                Ok(())
            }
            None => Err(LedgerError::account_not_found(account.id())),
        }
    }

    fn accounts(&self) -> Vec<Arc<Account>> {
        self.accounts
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    fn len(&self) -> usize {
        self.accounts.len()
    }
}
