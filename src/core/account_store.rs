//! In-memory account store
//!
//! This module provides the `InMemoryAccountStore`, the default
//! [`AccountStore`](super::traits::AccountStore) backing.
//!
//! # Design
//!
//! The id → account map and the next-identifier counter live together in one
//! `StoreState` behind a single readers-writer lock:
//! - `create` takes the write lock, so allocating an identifier and inserting
//!   its account form one critical section
//! - `update` confirms the stored instance under the read lock and only takes
//!   the write lock to re-bind an identifier to a different instance
//! - `get_by_id` and `accounts` take the read lock and proceed concurrently
//!
//! The lock only guards the map structure. Balances are protected by each
//! account's own mutex, so lookups hold the read lock just long enough to clone
//! an `Arc`.

use crate::core::traits::AccountStore;
use crate::types::{Account, AccountId, LedgerError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
struct StoreState {
    /// Map of identifiers to the authoritative account instances
    accounts: HashMap<AccountId, Arc<Account>>,

    /// Identifier handed to the next created account
    next_id: AccountId,
}

/// Account store backed by a `HashMap` under one readers-writer lock
#[derive(Debug)]
pub struct InMemoryAccountStore {
    state: RwLock<StoreState>,
}

impl InMemoryAccountStore {
    /// Create an empty store whose first account gets identifier 1
    pub fn new() -> Self {
        InMemoryAccountStore {
            state: RwLock::new(StoreState {
                accounts: HashMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn create(&self, initial_balance: f64) -> Result<Arc<Account>, LedgerError> {
        let mut state = self.state.write();

        // Account::new validates before the counter moves, so a rejected
        // balance never burns an identifier.
        let id = state.next_id;
        let account = Arc::new(Account::new(id, initial_balance)?);
        state.accounts.insert(id, Arc::clone(&account));
        state.next_id += 1;

        debug!(id, initial_balance, "account inserted");
        Ok(account)
    }

    fn get_by_id(&self, id: AccountId) -> Result<Arc<Account>, LedgerError> {
        self.state
            .read()
            .accounts
            .get(&id)
            .cloned()
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    fn update(&self, account: &Arc<Account>) -> Result<(), LedgerError> {
        let id = account.id();

        // Confirming the instance already stored only needs the read lock
        match self.state.read().accounts.get(&id) {
            Some(stored) if Arc::ptr_eq(stored, account) => return Ok(()),
            Some(_) => {}
            None => return Err(LedgerError::account_not_found(id)),
        }

        let mut state = self.state.write();
        match state.accounts.get_mut(&id) {
            Some(stored) => {
                *stored = Arc::clone(account);
                Ok(())
            }
            None => Err(LedgerError::account_not_found(id)),
        }
    }

    fn accounts(&self) -> Vec<Arc<Account>> {
        self.state.read().accounts.values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.state.read().accounts.len()
    }
}
