//! Ledger service: asynchronous dispatch of account operations
//!
//! This module provides the `LedgerService` struct, the use-case layer that
//! boundary code calls to create accounts, move money and read balances.
//!
//! # Design
//!
//! Every operation runs as an isolated unit of work:
//!
//! ```text
//! caller ──dispatch──▶ tokio::spawn(unit of work) ──┐
//!    ▲                                               │ store lookup
//!    │                                               │ account mutator
//!    │                                               │ store update
//!    └──────── oneshot<Result<T, LedgerError>> ◀─────┘
//! ```
//!
//! The unit of work reports through a single `oneshot` channel carrying a
//! tagged `Result`. The sender is consumed by its one `send`, so a caller always
//! receives exactly one of success or failure. There is no cancellation and no
//! timeout: the caller waits until the unit of work signals.
//!
//! All methods must be called from within a tokio runtime.
//!
//! # Thread Safety
//!
//! The service is cheap to clone and every clone shares the same store. Balance
//! mutations are serialized by each account's own lock; the service adds no
//! locking of its own.

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{debug, error, info};

use crate::core::traits::AccountStore;
use crate::types::{AccountId, AccountSnapshot, CommandOutcome, LedgerCommand, LedgerError};

/// Account operations dispatched as independent tokio tasks
#[derive(Debug, Clone)]
pub struct LedgerService {
    /// Shared account store
    ///
    /// A trait object so that any backing can be plugged in.
    store: Arc<dyn AccountStore>,
}

impl LedgerService {
    /// Create a new LedgerService over `store`
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// The store this service operates on
    pub fn store(&self) -> &Arc<dyn AccountStore> {
        &self.store
    }

    /// Open a new account holding `initial_balance`
    ///
    /// # Returns
    ///
    /// * `Ok(AccountSnapshot)` - The new account with its assigned identifier
    /// * `Err(LedgerError::InvalidAmount)` - If the initial balance is negative or not finite
    pub async fn create_account(
        &self,
        initial_balance: f64,
    ) -> Result<AccountSnapshot, LedgerError> {
        let result = self
            .dispatch(move |store| Ok(store.create(initial_balance)?.snapshot()))
            .await;

        match &result {
            Ok(account) => info!(id = account.id, initial_balance, "Account created"),
            Err(e) => error!(initial_balance, error = %e, "Failed to create account"),
        }
        result
    }

    /// Credit `amount` to account `id`
    ///
    /// The unit of work:
    /// 1. Looks up the account in the store
    /// 2. Applies the deposit under the account's lock
    /// 3. Confirms the account back into the store
    ///
    /// # Returns
    ///
    /// * `Ok(AccountSnapshot)` - The balance this deposit produced, captured
    ///   under the account lock
    /// * `Err(LedgerError::AccountNotFound)` - If no account has this identifier
    /// * `Err(LedgerError::InvalidAmount)` - If `amount` is not strictly positive,
    ///   or the resulting balance would not be finite
    pub async fn deposit(
        &self,
        id: AccountId,
        amount: f64,
    ) -> Result<AccountSnapshot, LedgerError> {
        let result = self
            .dispatch(move |store| {
                let account = store.get_by_id(id)?;
                let balance = account.deposit(amount)?;
                store.update(&account)?;
                Ok(AccountSnapshot { id, balance })
            })
            .await;

        match &result {
            Ok(account) => info!(id, amount, balance = account.balance, "Deposit successful"),
            Err(e) => error!(id, amount, error = %e, "Deposit failed"),
        }
        result
    }

    /// Debit `amount` from account `id`
    ///
    /// Same steps as [`deposit`](Self::deposit); a rejected withdrawal leaves
    /// the balance untouched.
    ///
    /// # Returns
    ///
    /// * `Ok(AccountSnapshot)` - The balance this withdrawal produced, captured
    ///   under the account lock
    /// * `Err(LedgerError::AccountNotFound)` - If no account has this identifier
    /// * `Err(LedgerError::InvalidAmount)` - If `amount` is not strictly positive
    /// * `Err(LedgerError::InsufficientFunds)` - If `amount` exceeds the balance
    pub async fn withdraw(
        &self,
        id: AccountId,
        amount: f64,
    ) -> Result<AccountSnapshot, LedgerError> {
        let result = self
            .dispatch(move |store| {
                let account = store.get_by_id(id)?;
                let balance = account.withdraw(amount)?;
                store.update(&account)?;
                Ok(AccountSnapshot { id, balance })
            })
            .await;

        match &result {
            Ok(account) => info!(id, amount, balance = account.balance, "Withdrawal successful"),
            Err(e) => error!(id, amount, error = %e, "Withdrawal failed"),
        }
        result
    }

    /// Read the balance of account `id`
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` - The current balance
    /// * `Err(LedgerError::AccountNotFound)` - If no account has this identifier
    pub async fn get_balance(&self, id: AccountId) -> Result<f64, LedgerError> {
        let result = self
            .dispatch(move |store| Ok(store.get_by_id(id)?.balance()))
            .await;

        match &result {
            Ok(balance) => info!(id, balance, "Balance checked"),
            Err(e) => error!(id, error = %e, "Failed to get balance"),
        }
        result
    }

    /// Run a parsed command through the matching operation
    pub async fn execute(&self, command: LedgerCommand) -> Result<CommandOutcome, LedgerError> {
        debug!(op = command.op_name(), account = ?command.account(), "Executing command");
        match command {
            LedgerCommand::Create { initial_balance } => self
                .create_account(initial_balance)
                .await
                .map(CommandOutcome::Account),
            LedgerCommand::Deposit { id, amount } => {
                self.deposit(id, amount).await.map(CommandOutcome::Account)
            }
            LedgerCommand::Withdraw { id, amount } => {
                self.withdraw(id, amount).await.map(CommandOutcome::Account)
            }
            LedgerCommand::Balance { id } => self.get_balance(id).await.map(CommandOutcome::Balance),
        }
    }

    /// Run `work` as its own task and wait for its single result
    ///
    /// A task that dies before sending (a panic inside `work`) drops the
    /// sender, which surfaces here as `WorkerLost`.
    async fn dispatch<T, F>(&self, work: F) -> Result<T, LedgerError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn AccountStore) -> Result<T, LedgerError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let (sender, receiver) = oneshot::channel();

        tokio::spawn(async move {
            // Send only fails if the caller stopped waiting.
            let _ = sender.send(work(store.as_ref()));
        });

        receiver.await.unwrap_or(Err(LedgerError::WorkerLost))
    }
}
