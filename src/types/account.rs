//! Account entity for the ledger
//!
//! An [`Account`] owns its balance behind a per-account mutex. Every read and
//! every mutation goes through the account's own critical section, so the
//! validation of a withdrawal and the subtraction it guards are one
//! indivisible step. Accounts are shared as `Arc<Account>`: the store hands out
//! clones of the same `Arc`, which makes all mutators converge on one lock per
//! account while operations on different accounts never contend.

use super::error::LedgerError;
use parking_lot::Mutex;

/// Account identifier
///
/// Assigned by the store, starting at 1.
pub type AccountId = u64;

/// A bank account with a synchronized balance
#[derive(Debug)]
pub struct Account {
    /// Immutable identifier
    id: AccountId,

    /// Current balance, never negative once an operation has succeeded
    balance: Mutex<f64>,
}

/// Point-in-time view of an account
///
/// Captured under the account lock, so it never reflects a half-applied
/// operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccountSnapshot {
    pub id: AccountId,
    pub balance: f64,
}

impl Account {
    /// Create a new account
    ///
    /// # Returns
    ///
    /// * `Ok(Account)` holding `initial_balance`
    /// * `Err(LedgerError::InvalidAmount)` if the initial balance is negative or not finite
    pub fn new(id: AccountId, initial_balance: f64) -> Result<Self, LedgerError> {
        validate_initial_balance(initial_balance)?;
        Ok(Account {
            id,
            balance: Mutex::new(initial_balance),
        })
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Credit `amount` to the account
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` - The balance right after this deposit
    /// * `Err(LedgerError::InvalidAmount)` if `amount` is not strictly positive,
    ///   or if adding it would leave the finite range
    pub fn deposit(&self, amount: f64) -> Result<f64, LedgerError> {
        let mut balance = self.balance.lock();
        validate_amount(amount)?;
        let next = *balance + amount;
        if !next.is_finite() {
            return Err(LedgerError::invalid_amount(amount));
        }
        *balance = next;
        Ok(next)
    }

    /// Debit `amount` from the account
    ///
    /// The funds check and the subtraction happen while holding the lock, so
    /// two concurrent withdrawals can never both pass the check against the
    /// same balance.
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` - The balance right after this withdrawal
    /// * `Err(LedgerError::InvalidAmount)` if `amount` is not strictly positive
    /// * `Err(LedgerError::InsufficientFunds)` if `amount` exceeds the balance
    pub fn withdraw(&self, amount: f64) -> Result<f64, LedgerError> {
        let mut balance = self.balance.lock();
        validate_amount(amount)?;
        if amount > *balance {
            return Err(LedgerError::insufficient_funds(self.id, *balance, amount));
        }
        *balance -= amount;
        Ok(*balance)
    }

    /// Current balance
    pub fn balance(&self) -> f64 {
        *self.balance.lock()
    }

    pub fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            id: self.id,
            balance: self.balance(),
        }
    }
}

/// Check an initial balance before an identifier is spent on it
pub fn validate_initial_balance(initial_balance: f64) -> Result<(), LedgerError> {
    if !initial_balance.is_finite() || initial_balance < 0.0 {
        return Err(LedgerError::invalid_amount(initial_balance));
    }
    Ok(())
}

fn validate_amount(amount: f64) -> Result<(), LedgerError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(LedgerError::invalid_amount(amount));
    }
    Ok(())
}
