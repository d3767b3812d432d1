//! Error types for the ledger
//!
//! Every failure the ledger core can report is one variant of [`LedgerError`].
//! The three business errors (`InvalidAmount`, `InsufficientFunds`,
//! `AccountNotFound`) are expected, recoverable outcomes; the remaining
//! variants describe infrastructure failures of the dispatch machinery.
//!
//! Callers that only care about the category of a failure should match on
//! [`LedgerError::kind`] rather than on the payload.

use super::account::AccountId;
use thiserror::Error;

/// Main error type for the ledger
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// A non-positive (or non-finite) amount for a deposit or withdrawal,
    /// or a negative (or non-finite) initial balance for a new account
    #[error("Invalid amount {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// Withdrawal larger than the current balance
    ///
    /// The account is left untouched.
    #[error("Insufficient funds in account {id}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Account identifier
        id: AccountId,
        /// Balance at the moment of the rejected withdrawal
        balance: f64,
        /// Requested withdrawal amount
        requested: f64,
    },

    /// No account is stored under the identifier
    #[error("Account {id} not found")]
    AccountNotFound {
        /// The identifier that was looked up
        id: AccountId,
    },

    /// The unit of work ended without signaling a result
    #[error("Ledger worker ended without reporting a result")]
    WorkerLost,

    /// The async runtime backing a blocking ledger could not be started
    #[error("Failed to start ledger runtime: {message}")]
    Runtime {
        /// Description of the runtime error
        message: String,
    },
}

/// Closed set of error categories
///
/// Used by callers that map ledger outcomes onto their own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidAmount,
    InsufficientFunds,
    AccountNotFound,
    Internal,
}

impl LedgerError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: f64) -> Self {
        LedgerError::InvalidAmount { amount }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(id: AccountId, balance: f64, requested: f64) -> Self {
        LedgerError::InsufficientFunds {
            id,
            balance,
            requested,
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(id: AccountId) -> Self {
        LedgerError::AccountNotFound { id }
    }

    /// The category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::InvalidAmount { .. } => ErrorKind::InvalidAmount,
            LedgerError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            LedgerError::AccountNotFound { .. } => ErrorKind::AccountNotFound,
            LedgerError::WorkerLost | LedgerError::Runtime { .. } => ErrorKind::Internal,
        }
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::Runtime {
            message: error.to_string(),
        }
    }
}
