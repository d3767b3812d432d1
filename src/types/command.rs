//! Ledger commands read by the processing strategies
//!
//! A [`LedgerCommand`] is one row of the command file, already validated for
//! shape (the right fields are present for the operation). Business
//! validation of amounts happens in the ledger itself.

use super::account::{AccountId, AccountSnapshot};

/// A single ledger operation requested by the command file
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LedgerCommand {
    /// Open a new account with the given initial balance
    Create { initial_balance: f64 },

    /// Credit an existing account
    Deposit { id: AccountId, amount: f64 },

    /// Debit an existing account
    Withdraw { id: AccountId, amount: f64 },

    /// Read the balance of an existing account
    Balance { id: AccountId },
}

impl LedgerCommand {
    /// The account this command targets
    ///
    /// `None` for account creation, whose identifier is only known once the
    /// store has assigned it.
    pub fn account(&self) -> Option<AccountId> {
        match self {
            LedgerCommand::Create { .. } => None,
            LedgerCommand::Deposit { id, .. }
            | LedgerCommand::Withdraw { id, .. }
            | LedgerCommand::Balance { id } => Some(*id),
        }
    }

    /// Lowercase operation name, as written in the command file
    pub fn op_name(&self) -> &'static str {
        match self {
            LedgerCommand::Create { .. } => "create",
            LedgerCommand::Deposit { .. } => "deposit",
            LedgerCommand::Withdraw { .. } => "withdraw",
            LedgerCommand::Balance { .. } => "balance",
        }
    }
}

/// Successful result of a [`LedgerCommand`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandOutcome {
    /// Account state after a create, deposit or withdrawal
    Account(AccountSnapshot),

    /// Balance returned by a balance query
    Balance(f64),
}
