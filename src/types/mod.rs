//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: the account entity and its snapshot
//! - `command`: ledger commands read from input files
//! - `error`: error types for the ledger

pub mod account;
pub mod command;
pub mod error;

pub use account::{Account, AccountId, AccountSnapshot};
pub use command::{CommandOutcome, LedgerCommand};
pub use error::{ErrorKind, LedgerError};
