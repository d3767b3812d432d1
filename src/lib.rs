//! Concurrent Account Ledger Library
//! # Overview
//!
//! This library maintains a set of bank accounts with floating-point balances
//! and exposes create, deposit, withdraw and read-balance operations that are
//! safe under concurrent access.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, LedgerCommand, LedgerError)
//! - [`core`] - Ledger components:
//!   - [`core::traits`] - The `AccountStore` abstraction
//!   - [`core::account_store`] / [`core::sharded_store`] - Store implementations
//!   - [`core::ledger`] - Async service running every operation as its own task
//!   - [`core::blocking`] - Blocking facade for synchronous callers
//!   - [`core::batch_processor`] - Concurrent execution of command batches
//! - [`io`] - CSV command input and balance output
//! - [`strategy`] - Sync and async processing pipelines
//! - [`cli`] - CLI arguments parsing
//! - [`logging`] - tracing subscriber setup
//!
//! # Concurrency
//!
//! - Each account guards its balance with its own mutex; unrelated accounts
//!   never contend
//! - The store guards its identifier map with a readers-writer discipline
//! - Every service call runs as an isolated tokio task and reports exactly one
//!   result through a one-shot channel
//!
//! # Errors
//!
//! - **InvalidAmount**: non-positive deposit/withdrawal, or negative initial balance
//! - **InsufficientFunds**: withdrawal larger than the balance
//! - **AccountNotFound**: unknown account identifier

pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod strategy;
pub mod types;

pub use crate::core::{
    AccountStore, BatchProcessor, BlockingLedger, InMemoryAccountStore, LedgerService,
    ShardedAccountStore,
};
pub use io::write_balances_csv;
pub use types::{
    Account, AccountId, AccountSnapshot, CommandOutcome, ErrorKind, LedgerCommand, LedgerError,
};
