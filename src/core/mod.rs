//! Core ledger module
//!
//! This module contains the concurrent ledger components:
//! - `traits` - The `AccountStore` abstraction
//! - `account_store` - Default store: one readers-writer lock over map and counter
//! - `sharded_store` - Store over a sharded concurrent map
//! - `ledger` - Async use-case layer dispatching each operation as its own task
//! - `blocking` - Synchronous facade owning a tokio runtime
//! - `batch_processor` - Concurrent execution of command batches

pub mod account_store;
pub mod batch_processor;
pub mod blocking;
pub mod ledger;
pub mod sharded_store;
pub mod traits;

pub use account_store::InMemoryAccountStore;
pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use blocking::BlockingLedger;
pub use ledger::LedgerService;
pub use sharded_store::ShardedAccountStore;
pub use traits::AccountStore;
