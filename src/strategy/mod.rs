//! Processing strategy module for ledger command files
//!
//! This module defines the Strategy pattern for complete processing pipelines,
//! covering CSV parsing, ledger execution and balance output. Different
//! implementations (synchronous, asynchronous batch) can be selected at runtime.

use crate::cli::{StoreType, StrategyType};
use crate::core::{AccountStore, InMemoryAccountStore, ShardedAccountStore};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete command processing pipelines
///
/// Each strategy reads ledger commands from a CSV file, runs them through the
/// ledger and writes the final balances to output.
pub trait ProcessingStrategy: Send + Sync {
    /// Process commands from input file and write balances to output
    ///
    /// # Returns
    ///
    /// * `Ok(())` if processing completed (individual command failures included)
    /// * `Err(String)` if a fatal error occurred (file not found, I/O error, etc.)
    ///
    /// Individual command errors are logged and do not stop processing.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Build an empty account store of the requested kind
pub fn create_store(store_type: StoreType) -> Arc<dyn AccountStore> {
    match store_type {
        StoreType::Memory => Arc::new(InMemoryAccountStore::new()),
        StoreType::Sharded => Arc::new(ShardedAccountStore::new()),
    }
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `store_type` - Which account store backs the ledger
/// * `config` - Optional batch configuration (only the async strategy batches)
pub fn create_strategy(
    strategy_type: StrategyType,
    store_type: StoreType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(store_type)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(store_type, config))
        }
    }
}
