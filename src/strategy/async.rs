//! Asynchronous batch processing strategy
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, worker_threads)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (account partitioning + create barriers)
//!     └── LedgerService (one task per operation)
//!         └── AccountStore (in-memory or sharded)
//! ```
//!
//! Batches are processed one after another so that commands spanning two
//! batches keep their file order. Inside a batch, different accounts are
//! processed in parallel on the runtime's worker threads.

use crate::cli::StoreType;
use crate::core::{BatchProcessor, LedgerService};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_balances_csv;
use crate::strategy::{create_store, ProcessingStrategy};
use crate::types::AccountSnapshot;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Configuration for batch processing
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of commands per batch
    pub batch_size: usize,
    /// Number of tokio worker threads
    pub worker_threads: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            worker_threads: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig; zero values fall back to the defaults
    pub fn new(batch_size: usize, worker_threads: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                default = default.batch_size,
                "Invalid batch_size 0, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let worker_threads = if worker_threads == 0 {
            warn!(
                default = default.worker_threads,
                "Invalid worker_threads 0, using default"
            );
            default.worker_threads
        } else {
            worker_threads
        };

        Self {
            batch_size,
            worker_threads,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    store_type: StoreType,
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(store_type: StoreType, config: BatchConfig) -> Self {
        Self { store_type, config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process commands from input file and write balances to output
    ///
    /// 1. Builds a multi-threaded tokio runtime with the configured workers
    /// 2. Reads commands in batches through `AsyncReader`
    /// 3. Runs each batch through the `BatchProcessor` and waits for it
    /// 4. Writes the final balances
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.worker_threads.max(1))
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let service = LedgerService::new(create_store(self.store_type));
            let processor = BatchProcessor::new(service.clone());

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // csv-async reads through the futures-io traits
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let mut failed = 0usize;
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                let results = processor.process_batch(batch).await;
                failed += results.iter().filter(|r| r.result.is_err()).count();
            }

            let accounts: Vec<AccountSnapshot> = service
                .store()
                .accounts()
                .iter()
                .map(|account| account.snapshot())
                .collect();
            info!(accounts = accounts.len(), failed, "Command file processed");

            write_balances_csv(&accounts, output)?;

            Ok(())
        })
    }
}
