//! Synchronous processing strategy
//!
//! Streams commands with `SyncReader` and runs them one at a time through a
//! `BlockingLedger`. Each command is still dispatched as its own unit of work
//! on the ledger runtime; the strategy simply waits for it before reading the
//! next row, so commands take effect in file order.

use crate::cli::StoreType;
use crate::core::BlockingLedger;
use crate::io::csv_format::write_balances_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{create_store, ProcessingStrategy};
use crate::types::AccountSnapshot;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Synchronous processing strategy
///
/// ```no_run
/// use concurrent_ledger::cli::StoreType;
/// use concurrent_ledger::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
///
/// let strategy = SyncProcessingStrategy::new(StoreType::Memory);
/// let mut output = std::io::stdout();
///
/// strategy.process(Path::new("commands.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy {
    store_type: StoreType,
}

impl SyncProcessingStrategy {
    pub fn new(store_type: StoreType) -> Self {
        Self { store_type }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let ledger = BlockingLedger::new(create_store(self.store_type), 1)
            .map_err(|e| e.to_string())?;

        let reader = SyncReader::new(input_path)?;

        let mut failed = 0usize;
        for result in reader {
            match result {
                Ok(command) => {
                    // The ledger logs the failure itself
                    if ledger.execute(command).is_err() {
                        failed += 1;
                    }
                }
                Err(e) => warn!(error = %e, "Skipping invalid command"),
            }
        }

        let accounts: Vec<AccountSnapshot> = ledger
            .store()
            .accounts()
            .iter()
            .map(|account| account.snapshot())
            .collect();
        info!(accounts = accounts.len(), failed, "Command file processed");

        write_balances_csv(&accounts, output)?;

        Ok(())
    }
}
