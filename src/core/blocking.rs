//! Synchronous facade over the ledger service
//!
//! `BlockingLedger` owns a multi-threaded tokio runtime and exposes the four
//! ledger operations as plain blocking calls. Each call dispatches its unit of
//! work onto the runtime's workers and parks the calling thread until the
//! result arrives, which is the contract synchronous boundary code expects.
//!
//! Must not be used from inside another tokio runtime: blocking on a runtime
//! from within an async context panics.

use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};

use crate::core::ledger::LedgerService;
use crate::core::traits::AccountStore;
use crate::types::{AccountId, AccountSnapshot, CommandOutcome, LedgerCommand, LedgerError};

/// Blocking ledger backed by its own tokio runtime
#[derive(Debug)]
pub struct BlockingLedger {
    runtime: Runtime,
    service: LedgerService,
}

impl BlockingLedger {
    /// Create a blocking ledger over `store` with `worker_threads` runtime workers
    ///
    /// # Returns
    ///
    /// * `Ok(BlockingLedger)` if the runtime started
    /// * `Err(LedgerError::Runtime)` if the runtime could not be built
    pub fn new(store: Arc<dyn AccountStore>, worker_threads: usize) -> Result<Self, LedgerError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(worker_threads.max(1))
            .thread_name("ledger-worker")
            .build()?;

        Ok(Self {
            runtime,
            service: LedgerService::new(store),
        })
    }

    pub fn create_account(&self, initial_balance: f64) -> Result<AccountSnapshot, LedgerError> {
        self.runtime
            .block_on(self.service.create_account(initial_balance))
    }

    pub fn deposit(&self, id: AccountId, amount: f64) -> Result<AccountSnapshot, LedgerError> {
        self.runtime.block_on(self.service.deposit(id, amount))
    }

    pub fn withdraw(&self, id: AccountId, amount: f64) -> Result<AccountSnapshot, LedgerError> {
        self.runtime.block_on(self.service.withdraw(id, amount))
    }

    pub fn get_balance(&self, id: AccountId) -> Result<f64, LedgerError> {
        self.runtime.block_on(self.service.get_balance(id))
    }

    /// Run a parsed command and block until it completes
    pub fn execute(&self, command: LedgerCommand) -> Result<CommandOutcome, LedgerError> {
        self.runtime.block_on(self.service.execute(command))
    }

    /// The async service behind this facade
    pub fn service(&self) -> &LedgerService {
        &self.service
    }

    pub fn store(&self) -> &Arc<dyn AccountStore> {
        self.service.store()
    }
}
