//! Batch processing with account-based partitioning
//!
//! This module provides the `BatchProcessor` struct, which runs a batch of
//! ledger commands concurrently while producing the same final balances as
//! running them one after another.
//!
//! # Design
//!
//! A batch is cut into segments at every `create` command:
//!
//! ```text
//! deposit 1, withdraw 2, deposit 1 | create | balance 3, deposit 2
//! └──────── segment (concurrent) ──┘ barrier └── segment (concurrent) ┘
//! ```
//!
//! - Creates run in file order, so identifiers are assigned exactly as a
//!   sequential run would assign them
//! - Within a segment, commands are partitioned by account identifier
//! - Each account's commands run sequentially in their own tokio task, in
//!   their original order
//! - Tasks for different accounts run concurrently
//!
//! # Thread Safety
//!
//! The processor is cloneable and can be shared across async tasks; all state
//! lives in the shared [`LedgerService`].

use std::collections::HashMap;
use std::mem;

use tokio::task::JoinHandle;
use tracing::error;

use super::LedgerService;
use crate::types::{AccountId, CommandOutcome, LedgerCommand, LedgerError};

/// Result of processing a single command
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The command that was processed
    pub command: LedgerCommand,

    /// The result of processing (success or error)
    pub result: Result<CommandOutcome, LedgerError>,
}

/// Batch processor with account-based partitioning
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    service: LedgerService,
}

impl BatchProcessor {
    pub fn new(service: LedgerService) -> Self {
        Self { service }
    }

    /// Partition account-targeting commands by account identifier
    ///
    /// Commands for each account keep their original relative order.
    /// Create commands target no existing account and are skipped; callers
    /// handle them as barriers before partitioning.
    pub fn partition_by_account(
        &self,
        commands: Vec<LedgerCommand>,
    ) -> HashMap<AccountId, Vec<LedgerCommand>> {
        let mut partitions: HashMap<AccountId, Vec<LedgerCommand>> = HashMap::new();

        for command in commands {
            if let Some(id) = command.account() {
                partitions.entry(id).or_default().push(command);
            }
        }

        partitions
    }

    /// Process all commands for a single account sequentially
    ///
    /// Every command is processed even if earlier ones fail; results keep the
    /// input order.
    pub async fn process_account_commands(
        &self,
        commands: Vec<LedgerCommand>,
    ) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(commands.len());

        for command in commands {
            let result = self.service.execute(command).await;
            results.push(ProcessingResult { command, result });
        }

        results
    }

    /// Process a batch of commands
    ///
    /// # Returns
    ///
    /// One `ProcessingResult` per input command. Results of a concurrent
    /// segment may be in a different order than the input.
    pub async fn process_batch(&self, batch: Vec<LedgerCommand>) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(batch.len());
        let mut segment = Vec::new();

        for command in batch {
            if let LedgerCommand::Create { .. } = command {
                results.extend(self.process_segment(mem::take(&mut segment)).await);
                let result = self.service.execute(command).await;
                results.push(ProcessingResult { command, result });
            } else {
                segment.push(command);
            }
        }

        results.extend(self.process_segment(segment).await);
        results
    }

    /// Run one barrier-free segment, one task per account
    async fn process_segment(&self, segment: Vec<LedgerCommand>) -> Vec<ProcessingResult> {
        if segment.is_empty() {
            return Vec::new();
        }

        let mut tasks = Vec::new();
        for (_id, commands) in self.partition_by_account(segment) {
            let processor = self.clone();
            let pending = commands.clone();
            let task = tokio::spawn(async move {
                processor.process_account_commands(commands).await
            });
            tasks.push((pending, task));
        }

        join_account_tasks(tasks).await
    }
}

/// Collect the results of per-account tasks
///
/// A task that panicked reports `WorkerLost` for every command it was given,
/// keeping one result per command.
async fn join_account_tasks(
    tasks: Vec<(Vec<LedgerCommand>, JoinHandle<Vec<ProcessingResult>>)>,
) -> Vec<ProcessingResult> {
    let mut results = Vec::new();

    for (commands, task) in tasks {
        match task.await {
            Ok(account_results) => results.extend(account_results),
            Err(e) => {
                error!(error = %e, commands = commands.len(), "Account task panicked");
                results.extend(commands.into_iter().map(|command| ProcessingResult {
                    command,
                    result: Err(LedgerError::WorkerLost),
                }));
            }
        }
    }

    results
}
