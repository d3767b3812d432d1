//! Concurrent Ledger CLI
//!
//! Runs ledger commands from a CSV file and prints the final balances.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- commands.csv > balances.csv
//! cargo run -- --strategy sync commands.csv > balances.csv
//! cargo run -- --strategy async --store sharded --batch-size 2000 --workers 8 commands.csv
//! RUST_LOG=info cargo run -- commands.csv
//! ```
//!
//! Logs go to stderr; stdout carries only the balance CSV.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, file not readable, etc.)

use concurrent_ledger::cli;
use concurrent_ledger::logging;
use concurrent_ledger::strategy;
use std::process;
use tracing::error;

fn main() {
    let args = cli::parse_args();

    logging::init(&args.log_level);

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, args.store, config)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        error!(error = %e, "Processing failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
