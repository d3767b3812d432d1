//! CSV format handling for ledger commands and balance output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to ledger commands
//! - Balance output serialization
//!
//! All functions are pure (no I/O) for easy testing.
//!
//! # Input format
//!
//! ```text
//! op,account,amount
//! create,,100.0
//! deposit,1,50.0
//! withdraw,1,20.0
//! balance,1,
//! ```
//!
//! A blank amount on `create` opens the account with a zero balance.

use crate::types::{AccountId, AccountSnapshot, LedgerCommand};
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns: op, account, amount.
/// `account` is empty for `create`; `amount` is empty for `balance`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    pub op: String,
    pub account: Option<AccountId>,
    pub amount: Option<String>,
}

/// Convert a CsvRecord to a LedgerCommand
///
/// Checks that each operation carries the fields it needs. Amount values are
/// only parsed here; whether they are acceptable is decided by the ledger.
///
/// # Returns
///
/// * `Ok(LedgerCommand)` - Successfully converted record
/// * `Err(String)` - Error message describing the conversion failure
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<LedgerCommand, String> {
    let amount = parse_amount(csv_record.amount.as_deref())?;
    let op = csv_record.op.trim().to_lowercase();

    let require_account = || {
        csv_record
            .account
            .ok_or_else(|| format!("'{}' requires an account", op))
    };
    let require_amount = || amount.ok_or_else(|| format!("'{}' requires an amount", op));

    match op.as_str() {
        "create" => Ok(LedgerCommand::Create {
            initial_balance: amount.unwrap_or(0.0),
        }),
        "deposit" => Ok(LedgerCommand::Deposit {
            id: require_account()?,
            amount: require_amount()?,
        }),
        "withdraw" => Ok(LedgerCommand::Withdraw {
            id: require_account()?,
            amount: require_amount()?,
        }),
        "balance" => Ok(LedgerCommand::Balance {
            id: require_account()?,
        }),
        _ => Err(format!("Invalid operation: '{}'", csv_record.op)),
    }
}

fn parse_amount(raw: Option<&str>) -> Result<Option<f64>, String> {
    match raw.map(str::trim) {
        Some(text) if !text.is_empty() => f64::from_str(text)
            .map(Some)
            .map_err(|_| format!("Invalid amount '{}'", text)),
        _ => Ok(None),
    }
}

/// Write account balances to CSV format
///
/// Writes accounts with columns: account, balance. Accounts are sorted by
/// identifier for deterministic output; balances use 4 decimal places.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_balances_csv(
    accounts: &[AccountSnapshot],
    output: &mut dyn Write,
) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["account", "balance"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by_key(|account| account.id);

    for account in sorted_accounts {
        writer
            .write_record(&[account.id.to_string(), format!("{:.4}", account.balance)])
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(op: &str, account: Option<AccountId>, amount: Option<&str>) -> CsvRecord {
        CsvRecord {
            op: op.to_string(),
            account,
            amount: amount.map(str::to_string),
        }
    }

    #[rstest]
    #[case::create(record("create", None, Some("100.0")), LedgerCommand::Create { initial_balance: 100.0 })]
    #[case::create_blank(record("create", None, None), LedgerCommand::Create { initial_balance: 0.0 })]
    #[case::create_whitespace(record("create", None, Some("  ")), LedgerCommand::Create { initial_balance: 0.0 })]
    #[case::deposit(record("deposit", Some(1), Some("50.5")), LedgerCommand::Deposit { id: 1, amount: 50.5 })]
    #[case::withdraw(record("withdraw", Some(2), Some("20")), LedgerCommand::Withdraw { id: 2, amount: 20.0 })]
    #[case::balance(record("balance", Some(3), None), LedgerCommand::Balance { id: 3 })]
    #[case::uppercase(record("DEPOSIT", Some(1), Some("1")), LedgerCommand::Deposit { id: 1, amount: 1.0 })]
    #[case::negative_passes_through(record("deposit", Some(1), Some("-5")), LedgerCommand::Deposit { id: 1, amount: -5.0 })]
    fn test_convert_valid_records(#[case] input: CsvRecord, #[case] expected: LedgerCommand) {
        assert_eq!(convert_csv_record(input), Ok(expected));
    }

    #[rstest]
    #[case::unknown_op(record("transfer", Some(1), Some("1")), "Invalid operation")]
    #[case::bad_amount(record("deposit", Some(1), Some("abc")), "Invalid amount")]
    #[case::deposit_without_account(record("deposit", None, Some("1")), "requires an account")]
    #[case::withdraw_without_amount(record("withdraw", Some(1), None), "requires an amount")]
    #[case::balance_without_account(record("balance", None, None), "requires an account")]
    fn test_convert_invalid_records(#[case] input: CsvRecord, #[case] message: &str) {
        let error = convert_csv_record(input).unwrap_err();
        assert!(error.contains(message), "unexpected error: {}", error);
    }

    #[test]
    fn test_write_balances_sorted() {
        let accounts = vec![
            AccountSnapshot {
                id: 2,
                balance: 0.5,
            },
            AccountSnapshot {
                id: 1,
                balance: 150.0,
            },
        ];
        let mut output = Vec::new();

        write_balances_csv(&accounts, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "account,balance\n1,150.0000\n2,0.5000\n"
        );
    }

    #[test]
    fn test_write_balances_empty() {
        let mut output = Vec::new();

        write_balances_csv(&[], &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "account,balance\n");
    }
}
