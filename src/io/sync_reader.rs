//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over ledger commands from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record parsing errors are yielded as Err variants in the iterator
//! - Line numbers are included in error messages for debugging

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::LedgerCommand;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader
///
/// Yields one `Result<LedgerCommand, String>` per CSV row, reading the file
/// one record at a time.
///
/// ```no_run
/// use concurrent_ledger::io::sync_reader::SyncReader;
/// use std::path::Path;
///
/// let reader = SyncReader::new(Path::new("commands.csv")).unwrap();
/// let commands: Vec<_> = reader.filter_map(Result::ok).collect();
/// println!("Parsed {} commands", commands.len());
/// ```
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl SyncReader {
    /// Open `path` for streaming iteration
    ///
    /// The CSV reader trims whitespace and allows flexible field counts, so
    /// rows may omit trailing empty fields.
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<LedgerCommand, String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();

        let item = deserializer.next()?;
        self.line_num += 1;
        // +1 for the header row
        let line = self.line_num + 1;

        Some(match item {
            Ok(csv_record) => {
                convert_csv_record(csv_record).map_err(|e| format!("Line {}: {}", line, e))
            }
            Err(e) => Err(format!("Line {}: CSV parse error: {}", line, e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_sync_reader_fails_on_missing_file() {
        let result = SyncReader::new(Path::new("nonexistent.csv"));
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_sync_reader_iterates_commands() {
        let file = create_temp_csv(
            "op,account,amount\ncreate,,100.0\ndeposit,1,50.0\nbalance,1,\n",
        );

        let commands: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(
            commands,
            vec![
                Ok(LedgerCommand::Create {
                    initial_balance: 100.0
                }),
                Ok(LedgerCommand::Deposit { id: 1, amount: 50.0 }),
                Ok(LedgerCommand::Balance { id: 1 }),
            ]
        );
    }

    #[test]
    fn test_sync_reader_trims_whitespace() {
        let file = create_temp_csv("op,account,amount\n withdraw , 2 , 7.5 \n");

        let commands: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(
            commands,
            vec![Ok(LedgerCommand::Withdraw { id: 2, amount: 7.5 })]
        );
    }

    #[test]
    fn test_sync_reader_reports_line_numbers() {
        let file = create_temp_csv(
            "op,account,amount\ncreate,,1\ndeposit,x,1\nfreeze,1,\n",
        );

        let commands: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(commands.len(), 3);
        assert!(commands[0].is_ok());
        assert!(commands[1].as_ref().unwrap_err().starts_with("Line 3"));
        assert!(commands[2].as_ref().unwrap_err().starts_with("Line 4"));
    }

    #[test]
    fn test_sync_reader_empty_file() {
        let file = create_temp_csv("op,account,amount\n");

        assert_eq!(SyncReader::new(file.path()).unwrap().count(), 0);
    }
}
