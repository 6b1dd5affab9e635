//! One-shot account import (`account credential balance` per line).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use udpbank_auth::Credential;
use udpbank_core::{AccountName, Amount};

use crate::account::Account;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read accounts: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Read and parse an accounts file.
pub fn load_accounts(path: impl AsRef<Path>) -> Result<Vec<Account>, ImportError> {
    let file = File::open(path)?;
    parse_accounts(BufReader::new(file))
}

/// Parse whitespace-separated `account credential balance` lines.
///
/// Blank lines and `#` comments are skipped; anything else that does not
/// parse fails the whole import.
pub fn parse_accounts(reader: impl BufRead) -> Result<Vec<Account>, ImportError> {
    let mut accounts = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        accounts.push(parse_line(trimmed).map_err(|reason| ImportError::Malformed {
            line: idx + 1,
            reason,
        })?);
    }

    Ok(accounts)
}

fn parse_line(line: &str) -> Result<Account, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [name, credential, balance] = fields[..] else {
        return Err(format!("expected 3 fields, found {}", fields.len()));
    };

    let name = AccountName::new(name).map_err(|e| e.to_string())?;
    let credential = Credential::new(credential).map_err(|e| e.to_string())?;
    let balance = balance.parse::<Amount>().map_err(|e| e.to_string())?;

    Ok(Account::with_balance(name, credential, balance))
}
