//! Accounting module (in-memory account ledger).
//!
//! Pure domain logic only: no sockets, no async. The ledger is safe to share
//! between threads behind an `Arc`.

pub mod account;
pub mod import;
pub mod ledger;

pub use account::Account;
pub use import::{ImportError, load_accounts, parse_accounts};
pub use ledger::{Ledger, LedgerError, LedgerResult};
