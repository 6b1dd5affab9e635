use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::debug;

use udpbank_auth::Credential;
use udpbank_core::{AccountName, Amount};

use crate::account::Account;

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Rejection reasons returned by ledger operations.
///
/// These are ordinary outcomes, not faults. The `Display` text of the first
/// three is exactly what goes on the wire.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LedgerError {
    /// Unknown account, or known account with the wrong credential.
    ///
    /// The two cases are merged so a caller cannot probe which names exist.
    #[error("not authorised")]
    NotAuthorised,

    #[error("insufficient funds")]
    InsufficientFunds,

    #[error("account already exists")]
    AlreadyExists,

    /// Negative transfer amount.
    #[error("invalid amount")]
    InvalidAmount,

    /// Crediting the destination would overflow its balance.
    #[error("balance overflow")]
    Overflow,
}

/// The authoritative in-memory set of accounts.
///
/// Every public operation runs its whole lookup/authorise/check/mutate
/// sequence under one mutex spanning all accounts, so two transfers touching
/// the same account can never interleave. The lock is never held across IO.
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: Mutex<HashMap<AccountName, Account>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a ledger from an import source. Duplicate names: last one wins.
    pub fn from_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let mut map = HashMap::new();
        for account in accounts {
            let name = account.name().clone();
            if map.insert(name.clone(), account).is_some() {
                debug!(account = %name, "duplicate account in import; later entry wins");
            }
        }
        Self {
            accounts: Mutex::new(map),
        }
    }

    // No operation can panic between its checks and its writes, so a
    // poisoned map is still consistent.
    fn accounts(&self) -> MutexGuard<'_, HashMap<AccountName, Account>> {
        self.accounts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open a new account with a zero balance.
    pub fn open(&self, name: AccountName, credential: Credential) -> LedgerResult<()> {
        let mut accounts = self.accounts();
        match accounts.entry(name) {
            Entry::Occupied(_) => Err(LedgerError::AlreadyExists),
            Entry::Vacant(slot) => {
                let account = Account::open(slot.key().clone(), credential);
                slot.insert(account);
                Ok(())
            }
        }
    }

    /// Current balance of an account the credential authorises.
    pub fn balance(&self, name: &AccountName, credential: &Credential) -> LedgerResult<Amount> {
        let accounts = self.accounts();
        accounts
            .get(name)
            .filter(|account| account.authorises(credential))
            .map(Account::balance)
            .ok_or(LedgerError::NotAuthorised)
    }

    /// Move `amount` from `from` to `to` as one indivisible step.
    pub fn transfer(
        &self,
        from: &AccountName,
        credential: &Credential,
        to: &AccountName,
        amount: Amount,
    ) -> LedgerResult<()> {
        if amount.is_negative() {
            return Err(LedgerError::InvalidAmount);
        }

        let mut accounts = self.accounts();

        let source_balance = accounts
            .get(from)
            .filter(|account| account.authorises(credential))
            .map(Account::balance)
            .ok_or(LedgerError::NotAuthorised)?;
        let dest_balance = accounts
            .get(to)
            .map(Account::balance)
            .ok_or(LedgerError::NotAuthorised)?;

        if source_balance < amount {
            return Err(LedgerError::InsufficientFunds);
        }
        if from == to {
            return Ok(());
        }

        let debited = source_balance
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;
        let credited = dest_balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        if let Some(source) = accounts.get_mut(from) {
            source.set_balance(debited);
        }
        if let Some(dest) = accounts.get_mut(to) {
            dest.set_balance(credited);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.accounts().len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts().is_empty()
    }

    /// Sum of all balances in cents, read under the lock.
    pub fn total_cents(&self) -> i128 {
        self.accounts()
            .values()
            .map(|account| i128::from(account.balance().cents()))
            .sum()
    }

    /// Consistent copy of every account, sorted by name.
    pub fn snapshot(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self.accounts().values().cloned().collect();
        accounts.sort_by(|a, b| a.name().cmp(b.name()));
        accounts
    }

    /// Tear the ledger down, handing back its accounts.
    pub fn into_accounts(self) -> Vec<Account> {
        self.accounts
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .into_values()
            .collect()
    }
}
