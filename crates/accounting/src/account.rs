use udpbank_auth::Credential;
use udpbank_core::{AccountName, Amount};

/// One account record.
///
/// `name` and `credential` never change after creation; only the ledger
/// mutates `balance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    name: AccountName,
    credential: Credential,
    balance: Amount,
}

impl Account {
    /// A freshly opened account (zero balance).
    pub fn open(name: AccountName, credential: Credential) -> Self {
        Self::with_balance(name, credential, Amount::ZERO)
    }

    /// An account seeded from an import source.
    pub fn with_balance(name: AccountName, credential: Credential, balance: Amount) -> Self {
        Self {
            name,
            credential,
            balance,
        }
    }

    pub fn name(&self) -> &AccountName {
        &self.name
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn authorises(&self, credential: &Credential) -> bool {
        self.credential.matches(credential)
    }

    pub(crate) fn set_balance(&mut self, balance: Amount) {
        self.balance = balance;
    }
}
