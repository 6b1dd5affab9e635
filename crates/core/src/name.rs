//! Account names.

use core::borrow::Borrow;
use core::str::FromStr;

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Unique, immutable account identifier.
///
/// Must be non-empty and free of whitespace and control characters: the
/// import format is whitespace separated and the wire format is newline
/// separated, so either would make the name unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountName(String);

impl ValueObject for AccountName {}

impl AccountName {
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::invalid_name("account name must not be empty"));
        }
        if let Some(c) = name.chars().find(|c| c.is_whitespace() || c.is_control()) {
            return Err(DomainError::invalid_name(format!(
                "{name:?} contains forbidden character {c:?}"
            )));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for AccountName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccountName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for AccountName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets `HashMap<AccountName, _>` be queried with a plain `&str`.
impl Borrow<str> for AccountName {
    fn borrow(&self) -> &str {
        &self.0
    }
}
