//! Opaque account credentials.

use sha1::{Digest, Sha1};

use udpbank_core::{DomainError, DomainResult, ValueObject};

/// Opaque secret digest that authorises an account.
///
/// On the wire this is the lowercase hex SHA-1 of the user's password. The
/// server treats it as an uninterpreted token: authorisation is a single
/// equality check. The digest is password-equivalent, so `Debug` never
/// prints it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credential(String);

impl ValueObject for Credential {}

impl Credential {
    /// Wrap a digest received from the wire or an import file.
    pub fn new(digest: impl Into<String>) -> DomainResult<Self> {
        let digest = digest.into();
        if digest.is_empty() {
            return Err(DomainError::validation("credential must not be empty"));
        }
        if digest.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(DomainError::validation(
                "credential must not contain whitespace or control characters",
            ));
        }
        Ok(Self(digest))
    }

    /// Derive the credential for a plaintext password (client side only).
    pub fn from_password(password: &str) -> Self {
        let digest = Sha1::digest(password.as_bytes());
        Self(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Single shared-secret comparison.
    pub fn matches(&self, other: &Credential) -> bool {
        self.0 == other.0
    }
}

impl core::fmt::Debug for Credential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl core::str::FromStr for Credential {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_digest_is_lowercase_sha1_hex() {
        let cred = Credential::from_password("password");
        assert_eq!(cred.as_str(), "5baa61e4c9b93f3f0682250b6cf8331b7ee68fd8");
        assert_eq!(Credential::from_password("").as_str().len(), 40);
    }

    #[test]
    fn matches_is_plain_equality() {
        let a = Credential::from_password("pw");
        let b = Credential::new(a.as_str()).unwrap();
        assert!(a.matches(&b));
        assert!(!a.matches(&Credential::from_password("wrong")));
    }

    #[test]
    fn debug_output_is_redacted() {
        let cred = Credential::from_password("pw");
        let debug = format!("{cred:?}");
        assert!(!debug.contains(cred.as_str()));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn rejects_empty_or_separated_digests() {
        assert!(Credential::new("").is_err());
        assert!(Credential::new("ab cd").is_err());
        assert!(Credential::new("ab\ncd").is_err());
    }
}
