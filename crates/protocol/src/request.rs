use udpbank_auth::Credential;
use udpbank_core::{AccountName, Amount};

use crate::MAX_PAYLOAD;

/// A decoded request datagram.
///
/// Wire form: the operation token followed by its fields, joined with a
/// single `\n` and no escaping:
///
/// ```text
/// open\n<account>\n<credential>
/// balance\n<account>\n<credential>
/// transfer\n<from>\n<credential>\n<to>\n<amount>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Open {
        account: AccountName,
        credential: Credential,
    },
    Balance {
        account: AccountName,
        credential: Credential,
    },
    Transfer {
        from: AccountName,
        credential: Credential,
        to: AccountName,
        amount: Amount,
    },
    /// Anything that does not match one of the shapes above.
    Malformed,
}

impl Request {
    /// Decode untrusted bytes. Never fails: bad input becomes `Malformed`.
    ///
    /// Payloads over [`MAX_PAYLOAD`] are rejected whole rather than decoded
    /// from a prefix, since a cut field can still parse as a different value.
    pub fn decode(payload: &[u8]) -> Request {
        if payload.len() > MAX_PAYLOAD {
            return Request::Malformed;
        }
        match std::str::from_utf8(payload) {
            Ok(text) => Self::parse(text).unwrap_or(Request::Malformed),
            Err(_) => Request::Malformed,
        }
    }

    fn parse(text: &str) -> Option<Request> {
        let fields: Vec<&str> = text.split('\n').collect();

        let request = match fields[..] {
            ["open", account, credential] => Request::Open {
                account: account.parse().ok()?,
                credential: credential.parse().ok()?,
            },
            ["balance", account, credential] => Request::Balance {
                account: account.parse().ok()?,
                credential: credential.parse().ok()?,
            },
            ["transfer", from, credential, to, amount] => Request::Transfer {
                from: from.parse().ok()?,
                credential: credential.parse().ok()?,
                to: to.parse().ok()?,
                amount: Amount::parse_non_negative(amount).ok()?,
            },
            _ => return None,
        };
        Some(request)
    }

    /// Client-side wire form. `Malformed` encodes to an empty payload.
    pub fn encode(&self) -> String {
        match self {
            Request::Open {
                account,
                credential,
            } => format!("open\n{account}\n{}", credential.as_str()),
            Request::Balance {
                account,
                credential,
            } => format!("balance\n{account}\n{}", credential.as_str()),
            Request::Transfer {
                from,
                credential,
                to,
                amount,
            } => format!("transfer\n{from}\n{}\n{to}\n{amount}", credential.as_str()),
            Request::Malformed => String::new(),
        }
    }

    /// Operation token, for logging.
    pub fn operation(&self) -> &'static str {
        match self {
            Request::Open { .. } => "open",
            Request::Balance { .. } => "balance",
            Request::Transfer { .. } => "transfer",
            Request::Malformed => "malformed",
        }
    }

    /// The account the request acts on (the source, for transfers).
    pub fn account(&self) -> Option<&AccountName> {
        match self {
            Request::Open { account, .. } | Request::Balance { account, .. } => Some(account),
            Request::Transfer { from, .. } => Some(from),
            Request::Malformed => None,
        }
    }
}
