use udpbank_accounting::LedgerError;
use udpbank_core::Amount;

use crate::MAX_PAYLOAD;

/// The single status/result line sent back for a request.
///
/// There is no structured error code on the wire; clients match on the
/// literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Success,
    Balance(Amount),
    NotAuthorised,
    InsufficientFunds,
    AlreadyExists,
    BadRequest,
}

impl Response {
    pub const SUCCESS: &'static str = "successful";
    pub const NOT_AUTHORISED: &'static str = "not authorised";
    pub const INSUFFICIENT_FUNDS: &'static str = "insufficient funds";
    pub const ALREADY_EXISTS: &'static str = "account already exists";
    pub const BAD_REQUEST: &'static str = "bad_request";

    /// Outbound payload: the response text, cut to at most [`MAX_PAYLOAD`] bytes.
    pub fn encode(&self) -> Vec<u8> {
        truncate_payload(&self.to_string()).as_bytes().to_vec()
    }
}

impl core::fmt::Display for Response {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Response::Success => f.write_str(Self::SUCCESS),
            Response::Balance(amount) => write!(f, "{amount}"),
            Response::NotAuthorised => f.write_str(Self::NOT_AUTHORISED),
            Response::InsufficientFunds => f.write_str(Self::INSUFFICIENT_FUNDS),
            Response::AlreadyExists => f.write_str(Self::ALREADY_EXISTS),
            Response::BadRequest => f.write_str(Self::BAD_REQUEST),
        }
    }
}

impl From<LedgerError> for Response {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotAuthorised => Response::NotAuthorised,
            LedgerError::InsufficientFunds => Response::InsufficientFunds,
            LedgerError::AlreadyExists => Response::AlreadyExists,
            LedgerError::InvalidAmount | LedgerError::Overflow => Response::BadRequest,
        }
    }
}

/// Longest prefix of `text` that fits in one datagram, cut on a char boundary.
pub fn truncate_payload(text: &str) -> &str {
    if text.len() <= MAX_PAYLOAD {
        return text;
    }
    let mut end = MAX_PAYLOAD;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_text_is_literal() {
        assert_eq!(Response::Success.encode(), b"successful");
        assert_eq!(Response::NotAuthorised.encode(), b"not authorised");
        assert_eq!(Response::InsufficientFunds.encode(), b"insufficient funds");
        assert_eq!(Response::AlreadyExists.encode(), b"account already exists");
        assert_eq!(Response::BadRequest.encode(), b"bad_request");
        assert_eq!(Response::Balance(Amount::from_cents(10_000)).encode(), b"100.00");
    }

    #[test]
    fn ledger_rejections_map_to_wire_literals() {
        for err in [
            LedgerError::NotAuthorised,
            LedgerError::InsufficientFunds,
            LedgerError::AlreadyExists,
        ] {
            assert_eq!(Response::from(err).to_string(), err.to_string());
        }
        assert_eq!(Response::from(LedgerError::Overflow), Response::BadRequest);
        assert_eq!(Response::from(LedgerError::InvalidAmount), Response::BadRequest);
    }

    #[test]
    fn oversized_payloads_are_truncated() {
        let long = "x".repeat(MAX_PAYLOAD + 100);
        assert_eq!(truncate_payload(&long).len(), MAX_PAYLOAD);

        // A multi-byte char straddling the limit is dropped whole.
        let straddling = format!("{}é", "x".repeat(MAX_PAYLOAD - 1));
        let cut = truncate_payload(&straddling);
        assert_eq!(cut.len(), MAX_PAYLOAD - 1);
        assert!(cut.chars().all(|c| c == 'x'));

        assert_eq!(truncate_payload("short"), "short");
    }
}
