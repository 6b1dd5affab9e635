//! Wire contract: newline-separated text datagrams of at most
//! [`MAX_PAYLOAD`] bytes, plus the dispatch from a decoded request to the
//! ledger.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::dispatch;
pub use request::Request;
pub use response::Response;

/// Hard upper bound on request and response payloads, in bytes.
pub const MAX_PAYLOAD: usize = 1024;
