//! `udpbank-auth`: credential boundary.
//!
//! The server only ever compares opaque digests; hashing a plaintext password
//! happens on the client before anything is sent.

pub mod credential;

pub use credential::Credential;
