//! `udpbank-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no sockets, no locks).

pub mod error;
pub mod money;
pub mod name;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use money::Amount;
pub use name::AccountName;
pub use value_object::ValueObject;
