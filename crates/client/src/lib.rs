//! Client side of the wire contract: one request datagram out, exactly one
//! response datagram back.

pub mod crack;
pub mod rpc;

pub use crack::{Cracked, crack, read_wordlist};
pub use rpc::{RpcClient, RpcError, Session};
