//! UDP server: one detached worker per datagram, shared ledger, fixed
//! response delay, graceful shutdown.

pub mod config;
mod in_flight;
pub mod server;

pub use config::ServerConfig;
pub use server::{Server, ShutdownReport};
