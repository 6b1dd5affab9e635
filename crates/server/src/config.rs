use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Server runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind the UDP socket to (port 0 picks an ephemeral port).
    pub bind_addr: SocketAddr,
    /// Fixed delay applied to every response before it is sent.
    pub rate_limit: Duration,
    /// How long shutdown waits for in-flight workers.
    pub shutdown_grace: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 0)),
            rate_limit: Duration::from_millis(10),
            shutdown_grace: Duration::from_secs(2),
        }
    }
}

impl ServerConfig {
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    pub fn with_rate_limit(mut self, rate_limit: Duration) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }
}
