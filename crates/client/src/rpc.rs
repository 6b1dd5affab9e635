use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use tokio::net::UdpSocket;
use tracing::debug;

use udpbank_protocol::{MAX_PAYLOAD, Request};

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("socket error: {0}")]
    Io(#[from] io::Error),

    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("request is {0} bytes; the limit is {MAX_PAYLOAD}")]
    RequestTooLarge(usize),

    #[error("response is not valid UTF-8")]
    InvalidUtf8,
}

/// Sends requests to one server.
///
/// Without a timeout a lost response blocks the caller forever, same as the
/// reference client.
#[derive(Debug, Clone)]
pub struct RpcClient {
    server: SocketAddr,
    timeout: Option<Duration>,
}

impl RpcClient {
    pub fn new(server: SocketAddr) -> Self {
        Self {
            server,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn server(&self) -> SocketAddr {
        self.server
    }

    /// One request on a fresh ephemeral socket.
    pub async fn call(&self, request: &Request) -> Result<String, RpcError> {
        self.session().await?.call(request).await
    }

    /// Raw payload on a fresh ephemeral socket.
    pub async fn call_raw(&self, payload: &[u8]) -> Result<String, RpcError> {
        self.session().await?.call_raw(payload).await
    }

    /// A socket that can be reused for many sequential calls.
    pub async fn session(&self) -> Result<Session, RpcError> {
        let local: SocketAddr = if self.server.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(local).await?;
        // Connected: datagrams from any other peer are filtered out by the OS.
        socket.connect(self.server).await?;
        Ok(Session {
            socket,
            timeout: self.timeout,
        })
    }
}

/// A connected socket for sequential request/response exchanges.
#[derive(Debug)]
pub struct Session {
    socket: UdpSocket,
    timeout: Option<Duration>,
}

impl Session {
    pub async fn call(&self, request: &Request) -> Result<String, RpcError> {
        self.call_raw(request.encode().as_bytes()).await
    }

    pub async fn call_raw(&self, payload: &[u8]) -> Result<String, RpcError> {
        if payload.len() > MAX_PAYLOAD {
            return Err(RpcError::RequestTooLarge(payload.len()));
        }

        self.socket.send(payload).await?;
        debug!(bytes = payload.len(), "request sent");

        let mut buf = [0u8; MAX_PAYLOAD];
        let len = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.socket.recv(&mut buf))
                .await
                .map_err(|_| RpcError::Timeout(limit))??,
            None => self.socket.recv(&mut buf).await?,
        };

        String::from_utf8(buf[..len].to_vec()).map_err(|_| RpcError::InvalidUtf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A peer that answers every datagram with a fixed reply.
    async fn echo_peer(reply: &'static [u8]) -> SocketAddr {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        tokio::spawn(async move {
            let mut buf = [0u8; MAX_PAYLOAD];
            while let Ok((_, from)) = socket.recv_from(&mut buf).await {
                let _ = socket.send_to(reply, from).await;
            }
        });
        addr
    }

    #[tokio::test]
    async fn call_returns_reply_text() {
        let addr = echo_peer(b"successful").await;
        let client = RpcClient::new(addr).with_timeout(Duration::from_secs(2));
        let reply = client.call_raw(b"open\nalice\nabc").await.unwrap();
        assert_eq!(reply, "successful");
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        // Bound but never answers.
        let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let client = RpcClient::new(silent.local_addr().unwrap())
            .with_timeout(Duration::from_millis(50));

        let err = client.call_raw(b"balance\nalice\nabc").await.unwrap_err();
        assert!(matches!(err, RpcError::Timeout(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn oversized_request_is_refused_locally() {
        let addr = echo_peer(b"unused").await;
        let client = RpcClient::new(addr);
        let payload = vec![b'x'; MAX_PAYLOAD + 1];
        let err = client.call_raw(&payload).await.unwrap_err();
        assert!(matches!(err, RpcError::RequestTooLarge(n) if n == MAX_PAYLOAD + 1));
    }

    #[tokio::test]
    async fn non_utf8_reply_is_reported() {
        let addr = echo_peer(b"\xff\xfe").await;
        let client = RpcClient::new(addr).with_timeout(Duration::from_secs(2));
        let err = client.call_raw(b"balance\nalice\nabc").await.unwrap_err();
        assert!(matches!(err, RpcError::InvalidUtf8));
    }
}
