//! Datagram server loop.
//!
//! ```text
//! Idle ──recv_from──▶ Dispatching ──spawn worker──▶ Idle
//!   │
//!   └──shutdown──▶ ShuttingDown (grace period, release socket + ledger)
//! ```
//!
//! The loop never waits on a worker. Each worker runs
//! decode → dispatch → delay → send → log on its own task and only contends
//! with its siblings inside the ledger's lock.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::UdpSocket;
use tracing::{debug, info, warn};
use uuid::Uuid;

use udpbank_accounting::Ledger;
use udpbank_core::AccountName;
use udpbank_protocol::{MAX_PAYLOAD, Request, dispatch};

use crate::config::ServerConfig;
use crate::in_flight::InFlight;

/// Summary returned once the server has shut down.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Datagrams received (and handed to a worker) over the server's lifetime.
    pub served: u64,
    /// Workers still running when the grace period ran out.
    pub abandoned: usize,
    /// Accounts held by the ledger at teardown.
    pub accounts: usize,
}

/// A bound server that owns the socket and the ledger.
#[derive(Debug)]
pub struct Server {
    socket: Arc<UdpSocket>,
    ledger: Arc<Ledger>,
    config: ServerConfig,
    in_flight: Arc<InFlight>,
}

impl Server {
    /// Bind the listening socket. Failure here is fatal for the process.
    pub async fn bind(config: ServerConfig, ledger: Ledger) -> io::Result<Self> {
        let socket = UdpSocket::bind(config.bind_addr).await?;
        Ok(Self {
            socket: Arc::new(socket),
            ledger: Arc::new(ledger),
            config,
            in_flight: Arc::new(InFlight::default()),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Shared handle to the ledger (for inspection; workers get their own).
    pub fn ledger(&self) -> Arc<Ledger> {
        Arc::clone(&self.ledger)
    }

    /// Serve until `shutdown` resolves, then drain and tear down.
    pub async fn run_until<F>(self, shutdown: F) -> ShutdownReport
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        match self.local_addr() {
            Ok(addr) => info!(%addr, accounts = self.ledger.len(), "server listening"),
            Err(e) => warn!(error = %e, "server listening on unknown address"),
        }

        let mut served: u64 = 0;
        // One spare byte: a datagram that fills it was cut by the OS and is
        // rejected by `Request::decode` instead of being read as a prefix.
        let mut buf = [0u8; MAX_PAYLOAD + 1];

        loop {
            tokio::select! {
                () = &mut shutdown => break,
                received = self.socket.recv_from(&mut buf) => match received {
                    Ok((len, client)) => {
                        served += 1;
                        self.spawn_worker(buf[..len].to_vec(), client);
                    }
                    Err(e) => warn!(error = %e, "recv_from failed"),
                },
            }
        }

        self.shutdown(served).await
    }

    fn spawn_worker(&self, payload: Vec<u8>, client: SocketAddr) {
        let ledger = Arc::clone(&self.ledger);
        let socket = Arc::clone(&self.socket);
        let rate_limit = self.config.rate_limit;
        let guard = self.in_flight.enter();

        // Detached: the handle is dropped, shutdown tracks it via the guard.
        tokio::spawn(async move {
            let _guard = guard;
            process(&ledger, &socket, rate_limit, &payload, client).await;
        });
    }

    async fn shutdown(self, served: u64) -> ShutdownReport {
        let grace = self.config.shutdown_grace;
        info!(
            in_flight = self.in_flight.current(),
            grace_ms = grace.as_millis() as u64,
            "shutting down"
        );

        let abandoned = match tokio::time::timeout(grace, self.in_flight.drained()).await {
            Ok(()) => 0,
            Err(_) => self.in_flight.current(),
        };
        if abandoned > 0 {
            warn!(abandoned, "grace period elapsed with workers still running");
        }

        let Server { socket, ledger, .. } = self;
        // Abandoned workers hold their own clone; the descriptor closes with the last one.
        drop(socket);

        let accounts = match Arc::try_unwrap(ledger) {
            Ok(ledger) => ledger.into_accounts().len(),
            Err(shared) => shared.len(),
        };
        info!(served, accounts, "ledger released");

        ShutdownReport {
            served,
            abandoned,
            accounts,
        }
    }
}

/// One request end to end. The ledger lock is only held inside `dispatch`.
async fn process(
    ledger: &Ledger,
    socket: &UdpSocket,
    rate_limit: Duration,
    payload: &[u8],
    client: SocketAddr,
) {
    let request_id = Uuid::now_v7();
    let request = Request::decode(payload);
    debug!(
        %request_id,
        %client,
        bytes = payload.len(),
        operation = request.operation(),
        "request received"
    );

    let response = dispatch(ledger, &request);

    tokio::time::sleep(rate_limit).await;

    if let Err(e) = socket.send_to(&response.encode(), client).await {
        warn!(%request_id, %client, error = %e, "failed to send response");
    }

    info!(
        %request_id,
        %client,
        operation = request.operation(),
        account = request.account().map(AccountName::as_str).unwrap_or("-"),
        %response,
        "transaction"
    );
}
