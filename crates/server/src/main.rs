use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use udpbank_accounting::{Ledger, load_accounts};
use udpbank_server::{Server, ServerConfig};

/// UDP ledger server.
#[derive(Parser, Debug)]
#[command(name = "udpbank-server")]
#[command(about = "Serve open/balance/transfer requests over UDP")]
struct Args {
    /// Accounts file: one `account credential balance` per line
    accounts_file: PathBuf,

    /// UDP port to listen on
    port: u16,

    /// Address to bind
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    bind: IpAddr,

    /// Delay applied to every response, in milliseconds
    #[arg(long, default_value_t = 10)]
    rate_limit_ms: u64,

    /// How long shutdown waits for in-flight requests, in milliseconds
    #[arg(long, default_value_t = 2000)]
    grace_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    udpbank_observability::init();

    let accounts = load_accounts(&args.accounts_file).with_context(|| {
        format!("failed to import accounts from {}", args.accounts_file.display())
    })?;
    let ledger = Ledger::from_accounts(accounts);
    info!(accounts = ledger.len(), file = %args.accounts_file.display(), "ledger initialised");

    let config = ServerConfig::default()
        .with_bind_addr(SocketAddr::new(args.bind, args.port))
        .with_rate_limit(Duration::from_millis(args.rate_limit_ms))
        .with_shutdown_grace(Duration::from_millis(args.grace_ms));

    let server = Server::bind(config.clone(), ledger)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    let report = server.run_until(interrupted()).await;
    info!(
        served = report.served,
        abandoned = report.abandoned,
        "server stopped"
    );
    Ok(())
}

/// Resolves on Ctrl+C. If the handler cannot be installed the server runs
/// until killed.
async fn interrupted() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("interrupt received"),
        Err(e) => {
            warn!(error = %e, "unable to listen for interrupt; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
