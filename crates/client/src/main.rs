use std::fs::File;
use std::io::BufReader;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};

use udpbank_auth::Credential;
use udpbank_client::{RpcClient, crack, read_wordlist};
use udpbank_core::{AccountName, Amount, DomainResult};
use udpbank_protocol::Request;

/// Command-line client for the UDP ledger server.
#[derive(Parser, Debug)]
#[command(name = "udpbank")]
#[command(about = "Open accounts, check balances and transfer funds over UDP")]
struct Cli {
    /// UDP port of the server
    port: u16,

    /// Server address
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    host: IpAddr,

    /// Give up waiting for a reply after this many milliseconds (default: wait forever)
    #[arg(long)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open a new account
    Open { account: AccountName, password: String },

    /// Show an account's balance
    Balance { account: AccountName, password: String },

    /// Transfer funds to another account
    Transfer {
        from: AccountName,
        password: String,
        to: AccountName,
        #[arg(value_parser = parse_amount)]
        amount: Amount,
    },

    /// Guess an account's password from a wordlist
    Crack { account: AccountName, wordlist: PathBuf },
}

fn parse_amount(s: &str) -> DomainResult<Amount> {
    Amount::parse_non_negative(s)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    udpbank_observability::init_for_cli();

    let mut client = RpcClient::new(SocketAddr::new(cli.host, cli.port));
    if let Some(ms) = cli.timeout_ms {
        client = client.with_timeout(Duration::from_millis(ms));
    }

    let request = match cli.command {
        Command::Open { account, password } => Request::Open {
            account,
            credential: Credential::from_password(&password),
        },
        Command::Balance { account, password } => Request::Balance {
            account,
            credential: Credential::from_password(&password),
        },
        Command::Transfer {
            from,
            password,
            to,
            amount,
        } => Request::Transfer {
            from,
            credential: Credential::from_password(&password),
            to,
            amount,
        },
        Command::Crack { account, wordlist } => {
            return run_crack(&client, &account, &wordlist).await;
        }
    };

    let reply = client
        .call(&request)
        .await
        .with_context(|| format!("{} request to {} failed", request.operation(), client.server()))?;
    println!("{reply}");
    Ok(())
}

async fn run_crack(
    client: &RpcClient,
    account: &AccountName,
    wordlist: &Path,
) -> anyhow::Result<()> {
    let file = File::open(wordlist)
        .with_context(|| format!("failed to open wordlist {}", wordlist.display()))?;
    let candidates = read_wordlist(BufReader::new(file))
        .with_context(|| format!("failed to read wordlist {}", wordlist.display()))?;

    let session = client.session().await?;
    println!("Account: {account}");

    match crack(&session, account, candidates).await? {
        Some(found) => {
            println!("Password: {}", found.password);
            println!("Balance: {}", found.response);
        }
        None => println!("Password not found in wordlist: {}", wordlist.display()),
    }
    Ok(())
}
