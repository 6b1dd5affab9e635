use udpbank_accounting::Ledger;

use crate::request::Request;
use crate::response::Response;

/// Route a decoded request to exactly one ledger call.
///
/// `Malformed` never touches the ledger.
pub fn dispatch(ledger: &Ledger, request: &Request) -> Response {
    let result = match request {
        Request::Open {
            account,
            credential,
        } => ledger
            .open(account.clone(), credential.clone())
            .map(|()| Response::Success),
        Request::Balance {
            account,
            credential,
        } => ledger.balance(account, credential).map(Response::Balance),
        Request::Transfer {
            from,
            credential,
            to,
            amount,
        } => ledger
            .transfer(from, credential, to, *amount)
            .map(|()| Response::Success),
        Request::Malformed => return Response::BadRequest,
    };

    result.unwrap_or_else(Response::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use udpbank_accounting::Account;
    use udpbank_auth::Credential;
    use udpbank_core::Amount;

    fn alice_ledger() -> Ledger {
        Ledger::from_accounts([Account::with_balance(
            "alice".parse().unwrap(),
            Credential::from_password("pw"),
            Amount::from_cents(10_000),
        )])
    }

    fn send(ledger: &Ledger, payload: String) -> String {
        dispatch(ledger, &Request::decode(payload.as_bytes())).to_string()
    }

    #[test]
    fn reference_scenario() {
        let ledger = alice_ledger();
        let pw = Credential::from_password("pw");
        let pw = pw.as_str();
        let wrong = Credential::from_password("wrong");
        let x = Credential::from_password("x");

        assert_eq!(send(&ledger, format!("balance\nalice\n{pw}")), "100.00");
        assert_eq!(
            send(&ledger, format!("balance\nalice\n{}", wrong.as_str())),
            "not authorised"
        );
        assert_eq!(
            send(&ledger, format!("transfer\nalice\n{pw}\nbob\n150.00")),
            "not authorised"
        );
        assert_eq!(send(&ledger, format!("open\nbob\n{}", x.as_str())), "successful");
        assert_eq!(
            send(&ledger, format!("transfer\nalice\n{pw}\nbob\n150.00")),
            "insufficient funds"
        );
        assert_eq!(
            send(&ledger, format!("transfer\nalice\n{pw}\nbob\n40")),
            "successful"
        );
        assert_eq!(send(&ledger, format!("balance\nbob\n{}", x.as_str())), "40.00");
        assert_eq!(send(&ledger, format!("open\nbob\n{pw}")), "account already exists");
    }

    #[test]
    fn malformed_requests_never_touch_the_ledger() {
        let ledger = alice_ledger();
        let before = ledger.snapshot();

        for payload in ["", "open\nbob", "bogus\nbob\nabc", "transfer\nalice\nabc\nbob\nlots"] {
            assert_eq!(send(&ledger, payload.to_string()), "bad_request");
        }

        assert_eq!(ledger.snapshot(), before);
    }
}
