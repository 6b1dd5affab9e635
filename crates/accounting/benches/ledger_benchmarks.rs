use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use std::sync::Arc;
use std::thread;

use udpbank_accounting::{Account, Ledger};
use udpbank_auth::Credential;
use udpbank_core::{AccountName, Amount};

fn name(i: usize) -> AccountName {
    AccountName::new(format!("acct{i}")).unwrap()
}

fn seeded(accounts: usize) -> (Ledger, Credential) {
    let cred = Credential::from_password("bench");
    let balance = Amount::from_cents(1_000_000_000);
    let ledger = Ledger::from_accounts(
        (0..accounts).map(|i| Account::with_balance(name(i), cred.clone(), balance)),
    );
    (ledger, cred)
}

/// Single caller, no contention: cost of one lock + lookup + mutate.
fn bench_uncontended_transfer(c: &mut Criterion) {
    let (ledger, cred) = seeded(1_000);
    let (from, to) = (name(1), name(2));
    let amount = Amount::from_cents(1);

    c.bench_function("ledger/transfer_uncontended", |b| {
        b.iter(|| {
            let _ = black_box(ledger.transfer(&from, &cred, &to, amount));
            let _ = black_box(ledger.transfer(&to, &cred, &from, amount));
        })
    });
}

/// Several threads hammering overlapping account pairs through the one lock.
fn bench_contended_transfers(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger/transfer_contended");
    const PER_THREAD: usize = 1_000;

    for threads in [2usize, 4, 8] {
        group.throughput(Throughput::Elements((threads * PER_THREAD) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &threads| {
            let (ledger, cred) = seeded(16);
            let ledger = Arc::new(ledger);

            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|t| {
                        let ledger = Arc::clone(&ledger);
                        let cred = cred.clone();
                        thread::spawn(move || {
                            for i in 0..PER_THREAD {
                                let from = name((t + i) % 16);
                                let to = name((t + i + 1) % 16);
                                let _ = ledger.transfer(&from, &cred, &to, Amount::from_cents(1));
                            }
                        })
                    })
                    .collect();
                for h in handles {
                    h.join().unwrap();
                }
            });
        });
    }

    group.finish();
}

fn bench_balance_lookup(c: &mut Criterion) {
    let (ledger, cred) = seeded(10_000);
    let target = name(5_000);

    c.bench_function("ledger/balance", |b| {
        b.iter(|| black_box(ledger.balance(&target, &cred)))
    });
}

criterion_group!(
    benches,
    bench_uncontended_transfer,
    bench_contended_transfers,
    bench_balance_lookup
);
criterion_main!(benches);
