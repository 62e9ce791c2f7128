//! Benchmarks for CUSIP derivation and end-to-end invocations.
//!
//! Run with: cargo bench --bench ledger

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use paper_ledger::Ledger;
use paper_ledger::domain::value_objects::cusip::generate_suffix;
use paper_ledger::infrastructure::persistence::InMemoryLedgerStore;
use std::hint::black_box;

const ISSUANCE: &str = r#"{"ticker":"ACME","par":1000000,"qty":1000000,"discount":6,
    "maturity":30,"issuer":"company1","issueDate":"1456161763790"}"#;

const TRANSFER: &str =
    r#"{"cusip":"10000ACP","fromCompany":"company1","toCompany":"company2","quantity":1}"#;

fn bench_suffix(c: &mut Criterion) {
    c.bench_function("generate_suffix", |b| {
        b.iter(|| generate_suffix(black_box("1456161763790"), black_box(30)));
    });
}

fn bench_transfer(c: &mut Criterion) {
    let ledger = Ledger::new(InMemoryLedgerStore::new());
    let _ = ledger.invoke("init", &[] as &[&str]);
    let _ = ledger.invoke("createAccounts", &["2"]);
    let _ = ledger.invoke("issueCommercialPaper", &[ISSUANCE]);

    c.bench_function("transfer_paper", |b| {
        b.iter(|| ledger.invoke("transferPaper", &[black_box(TRANSFER)]));
    });
}

fn bench_list_papers(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_papers");

    for accounts in [10u32, 100] {
        let ledger = Ledger::new(InMemoryLedgerStore::new());
        let _ = ledger.invoke("createAccounts", &[accounts.to_string()]);
        for n in 1..=accounts {
            let paper = ISSUANCE.replace("company1", &format!("company{n}"));
            let _ = ledger.invoke("issueCommercialPaper", &[paper]);
        }

        group.bench_with_input(BenchmarkId::from_parameter(accounts), &accounts, |b, _| {
            b.iter(|| ledger.query(&["GetAllCPs"]));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_suffix, bench_transfer, bench_list_papers);
criterion_main!(benches);
