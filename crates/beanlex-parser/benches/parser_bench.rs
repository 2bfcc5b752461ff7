//! Parser performance benchmarks.
//!
//! Run with: cargo bench -p beanlex-parser

#![allow(missing_docs)]

use beanlex_core::DefaultBuilder;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use beanlex_parser::parse;

/// Generate a synthetic ledger with N transactions.
fn generate_ledger(num_transactions: usize) -> String {
    let mut lines = vec![
        "2014-01-01 open Assets:Bank:Checking USD".to_string(),
        "2014-01-01 open Expenses:Food USD".to_string(),
        "2014-01-01 open Expenses:Coffee USD".to_string(),
        "2014-01-01 open Expenses:Transport USD".to_string(),
        String::new(),
    ];

    let categories = ["Food", "Coffee", "Transport"];
    let payees = ["Store A", "Store B", "Cafe", "Gas Station"];
    let mut day = 1;
    let mut month = 1;
    let mut year = 2014;

    for i in 0..num_transactions {
        let category = categories[i % categories.len()];
        let payee = payees[i % payees.len()];
        let amount = format!("{:.2}", 10.0 + (i % 100) as f64);

        lines.push(format!(
            "{year:04}-{month:02}-{day:02} * \"{payee}\" \"Transaction {i}\""
        ));
        lines.push(format!("  Expenses:{category}  {amount} USD"));
        lines.push("  Assets:Bank:Checking".to_string());
        lines.push(String::new());

        day += 1;
        if day > 28 {
            day = 1;
            month += 1;
            if month > 12 {
                month = 1;
                year += 1;
            }
        }
    }

    lines.join("\n")
}

fn run_parse(source: &str) {
    let mut builder = DefaultBuilder::new();
    let _ = parse(source, "bench.bean", 0, &mut builder);
}

fn bench_parse_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_scaling");

    for size in [10, 50, 100, 500, 1000] {
        let ledger = generate_ledger(size);
        group.throughput(Throughput::Bytes(ledger.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &ledger, |b, ledger| {
            b.iter(|| run_parse(black_box(ledger)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_scaling);
criterion_main!(benches);
