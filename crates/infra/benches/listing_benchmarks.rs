use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use loadledger_core::{AccountId, Money, RecordId};
use loadledger_freight::{Cargo, CargoId};
use loadledger_infra::InMemoryLedger;

/// Seed a board where roughly half the loads are still posted.
fn seed_board(store: &InMemoryLedger, size: usize) {
    let broker = AccountId::new();
    let dispatcher = AccountId::new();
    let base = Utc::now();

    store
        .transaction(|t| {
            for i in 0..size {
                let id = CargoId::new(RecordId::new());
                let mut cargo = Cargo::post(
                    id,
                    format!("Load {i}"),
                    Money::usd(Decimal::new(50_000 + i as i64, 2)),
                    broker,
                    base + Duration::seconds(i as i64),
                )
                .expect("valid cargo");
                if i % 2 == 0 {
                    cargo
                        .negotiate(dispatcher, base + Duration::seconds(i as i64 + 1))
                        .expect("posted cargo negotiates");
                }
                t.insert_cargo(cargo)?;
            }
            Ok(())
        })
        .expect("seeding succeeds");
}

fn bench_available_listing(c: &mut Criterion) {
    let mut group = c.benchmark_group("available_cargo_listing");

    for size in [100usize, 1_000, 10_000] {
        let store = InMemoryLedger::new();
        seed_board(&store, size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let available = store
                    .read(|t| t.available_cargo())
                    .expect("read succeeds");
                black_box(available.len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_available_listing);
criterion_main!(benches);
