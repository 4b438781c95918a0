//! # Check-in Engine Benchmarks
//!
//! | Path | Operation | Target |
//! |------|-----------|--------|
//! | Reducer | submit + resolve one scan | < 10µs |
//! | Ledger | append at cap (FIFO eviction) | O(1) |
//! | Restore | rebuild a full 900-id session | < 1ms |

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use std::time::Duration;

use checkin_engine::{
    reduce, restore_session, ScanLogId, ScanLogRecord, ScannerConfig, ScannerEvent, ScannerState,
    SessionLedger, StatsRecord, ValidateBody, ValidateReply, ValidationOutcome,
    MAX_SESSION_SCAN_LOGS,
};

const NOW: u64 = 1_717_236_000_000;

fn fresh_state(config: &ScannerConfig) -> ScannerState {
    let restored = restore_session(None, None, NOW, 12 * 3_600_000, config.max_session_scan_logs);
    ScannerState::new(restored, config)
}

fn valid_outcome(i: u64) -> ValidationOutcome {
    ValidationOutcome::from_reply(ValidateReply::ok(ValidateBody {
        valid: true,
        scan_log_id: Some(ScanLogId::from(format!("L{}", i))),
        ..Default::default()
    }))
}

fn bench_reducer(c: &mut Criterion) {
    let mut group = c.benchmark_group("reducer");
    group.measurement_time(Duration::from_secs(5));
    let config = ScannerConfig::default();

    group.bench_function("submit_and_resolve", |b| {
        let mut state = fresh_state(&config);
        let mut id = 0u64;
        b.iter(|| {
            id += 1;
            reduce(&mut state, ScannerEvent::Submitted { id }, NOW + id);
            let effects = reduce(
                &mut state,
                ScannerEvent::Resolved {
                    id,
                    outcome: valid_outcome(id),
                },
                NOW + id,
            );
            black_box(effects)
        })
    });

    group.finish();
}

fn bench_ledger(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger");

    for cap in [100usize, MAX_SESSION_SCAN_LOGS, 10_000] {
        group.bench_with_input(BenchmarkId::new("append_at_cap", cap), &cap, |b, &cap| {
            let mut ledger = SessionLedger::new(cap);
            for i in 0..cap {
                ledger.append(ScanLogId::from(format!("seed-{}", i)));
            }
            let mut i = 0u64;
            b.iter(|| {
                i += 1;
                ledger.append(ScanLogId::from(format!("L{}", i)));
                black_box(ledger.len())
            })
        });
    }

    group.finish();
}

fn bench_restore(c: &mut Criterion) {
    let mut group = c.benchmark_group("restore");
    let config = ScannerConfig::default();

    let stats = StatsRecord {
        counters: Default::default(),
        session_start: NOW,
        last_activity: NOW,
    };
    let logs = ScanLogRecord {
        ids: (0..MAX_SESSION_SCAN_LOGS)
            .map(|i| ScanLogId::from(format!("L{}", i)))
            .collect(),
        session_start: NOW,
        last_activity: NOW,
    };

    group.bench_function("full_session", |b| {
        b.iter_batched(
            || logs.clone(),
            |logs| {
                let restored = restore_session(
                    Some(stats),
                    Some(logs),
                    NOW + 1_000,
                    12 * 3_600_000,
                    config.max_session_scan_logs,
                );
                black_box(ScannerState::new(restored, &config))
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_reducer, bench_ledger, bench_restore);
criterion_main!(benches);
