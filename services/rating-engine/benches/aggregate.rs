use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rating_engine::aggregate;
use types::ids::RecordedAt;
use types::matches::{MatchRecord, Outcome};

fn ledger(len: usize, players: usize) -> Vec<MatchRecord> {
    (0..len)
        .map(|i| MatchRecord {
            participant_a: format!("player-{}", i % players),
            participant_b: format!("player-{}", (i * 7 + 1) % players),
            outcome: match i % 3 {
                0 => Outcome::AWins,
                1 => Outcome::BWins,
                _ => Outcome::Draw,
            },
            recorded_at: RecordedAt::from_timestamp_millis(i as i64).unwrap(),
        })
        .filter(|record| record.participant_a != record.participant_b)
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let long = ledger(10_000, 64);
    c.bench_function("aggregate_10k_matches_64_players", |b| {
        b.iter(|| aggregate(black_box(&long)))
    });

    let wide = ledger(10_000, 5_000);
    c.bench_function("aggregate_10k_matches_5k_players", |b| {
        b.iter(|| aggregate(black_box(&wide)))
    });
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
