use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use matchedge::{
    DEFAULT_VALUE_THRESHOLD, EloRatings, Fixture, OddsRequest, Outcome, RiskTolerance,
    find_combinations, predict, scan_fixture_values,
};

fn sample_book(n: usize) -> Vec<Fixture> {
    (0..n)
        .map(|i| Fixture {
            home: format!("Home Side {i}"),
            away: format!("Away Side {i}"),
            bookmaker: "BenchBook".to_string(),
            home_odds: Some(1.5 + (i % 7) as f64 * 0.25),
            draw_odds: Some(3.0 + (i % 5) as f64 * 0.2),
            away_odds: Some(2.5 + (i % 9) as f64 * 0.4),
            kickoff: None,
        })
        .collect()
}

fn bench_match_probabilities(c: &mut Criterion) {
    let elo = EloRatings::default();
    c.bench_function("match_probabilities", |b| {
        b.iter(|| {
            let p = elo.match_probabilities(black_box("Manchester City"), black_box("Arsenal"));
            black_box(p.home_win);
        })
    });
}

fn bench_predict(c: &mut Criterion) {
    let elo = EloRatings::default();
    c.bench_function("predict", |b| {
        b.iter(|| {
            let p = predict(&elo, black_box("Liverpool"), black_box("Chelsea"), None);
            black_box(p.confidence);
        })
    });
}

fn bench_value_scan(c: &mut Criterion) {
    let elo = EloRatings::default();
    let book = sample_book(50);
    c.bench_function("value_scan_50_fixtures", |b| {
        b.iter(|| {
            let rows = scan_fixture_values(&elo, black_box(&book), DEFAULT_VALUE_THRESHOLD);
            black_box(rows.len());
        })
    });
}

fn bench_find_combinations(c: &mut Criterion) {
    let elo = EloRatings::default();
    let book = sample_book(20);
    let request = OddsRequest {
        target_odds: 4.0,
        max_legs: 3,
        risk_tolerance: RiskTolerance::Moderate,
        preferred_outcomes: vec![Outcome::Home, Outcome::Draw, Outcome::Away],
    };
    c.bench_function("find_combinations_20_fixtures", |b| {
        b.iter(|| {
            let found = find_combinations(&elo, black_box(&request), black_box(&book));
            black_box(found.len());
        })
    });
}

criterion_group!(
    perf,
    bench_match_probabilities,
    bench_predict,
    bench_value_scan,
    bench_find_combinations
);
criterion_main!(perf);
