use std::env;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::elo::EloRatings;
use crate::fixture::{Fixture, Outcome};

/// Minimum edge over the bookmaker's implied probability before a quote
/// counts as a value bet.
pub const DEFAULT_VALUE_THRESHOLD: f64 = 0.05;

/// Reads `VALUE_BET_THRESHOLD`, falling back to the default when missing or
/// unparseable.
pub fn value_threshold_from_env() -> f64 {
    env::var("VALUE_BET_THRESHOLD")
        .ok()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(DEFAULT_VALUE_THRESHOLD)
}

/// Probability a decimal price encodes at zero bookmaker margin.
pub fn implied_probability(odds: f64) -> f64 {
    1.0 / odds
}

/// Expected value per unit stake, as a percentage, gated by the edge
/// threshold. Sub-threshold edges come back as exactly 0.0 rather than a
/// small number; a price at or below 1.0 is degenerate and also yields 0.0.
/// Total: never errors, never returns below-threshold noise.
pub fn calculate_value(model_probability: f64, bookmaker_odds: f64, threshold: f64) -> f64 {
    if bookmaker_odds <= 1.0 {
        return 0.0;
    }

    let edge = model_probability - implied_probability(bookmaker_odds);
    if edge > threshold {
        ((model_probability * (bookmaker_odds - 1.0)) - (1.0 - model_probability)) * 100.0
    } else {
        0.0
    }
}

/// Gated value of each outcome of a fully quoted fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureValues {
    pub home: String,
    pub away: String,
    pub bookmaker: String,
    pub value_home: f64,
    pub value_draw: f64,
    pub value_away: f64,
}

/// Prices every fully quoted fixture against the model and keeps those with
/// at least one qualifying edge. Fixtures missing any of the three quotes
/// are skipped, not reported as errors.
pub fn scan_fixture_values(
    elo: &EloRatings,
    fixtures: &[Fixture],
    threshold: f64,
) -> Vec<FixtureValues> {
    let mut out = Vec::new();

    for fx in fixtures {
        let (Some(home_odds), Some(draw_odds), Some(away_odds)) = (
            fx.odds_for(Outcome::Home),
            fx.odds_for(Outcome::Draw),
            fx.odds_for(Outcome::Away),
        ) else {
            continue;
        };

        let probs = elo.match_probabilities(&fx.home, &fx.away);
        let value_home = calculate_value(probs.home_win, home_odds, threshold);
        let value_draw = calculate_value(probs.draw, draw_odds, threshold);
        let value_away = calculate_value(probs.away_win, away_odds, threshold);

        if value_home > 0.0 || value_draw > 0.0 || value_away > 0.0 {
            out.push(FixtureValues {
                home: fx.home.clone(),
                away: fx.away.clone(),
                bookmaker: fx.bookmaker.clone(),
                value_home,
                value_draw,
                value_away,
            });
        }
    }

    debug!(
        scanned = fixtures.len(),
        kept = out.len(),
        "fixture value scan"
    );
    out
}
