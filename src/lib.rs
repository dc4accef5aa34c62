//! Football match-edge engine: Elo-based outcome probabilities, value-bet
//! pricing against bookmaker quotes, and a bounded search over accumulator
//! combinations near a target price.
//!
//! The crate is pure computation. It never touches the network or disk;
//! fixtures and odds come in from the caller, plain serializable records go
//! back out. The only long-lived state is the [`elo::EloRatings`] store,
//! owned and (if shared) locked by the composing application.

pub mod combos;
pub mod elo;
pub mod fixture;
pub mod predict;
pub mod value;

pub use combos::{Combination, ComboKind, ComboLeg, OddsRequest, RiskTolerance, find_combinations};
pub use elo::{DEFAULT_RATING, EloConfig, EloRatings, MatchProbs, MatchResult, expected_score};
pub use fixture::{Fixture, Outcome};
pub use predict::{Adjustments, Prediction, ProbsPct, RiskLevel, predict};
pub use value::{
    DEFAULT_VALUE_THRESHOLD, FixtureValues, calculate_value, implied_probability,
    scan_fixture_values, value_threshold_from_env,
};
