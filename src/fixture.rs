use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the three possible results of a match, from the home side's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Home,
    Draw,
    Away,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [Outcome::Home, Outcome::Draw, Outcome::Away];

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Home => "Home",
            Outcome::Draw => "Draw",
            Outcome::Away => "Away",
        }
    }

    /// Lowercase wire/display token, matching the serde encoding.
    pub fn key(self) -> &'static str {
        match self {
            Outcome::Home => "home",
            Outcome::Draw => "draw",
            Outcome::Away => "away",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A quoted match as supplied by the data-acquisition side. Team names are
/// expected to be canonical already ("Manchester City", not "Man City");
/// alias resolution happens before fixtures reach this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    pub home: String,
    pub away: String,
    pub bookmaker: String,
    pub home_odds: Option<f64>,
    pub draw_odds: Option<f64>,
    pub away_odds: Option<f64>,
    #[serde(default)]
    pub kickoff: Option<DateTime<Utc>>,
}

impl Fixture {
    /// Quoted decimal price for an outcome. Missing and non-positive quotes
    /// both come back as `None`; bad prices are dropped, never propagated.
    pub fn odds_for(&self, outcome: Outcome) -> Option<f64> {
        let raw = match outcome {
            Outcome::Home => self.home_odds,
            Outcome::Draw => self.draw_odds,
            Outcome::Away => self.away_odds,
        };
        raw.filter(|price| *price > 0.0)
    }
}
