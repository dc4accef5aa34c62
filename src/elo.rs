use std::collections::HashMap;
use std::env;
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RATING: f64 = 1500.0;

/// Initial EPL table, rough ordering by recent strength. Teams outside the
/// table fall back to [`DEFAULT_RATING`].
const EPL_SEED: [(&str, f64); 20] = [
    ("Manchester City", 2100.0),
    ("Arsenal", 2050.0),
    ("Liverpool", 2040.0),
    ("Newcastle United", 1950.0),
    ("Manchester United", 1920.0),
    ("Tottenham Hotspur", 1900.0),
    ("Brighton & Hove Albion", 1850.0),
    ("Aston Villa", 1840.0),
    ("West Ham United", 1800.0),
    ("Chelsea", 1790.0),
    ("Crystal Palace", 1750.0),
    ("Brentford", 1740.0),
    ("Fulham", 1730.0),
    ("Wolverhampton Wanderers", 1720.0),
    ("Everton", 1700.0),
    ("Nottingham Forest", 1690.0),
    ("Bournemouth", 1680.0),
    ("Sheffield United", 1650.0),
    ("Burnley", 1640.0),
    ("Luton Town", 1600.0),
];

#[derive(Debug, Clone, Copy)]
pub struct EloConfig {
    pub k: f64,
    pub home_adv_pts: f64,
}

impl Default for EloConfig {
    fn default() -> Self {
        Self {
            k: 32.0,
            home_adv_pts: 100.0,
        }
    }
}

impl EloConfig {
    /// Reads `ELO_K_FACTOR` and `ELO_HOME_ADVANTAGE`, falling back to the
    /// defaults for anything missing or unparseable.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            k: env_f64("ELO_K_FACTOR").unwrap_or(d.k),
            home_adv_pts: env_f64("ELO_HOME_ADVANTAGE").unwrap_or(d.home_adv_pts),
        }
    }
}

fn env_f64(key: &str) -> Option<f64> {
    env::var(key).ok().and_then(|v| v.trim().parse::<f64>().ok())
}

/// Observed final result of a match, from the home side's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    HomeWin,
    Draw,
    AwayWin,
}

impl FromStr for MatchResult {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home_win" => Ok(MatchResult::HomeWin),
            "draw" => Ok(MatchResult::Draw),
            "away_win" => Ok(MatchResult::AwayWin),
            // Defaulting here would corrupt ratings undetectably, so this is
            // the one place the crate refuses bad input.
            other => bail!("invalid match result {other:?}, expected home_win | draw | away_win"),
        }
    }
}

/// Three-way outcome distribution. Always sums to 1 when produced by
/// [`EloRatings::match_probabilities`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchProbs {
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
}

impl MatchProbs {
    pub fn max(&self) -> f64 {
        self.home_win.max(self.draw).max(self.away_win)
    }

    pub fn min(&self) -> f64 {
        self.home_win.min(self.draw).min(self.away_win)
    }

    pub(crate) fn normalized(self) -> Self {
        let total = self.home_win + self.draw + self.away_win;
        Self {
            home_win: self.home_win / total,
            draw: self.draw / total,
            away_win: self.away_win / total,
        }
    }
}

/// Team strength store. Plain in-memory data: a composing service that
/// shares one store across request handlers wraps it in a `Mutex`/`RwLock`;
/// independent rating universes (per league, per test) are just independent
/// values.
#[derive(Debug, Clone)]
pub struct EloRatings {
    cfg: EloConfig,
    ratings: HashMap<String, f64>,
}

impl EloRatings {
    /// Empty store: every lookup resolves to [`DEFAULT_RATING`].
    pub fn new(cfg: EloConfig) -> Self {
        Self {
            cfg,
            ratings: HashMap::new(),
        }
    }

    pub fn with_seed<I, S>(cfg: EloConfig, seed: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            cfg,
            ratings: seed.into_iter().map(|(name, r)| (name.into(), r)).collect(),
        }
    }

    /// The fixed EPL seed table from the original deployment.
    pub fn premier_league_seed() -> impl Iterator<Item = (&'static str, f64)> {
        EPL_SEED.iter().copied()
    }

    pub fn config(&self) -> EloConfig {
        self.cfg
    }

    /// Current rating, or the default for a team we have never seen. Unknown
    /// names never error; permissiveness here is deliberate.
    pub fn rating(&self, team: &str) -> f64 {
        self.ratings.get(team).copied().unwrap_or(DEFAULT_RATING)
    }

    /// All stored ratings, strongest first.
    pub fn sorted_ratings(&self) -> Vec<(String, f64)> {
        let mut out: Vec<(String, f64)> = self
            .ratings
            .iter()
            .map(|(name, r)| (name.clone(), *r))
            .collect();
        out.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        out
    }

    /// Win/draw/loss distribution for a fixture. The home side gets the
    /// configured rating boost before pairing; the draw share grows as the
    /// sides approach parity (evenly matched games draw more often).
    pub fn match_probabilities(&self, home_team: &str, away_team: &str) -> MatchProbs {
        let home_rating = self.rating(home_team) + self.cfg.home_adv_pts;
        let away_rating = self.rating(away_team);

        let home_expected = expected_score(home_rating, away_rating);
        let away_expected = 1.0 - home_expected;

        let draw_factor = 0.25;
        let draw_raw = draw_factor + (0.5 - (home_expected - 0.5).abs()) * 0.2;

        MatchProbs {
            home_win: home_expected * (1.0 - draw_factor),
            draw: draw_raw,
            away_win: away_expected * (1.0 - draw_factor),
        }
        .normalized()
    }

    /// Standard Elo update after an observed result. Expected scores are
    /// taken from raw ratings (no home boost: the boost models the occasion,
    /// not the team's strength). Call once per result; replays double-count.
    pub fn apply_result(&mut self, home_team: &str, away_team: &str, result: MatchResult) {
        let home_rating = self.rating(home_team);
        let away_rating = self.rating(away_team);

        let home_expected = expected_score(home_rating, away_rating);
        let away_expected = 1.0 - home_expected;

        let (home_actual, away_actual) = match result {
            MatchResult::HomeWin => (1.0, 0.0),
            MatchResult::Draw => (0.5, 0.5),
            MatchResult::AwayWin => (0.0, 1.0),
        };

        self.ratings.insert(
            home_team.to_string(),
            home_rating + self.cfg.k * (home_actual - home_expected),
        );
        self.ratings.insert(
            away_team.to_string(),
            away_rating + self.cfg.k * (away_actual - away_expected),
        );
    }
}

impl Default for EloRatings {
    fn default() -> Self {
        Self::with_seed(EloConfig::default(), Self::premier_league_seed())
    }
}

/// Logistic expected score for side A against side B. Strictly inside (0,1)
/// for any finite ratings.
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf((rating_b - rating_a) / 400.0))
}
