use serde::{Deserialize, Serialize};

use crate::elo::{EloRatings, MatchProbs};
use crate::fixture::Outcome;

/// Qualitative signals layered on top of the rating model, each on the
/// caller's 1-10 scale. All optional; anything the caller leaves out simply
/// does not nudge the distribution. Unknown keys in inbound JSON are ignored
/// so that new signals can ship before this crate learns about them.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Adjustments {
    #[serde(default)]
    pub home_form: Option<f64>,
    #[serde(default)]
    pub away_form: Option<f64>,
    #[serde(default)]
    pub injuries: Option<f64>,
}

/// Risk bucket attached to predictions and combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Probability triple on a display scale (percent, one decimal).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProbsPct {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

/// Single-match recommendation. Plain data, built fresh per request;
/// identical inputs always produce an identical record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub home_team: String,
    pub away_team: String,
    pub outcome: Outcome,
    /// 0-100, one decimal.
    pub confidence: f64,
    pub probabilities: ProbsPct,
    pub reasoning: String,
    pub risk: RiskLevel,
    /// Edge over random chance, in percent. Distinct from the
    /// bookmaker-relative value in [`crate::value::calculate_value`]; the two
    /// measure different things and are deliberately kept apart.
    pub expected_value: f64,
}

/// Predicts the outcome of a single fixture, optionally nudged by
/// qualitative signals.
pub fn predict(
    elo: &EloRatings,
    home_team: &str,
    away_team: &str,
    adjustments: Option<&Adjustments>,
) -> Prediction {
    let base = elo.match_probabilities(home_team, away_team);
    let probs = match adjustments {
        Some(adj) => apply_adjustments(base, adj),
        None => base,
    };

    let (outcome, max_prob) = pick_outcome(&probs);
    let confidence = confidence_score(&probs);
    let risk = risk_level(confidence, max_prob);
    let reasoning = build_reasoning(elo, home_team, away_team, &probs);

    Prediction {
        home_team: home_team.to_string(),
        away_team: away_team.to_string(),
        outcome,
        confidence: round1(confidence * 100.0),
        probabilities: ProbsPct {
            home: round1(probs.home_win * 100.0),
            draw: round1(probs.draw * 100.0),
            away: round1(probs.away_win * 100.0),
        },
        reasoning,
        risk,
        // Edge over a blind 1-in-3 pick, for display only.
        expected_value: round2((max_prob - 1.0 / 3.0) * 100.0),
    }
}

/// Multiplicative nudges per signal, then renormalize. Every adjustment path
/// ends with a valid distribution; that discipline is what keeps downstream
/// consumers honest.
fn apply_adjustments(base: MatchProbs, adj: &Adjustments) -> MatchProbs {
    let mut p = base;

    if let Some(form) = adj.home_form {
        p.home_win *= 1.0 + (form / 10.0) * 0.1;
    }
    if let Some(form) = adj.away_form {
        p.away_win *= 1.0 + (form / 10.0) * 0.1;
    }
    if let Some(sev) = adj.injuries {
        // Injuries drain both win masses toward the draw.
        let impact = sev / 10.0;
        p.home_win *= 1.0 - impact * 0.05;
        p.away_win *= 1.0 - impact * 0.05;
        p.draw *= 1.0 + impact * 0.1;
    }

    p.normalized()
}

/// Arg-max over the triple. Ties go home, then draw, then away.
fn pick_outcome(probs: &MatchProbs) -> (Outcome, f64) {
    let mut best = (Outcome::Home, probs.home_win);
    if probs.draw > best.1 {
        best = (Outcome::Draw, probs.draw);
    }
    if probs.away_win > best.1 {
        best = (Outcome::Away, probs.away_win);
    }
    best
}

/// A clear favorite scores higher than a narrow plurality: top probability
/// plus half the spread over the weakest outcome, capped at 1.
fn confidence_score(probs: &MatchProbs) -> f64 {
    let max = probs.max();
    let spread = max - probs.min();
    (max + spread * 0.5).min(1.0)
}

fn risk_level(confidence: f64, max_prob: f64) -> RiskLevel {
    if confidence > 0.8 && max_prob > 0.6 {
        RiskLevel::Low
    } else if confidence > 0.6 && max_prob > 0.45 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

fn outcome_phrase(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Home => "home win",
        Outcome::Draw => "draw",
        Outcome::Away => "away win",
    }
}

/// Templated narrative: rating gap, home advantage, then how decisive the
/// leading probability is. Regenerated deterministically from the inputs.
fn build_reasoning(
    elo: &EloRatings,
    home_team: &str,
    away_team: &str,
    probs: &MatchProbs,
) -> String {
    let home_rating = elo.rating(home_team);
    let away_rating = elo.rating(away_team);
    let gap = home_rating - away_rating;

    let mut parts: Vec<String> = Vec::new();

    if gap > 100.0 {
        parts.push(format!(
            "{home_team} has a significant rating advantage ({home_rating:.0} vs {away_rating:.0})"
        ));
    } else if gap > 50.0 {
        parts.push(format!("{home_team} has a moderate rating advantage"));
    } else if gap < -100.0 {
        parts.push(format!(
            "{away_team} has a significant rating advantage ({away_rating:.0} vs {home_rating:.0})"
        ));
    } else if gap < -50.0 {
        parts.push(format!("{away_team} has a moderate rating advantage"));
    } else {
        parts.push("Teams are closely matched in terms of rating".to_string());
    }

    parts.push("Home advantage provides additional edge".to_string());

    let (outcome, max_prob) = pick_outcome(probs);
    let pct = max_prob * 100.0;
    if pct > 60.0 {
        parts.push(format!(
            "Strong likelihood of {} ({pct:.1}%)",
            outcome_phrase(outcome)
        ));
    } else if pct > 45.0 {
        parts.push(format!(
            "Moderate likelihood of {} ({pct:.1}%)",
            outcome_phrase(outcome)
        ));
    } else {
        parts.push("Match outcome is highly uncertain".to_string());
    }

    parts.join(". ") + "."
}

pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
