use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::elo::EloRatings;
use crate::fixture::{Fixture, Outcome};
use crate::predict::{Prediction, RiskLevel, predict, round1, round2};

/// Ranked results returned per search.
pub const MAX_RESULTS: usize = 10;
/// Triple search only looks at the head of the fixture list; three-leg
/// enumeration over a full book blows up fast.
pub const TRIPLE_FIXTURE_CAP: usize = 5;
/// Three-way draw accumulators are rare in practice, so triples only chase
/// win outcomes.
pub const TRIPLE_OUTCOMES: [Outcome; 2] = [Outcome::Home, Outcome::Away];
/// Triples are intrinsically speculative regardless of the underlying
/// probabilities.
pub const TRIPLE_CONFIDENCE: f64 = 30.0;

/// How far a combined price may stray from the requested target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskTolerance {
    pub fn window(self) -> f64 {
        match self {
            RiskTolerance::Conservative => 0.2,
            RiskTolerance::Moderate => 0.5,
            RiskTolerance::Aggressive => 1.0,
        }
    }
}

/// A user's ask: "find me bets around this price".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OddsRequest {
    pub target_odds: f64,
    pub max_legs: u8,
    pub risk_tolerance: RiskTolerance,
    /// Outcomes to draw from in the two-leg pass. Empty means all three.
    #[serde(default)]
    pub preferred_outcomes: Vec<Outcome>,
}

impl OddsRequest {
    fn preferred(&self) -> &[Outcome] {
        if self.preferred_outcomes.is_empty() {
            &Outcome::ALL
        } else {
            &self.preferred_outcomes
        }
    }

    fn within_window(&self, combined_odds: f64) -> bool {
        (combined_odds - self.target_odds).abs() <= self.risk_tolerance.window()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComboKind {
    Single,
    Double,
    Triple,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComboLeg {
    pub fixture: Fixture,
    pub outcome: Outcome,
    pub price: f64,
}

/// One candidate bet: 1-3 legs with a multiplied price. Built during the
/// search, ranked, and returned as-is; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combination {
    pub kind: ComboKind,
    pub legs: Vec<ComboLeg>,
    pub combined_odds: f64,
    /// 0-100 scale.
    pub confidence: f64,
    pub risk: RiskLevel,
    pub description: String,
    pub reasoning: String,
}

/// Enumerates 1-, 2-, and 3-leg combinations of the supplied fixtures whose
/// combined price lands inside the request's tolerance window, ranked by
/// distance to the target (confidence breaks ties) and truncated to
/// [`MAX_RESULTS`]. Bounded brute force: the triple pass is capped to the
/// first [`TRIPLE_FIXTURE_CAP`] fixtures and to win outcomes only.
pub fn find_combinations(
    elo: &EloRatings,
    request: &OddsRequest,
    fixtures: &[Fixture],
) -> Vec<Combination> {
    // Every pass annotates from the same per-fixture prediction, so compute
    // each one once up front.
    let predictions: Vec<Prediction> = fixtures
        .iter()
        .map(|fx| predict(elo, &fx.home, &fx.away, None))
        .collect();

    let mut out = singles(request, fixtures, &predictions);
    if request.max_legs >= 2 {
        out.extend(doubles(request, fixtures, &predictions));
    }
    if request.max_legs >= 3 {
        out.extend(triples(request, fixtures));
    }

    debug!(
        fixtures = fixtures.len(),
        candidates = out.len(),
        target = request.target_odds,
        "combination search"
    );

    out.sort_by(|a, b| {
        let da = (a.combined_odds - request.target_odds).abs();
        let db = (b.combined_odds - request.target_odds).abs();
        da.total_cmp(&db)
            .then_with(|| b.confidence.total_cmp(&a.confidence))
    });
    out.truncate(MAX_RESULTS);
    out
}

fn singles(
    request: &OddsRequest,
    fixtures: &[Fixture],
    predictions: &[Prediction],
) -> Vec<Combination> {
    let mut out = Vec::new();

    for (fx, pred) in fixtures.iter().zip(predictions) {
        for outcome in Outcome::ALL {
            let Some(price) = fx.odds_for(outcome) else {
                continue;
            };
            if !request.within_window(price) {
                continue;
            }

            let description = match outcome {
                Outcome::Draw => format!("{} vs {} - Draw", fx.home, fx.away),
                _ => format!("{} vs {} - {} Win", fx.home, fx.away, outcome.label()),
            };
            out.push(Combination {
                kind: ComboKind::Single,
                legs: vec![ComboLeg {
                    fixture: fx.clone(),
                    outcome,
                    price,
                }],
                combined_odds: price,
                confidence: pred.confidence,
                risk: pred.risk,
                description,
                reasoning: pred.reasoning.clone(),
            });
        }
    }

    out
}

fn doubles(
    request: &OddsRequest,
    fixtures: &[Fixture],
    predictions: &[Prediction],
) -> Vec<Combination> {
    let mut out = Vec::new();

    for i in 0..fixtures.len() {
        for j in (i + 1)..fixtures.len() {
            for &outcome_a in request.preferred() {
                for &outcome_b in request.preferred() {
                    let (Some(price_a), Some(price_b)) = (
                        fixtures[i].odds_for(outcome_a),
                        fixtures[j].odds_for(outcome_b),
                    ) else {
                        continue;
                    };

                    let combined = price_a * price_b;
                    if !request.within_window(combined) {
                        continue;
                    }

                    let avg_confidence =
                        (predictions[i].confidence + predictions[j].confidence) / 2.0;
                    out.push(Combination {
                        kind: ComboKind::Double,
                        legs: vec![
                            ComboLeg {
                                fixture: fixtures[i].clone(),
                                outcome: outcome_a,
                                price: price_a,
                            },
                            ComboLeg {
                                fixture: fixtures[j].clone(),
                                outcome: outcome_b,
                                price: price_b,
                            },
                        ],
                        combined_odds: round2(combined),
                        confidence: round1(avg_confidence),
                        risk: if avg_confidence < 60.0 {
                            RiskLevel::High
                        } else {
                            RiskLevel::Medium
                        },
                        description: format!(
                            "Double: {} vs {} ({}) + {} vs {} ({})",
                            fixtures[i].home,
                            fixtures[i].away,
                            outcome_a.key(),
                            fixtures[j].home,
                            fixtures[j].away,
                            outcome_b.key(),
                        ),
                        reasoning: format!(
                            "Combined prediction with {avg_confidence:.1}% confidence"
                        ),
                    });
                }
            }
        }
    }

    out
}

fn triples(request: &OddsRequest, fixtures: &[Fixture]) -> Vec<Combination> {
    let mut out = Vec::new();
    let pool = &fixtures[..fixtures.len().min(TRIPLE_FIXTURE_CAP)];

    for i in 0..pool.len() {
        for j in (i + 1)..pool.len() {
            for k in (j + 1)..pool.len() {
                // Same outcome across all three legs keeps the enumeration
                // bounded.
                for outcome in TRIPLE_OUTCOMES {
                    let (Some(price_a), Some(price_b), Some(price_c)) = (
                        pool[i].odds_for(outcome),
                        pool[j].odds_for(outcome),
                        pool[k].odds_for(outcome),
                    ) else {
                        continue;
                    };

                    let combined = price_a * price_b * price_c;
                    if !request.within_window(combined) {
                        continue;
                    }

                    out.push(Combination {
                        kind: ComboKind::Triple,
                        legs: vec![
                            ComboLeg {
                                fixture: pool[i].clone(),
                                outcome,
                                price: price_a,
                            },
                            ComboLeg {
                                fixture: pool[j].clone(),
                                outcome,
                                price: price_b,
                            },
                            ComboLeg {
                                fixture: pool[k].clone(),
                                outcome,
                                price: price_c,
                            },
                        ],
                        combined_odds: round2(combined),
                        confidence: TRIPLE_CONFIDENCE,
                        risk: RiskLevel::High,
                        description: format!(
                            "Triple {}: {} vs {}, {} vs {}, {} vs {}",
                            outcome.key(),
                            pool[i].home,
                            pool[i].away,
                            pool[j].home,
                            pool[j].away,
                            pool[k].home,
                            pool[k].away,
                        ),
                        reasoning: "High-risk triple combination".to_string(),
                    });
                }
            }
        }
    }

    out
}
