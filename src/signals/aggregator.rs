// =============================================================================
// Signal Aggregator — runs the rule table over a snapshot pair
// =============================================================================
//
// Every rule is independent: the score is a plain sum and the outcome does not
// depend on evaluation order.  A result with zero rules considered is a
// "no data" verdict, never a numeric score of zero.

use serde::Serialize;
use tracing::debug;

use super::rule::{evaluate_change, evaluate_threshold, ScoreResult};
use super::table::{RuleInput, RuleShape, RuleTable};
use crate::indicators::{derive_spread, SpreadTriple};
use crate::types::SnapshotPair;

/// Directional label derived from the sign of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignalBias {
    Bullish,
    Bearish,
    Neutral,
}

impl std::fmt::Display for SignalBias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "Bullish"),
            Self::Bearish => write!(f, "Bearish"),
            Self::Neutral => write!(f, "Neutral"),
        }
    }
}

/// What callers render: either a score or an explicit absence of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ScoreVerdict {
    NoData,
    #[serde(rename_all = "camelCase")]
    Scored {
        score: i32,
        rules_considered: u32,
        bias: SignalBias,
    },
}

impl From<ScoreResult> for ScoreVerdict {
    fn from(result: ScoreResult) -> Self {
        if result.rules_considered == 0 {
            return Self::NoData;
        }
        let bias = match result.score.signum() {
            1 => SignalBias::Bullish,
            -1 => SignalBias::Bearish,
            _ => SignalBias::Neutral,
        };
        Self::Scored {
            score: result.score,
            rules_considered: result.rules_considered,
            bias,
        }
    }
}

/// The outcome of a single rule, kept for auditing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleContribution {
    pub rule: &'static str,
    pub current: Option<f64>,
    /// Absent for threshold rules, which never read the prior period.
    pub prior: Option<f64>,
    /// `None` when the rule lacked data and was not counted.
    pub contribution: Option<i32>,
}

/// Full aggregation output.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub result: ScoreResult,
    pub contributions: Vec<RuleContribution>,
    /// The derived spread the spread rule scored.
    pub spread: SpreadTriple,
}

impl Aggregation {
    pub fn verdict(&self) -> ScoreVerdict {
        self.result.into()
    }
}

/// Applies a [`RuleTable`] to snapshot pairs.
#[derive(Debug, Clone, Default)]
pub struct SignalAggregator {
    table: RuleTable,
}

impl SignalAggregator {
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    /// Run every rule and sum the contributions.
    pub fn aggregate(&self, pair: &SnapshotPair) -> Aggregation {
        let mut result = ScoreResult::default();
        let mut contributions = Vec::with_capacity(self.table.rules().len());
        let mut spread = SpreadTriple::default();

        for rule in self.table.rules() {
            let (current, prior) = match rule.input {
                RuleInput::Reading(ind) => (pair.current.value(ind), pair.prior.value(ind)),
                RuleInput::Spread { long, short } => {
                    spread = derive_spread(&pair.current, &pair.prior, long, short);
                    (spread.current, spread.prior)
                }
            };

            let (prior, contribution) = match rule.shape {
                RuleShape::Change(weights) => (prior, evaluate_change(current, prior, weights)),
                RuleShape::Threshold(level) => (None, evaluate_threshold(current, level)),
            };

            result.record(contribution);
            contributions.push(RuleContribution {
                rule: rule.name,
                current,
                prior,
                contribution,
            });
        }

        debug!(
            score = result.score,
            rules_considered = result.rules_considered,
            "signal aggregated"
        );

        Aggregation {
            result,
            contributions,
            spread,
        }
    }
}
