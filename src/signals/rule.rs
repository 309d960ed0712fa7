// =============================================================================
// Rule Evaluator — one comparison rule applied to a (current, prior) pair
// =============================================================================
//
// Two rule shapes exist:
//   - change rules compare the current value against the prior period;
//   - threshold rules compare the current value against a fixed level and
//     never look at the prior period.
//
// A rule whose inputs are absent yields `None`: it contributes nothing and is
// not counted as considered.

use serde::Serialize;

use crate::types::Polarity;

/// Contribution assigned to each outcome of a change rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeWeights {
    pub if_lower: i32,
    pub if_higher: i32,
    pub if_equal: i32,
}

impl From<Polarity> for ChangeWeights {
    fn from(polarity: Polarity) -> Self {
        match polarity {
            Polarity::LowerIsBullish => Self {
                if_lower: 1,
                if_higher: -1,
                if_equal: 0,
            },
            Polarity::HigherIsBullish => Self {
                if_lower: -1,
                if_higher: 1,
                if_equal: 0,
            },
        }
    }
}

/// Evaluate a change rule.  `None` when either side is absent.
pub fn evaluate_change(
    current: Option<f64>,
    prior: Option<f64>,
    weights: ChangeWeights,
) -> Option<i32> {
    let (c, p) = (current?, prior?);
    Some(if c < p {
        weights.if_lower
    } else if c > p {
        weights.if_higher
    } else {
        weights.if_equal
    })
}

/// Evaluate a threshold rule: below the level +1, above -1, at the level 0.
pub fn evaluate_threshold(current: Option<f64>, threshold: f64) -> Option<i32> {
    let c = current?;
    Some(if c < threshold {
        1
    } else if c > threshold {
        -1
    } else {
        0
    })
}

/// Signed sum of contributions and count of rules that had data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub score: i32,
    pub rules_considered: u32,
}

impl ScoreResult {
    /// Fold one rule outcome in.  Absent outcomes leave the tally untouched.
    pub fn record(&mut self, outcome: Option<i32>) {
        if let Some(contribution) = outcome {
            self.score += contribution;
            self.rules_considered += 1;
        }
    }
}
