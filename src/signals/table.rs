// =============================================================================
// Rule Table — the fixed set of nine scoring rules
// =============================================================================
//
//   Rule                    lower than prior   higher than prior
//   Canada 10Y                     +1                 -1
//   Canada 2Y                      +1                 -1
//   10Y - 2Y spread                -1                 +1   (configurable)
//   Canada 10Y real                +1                 -1
//   5Y breakeven                   +1                 -1
//   CPI-trim YoY                   +1                 -1
//   Unemployment                   -1                 +1
//   IG credit spread (OAS)         -1                 +1
//   Ivey PMI vs 50           below: +1           above: -1   (current only)

use serde::{Deserialize, Serialize};

use super::rule::ChangeWeights;
use crate::types::{Indicator, Polarity};

/// Number of rules in every table.  `rules_considered` can never exceed it.
pub const RULE_COUNT: usize = 9;

fn default_spread_polarity() -> Polarity {
    Polarity::HigherIsBullish
}

fn default_pmi_threshold() -> f64 {
    50.0
}

/// The parts of the rule table that are policy rather than mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulePolicy {
    /// Sign convention for the 10Y - 2Y curve spread.
    #[serde(default = "default_spread_polarity")]
    pub spread_polarity: Polarity,

    /// Level the PMI is compared against.
    #[serde(default = "default_pmi_threshold")]
    pub pmi_threshold: f64,
}

impl Default for RulePolicy {
    fn default() -> Self {
        Self {
            spread_polarity: default_spread_polarity(),
            pmi_threshold: default_pmi_threshold(),
        }
    }
}

/// What a rule reads from the snapshot pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleInput {
    Reading(Indicator),
    /// Long leg minus short leg, derived per snapshot.
    Spread { long: Indicator, short: Indicator },
}

/// How a rule turns its input into a contribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleShape {
    Change(ChangeWeights),
    Threshold(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub name: &'static str,
    pub input: RuleInput,
    pub shape: RuleShape,
}

impl Rule {
    fn change(indicator: Indicator, polarity: Polarity) -> Self {
        Self {
            name: indicator.key(),
            input: RuleInput::Reading(indicator),
            shape: RuleShape::Change(polarity.into()),
        }
    }
}

/// An ordered, fixed-size list of rules.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    rules: [Rule; RULE_COUNT],
}

impl RuleTable {
    /// Build the standard table under `policy`.
    pub fn standard(policy: &RulePolicy) -> Self {
        use Indicator::*;
        use Polarity::*;

        Self {
            rules: [
                Rule::change(Canada10Y, LowerIsBullish),
                Rule::change(Canada2Y, LowerIsBullish),
                Rule {
                    name: "curveSpread10Y2Y",
                    input: RuleInput::Spread {
                        long: Canada10Y,
                        short: Canada2Y,
                    },
                    shape: RuleShape::Change(policy.spread_polarity.into()),
                },
                Rule::change(Canada10YReal, LowerIsBullish),
                Rule::change(FiveYBreakeven, LowerIsBullish),
                Rule::change(CpiTrimYoY, LowerIsBullish),
                Rule::change(CaUnemployment, HigherIsBullish),
                Rule::change(IgCreditSpread, HigherIsBullish),
                Rule {
                    name: IveyPmiSA.key(),
                    input: RuleInput::Reading(IveyPmiSA),
                    shape: RuleShape::Threshold(policy.pmi_threshold),
                },
            ],
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard(&RulePolicy::default())
    }
}
