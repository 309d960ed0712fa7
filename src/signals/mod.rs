// =============================================================================
// Signals Module
// =============================================================================
//
// Turns a (current, prior) snapshot pair into a composite directional score:
// - Rule evaluation (change rules and threshold rules)
// - The fixed nine-rule table and its configurable policy
// - Aggregation into a score plus the count of rules that had data

pub mod aggregator;
pub mod rule;
pub mod table;

pub use aggregator::{RuleContribution, ScoreVerdict, SignalAggregator};
pub use table::{RulePolicy, RuleTable};
