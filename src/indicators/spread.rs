// =============================================================================
// Spread Deriver — long leg minus short leg, per snapshot, then the delta
// =============================================================================
//
// A spread is never stored; it is recomputed from its two legs each time.  If
// either leg is missing in a snapshot, that snapshot's spread is absent; no
// partial spread is ever built from a single leg.

use serde::Serialize;

use super::coerce::finite;
use super::delta::delta;
use crate::types::{Indicator, Snapshot};

/// Current, prior and change of a derived spread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SpreadTriple {
    pub current: Option<f64>,
    pub prior: Option<f64>,
    pub delta: Option<f64>,
}

/// `long - short` for one snapshot.
pub fn spread_level(long: Option<f64>, short: Option<f64>) -> Option<f64> {
    match (long, short) {
        (Some(l), Some(s)) => finite(l - s),
        _ => None,
    }
}

/// Compute the spread for both snapshots independently and their delta.
pub fn derive_spread(
    current: &Snapshot,
    prior: &Snapshot,
    long: Indicator,
    short: Indicator,
) -> SpreadTriple {
    let cur = spread_level(current.value(long), current.value(short));
    let prev = spread_level(prior.value(long), prior.value(short));
    SpreadTriple {
        current: cur,
        prior: prev,
        delta: delta(cur, prev),
    }
}
