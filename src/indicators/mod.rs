// =============================================================================
// Indicator Arithmetic
// =============================================================================
//
// Pure, side-effect-free building blocks for the scoring engine.  Every public
// function returns `Option<f64>` so that absence travels through the whole
// computation instead of being defaulted to zero.

pub mod coerce;
pub mod delta;
pub mod spread;

pub use coerce::coerce;
pub use delta::delta;
pub use spread::{derive_spread, SpreadTriple};
