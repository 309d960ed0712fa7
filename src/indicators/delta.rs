// =============================================================================
// Delta Calculator
// =============================================================================

use super::coerce::finite;

/// `current - prior` when both are present, otherwise absent.
///
/// No rounding happens here; that is left to the presentation layer.  A
/// difference that overflows to infinity is treated as absent.
pub fn delta(current: Option<f64>, prior: Option<f64>) -> Option<f64> {
    match (current, prior) {
        (Some(c), Some(p)) => finite(c - p),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn both_present() {
        let d = delta(Some(3.2), Some(3.4)).unwrap();
        assert!((d + 0.2).abs() < 1e-12);
    }

    #[test]
    fn either_absent() {
        assert_eq!(delta(None, Some(1.0)), None);
        assert_eq!(delta(Some(1.0), None), None);
        assert_eq!(delta(None, None), None);
    }

    proptest! {
        #[test]
        fn antisymmetric(
            a in proptest::option::of(-1e6f64..1e6),
            b in proptest::option::of(-1e6f64..1e6),
        ) {
            prop_assert_eq!(delta(a, b), delta(b, a).map(|d| -d));
        }

        #[test]
        fn absent_unless_both_present(
            a in proptest::option::of(-1e6f64..1e6),
            b in proptest::option::of(-1e6f64..1e6),
        ) {
            prop_assert_eq!(delta(a, b).is_some(), a.is_some() && b.is_some());
        }
    }

    #[test]
    fn overflow_is_absent() {
        assert_eq!(delta(Some(f64::MAX), Some(-f64::MAX)), None);
    }
}
