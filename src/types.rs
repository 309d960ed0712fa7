// =============================================================================
// Shared types used across the bond signal engine
// =============================================================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The fixed set of indicators the source snapshot carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Indicator {
    #[serde(rename = "fiveYBreakeven")]
    FiveYBreakeven,
    #[serde(rename = "canada2Y")]
    Canada2Y,
    #[serde(rename = "canada10Y")]
    Canada10Y,
    #[serde(rename = "canada10YReal")]
    Canada10YReal,
    #[serde(rename = "cpiTrimYoY")]
    CpiTrimYoY,
    #[serde(rename = "caUnemployment")]
    CaUnemployment,
    #[serde(rename = "iveyPmiSA")]
    IveyPmiSA,
    #[serde(rename = "igCreditSpread")]
    IgCreditSpread,
}

impl Indicator {
    /// Display order used by the dashboard table.
    pub const ALL: [Indicator; 8] = [
        Indicator::Canada2Y,
        Indicator::Canada10Y,
        Indicator::Canada10YReal,
        Indicator::FiveYBreakeven,
        Indicator::CpiTrimYoY,
        Indicator::CaUnemployment,
        Indicator::IveyPmiSA,
        Indicator::IgCreditSpread,
    ];

    /// Yields that may live under the nested `canadaYields` object.
    pub const CURVE: [Indicator; 3] = [
        Indicator::Canada2Y,
        Indicator::Canada10Y,
        Indicator::Canada10YReal,
    ];

    /// Key used by the remote JSON document.
    pub fn key(self) -> &'static str {
        match self {
            Self::FiveYBreakeven => "fiveYBreakeven",
            Self::Canada2Y => "canada2Y",
            Self::Canada10Y => "canada10Y",
            Self::Canada10YReal => "canada10YReal",
            Self::CpiTrimYoY => "cpiTrimYoY",
            Self::CaUnemployment => "caUnemployment",
            Self::IveyPmiSA => "iveyPmiSA",
            Self::IgCreditSpread => "igCreditSpread",
        }
    }

    /// Human-readable label for tables.
    pub fn label(self) -> &'static str {
        match self {
            Self::FiveYBreakeven => "5Y Breakeven",
            Self::Canada2Y => "Canada 2Y",
            Self::Canada10Y => "Canada 10Y",
            Self::Canada10YReal => "Canada 10Y Real",
            Self::CpiTrimYoY => "CPI-Trim YoY",
            Self::CaUnemployment => "Unemployment",
            Self::IveyPmiSA => "Ivey PMI (SA)",
            Self::IgCreditSpread => "IG Credit Spread",
        }
    }

    /// Unit suffix; the PMI is a diffusion index and carries none.
    pub fn unit(self) -> &'static str {
        match self {
            Self::IveyPmiSA => "",
            _ => "%",
        }
    }
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// One measured value with its as-of label.
///
/// The date is display-only; when `value` is absent the reading takes no part
/// in scoring even if a date is present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorReading {
    pub value: Option<f64>,
    pub date: Option<String>,
}

impl IndicatorReading {
    pub fn new(value: Option<f64>, date: Option<String>) -> Self {
        Self { value, date }
    }

    pub fn absent() -> Self {
        Self::default()
    }
}

/// Immutable mapping from indicator to reading for one period.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    readings: BTreeMap<Indicator, IndicatorReading>,
}

impl Snapshot {
    /// A snapshot where every indicator is absent.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reading for `indicator`; names missing from the source are absent.
    pub fn reading(&self, indicator: Indicator) -> IndicatorReading {
        self.readings
            .get(&indicator)
            .cloned()
            .unwrap_or_else(IndicatorReading::absent)
    }

    pub fn value(&self, indicator: Indicator) -> Option<f64> {
        self.readings.get(&indicator).and_then(|r| r.value)
    }

    /// Number of indicators with a usable value.
    pub fn present_count(&self) -> usize {
        self.readings.values().filter(|r| r.value.is_some()).count()
    }
}

impl FromIterator<(Indicator, IndicatorReading)> for Snapshot {
    fn from_iter<T: IntoIterator<Item = (Indicator, IndicatorReading)>>(iter: T) -> Self {
        Self {
            readings: iter.into_iter().collect(),
        }
    }
}

/// The two snapshots one fetch cycle works with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotPair {
    pub current: Snapshot,
    pub prior: Snapshot,
}

/// Which direction of change counts as bullish for a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Polarity {
    /// current < prior contributes +1, current > prior contributes -1.
    LowerIsBullish,
    /// current > prior contributes +1, current < prior contributes -1.
    HigherIsBullish,
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LowerIsBullish => write!(f, "lowerIsBullish"),
            Self::HigherIsBullish => write!(f, "higherIsBullish"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_indicator_reads_as_absent() {
        let snap: Snapshot = [(
            Indicator::Canada10Y,
            IndicatorReading::new(Some(3.2), Some("2025-09-30".into())),
        )]
        .into_iter()
        .collect();

        assert_eq!(snap.value(Indicator::Canada10Y), Some(3.2));
        assert_eq!(snap.value(Indicator::Canada2Y), None);
        assert_eq!(snap.reading(Indicator::IveyPmiSA), IndicatorReading::absent());
        assert_eq!(snap.present_count(), 1);
    }

    #[test]
    fn indicator_serialises_to_wire_key() {
        for ind in Indicator::ALL {
            let json = serde_json::to_string(&ind).unwrap();
            assert_eq!(json, format!("\"{}\"", ind.key()));
        }
    }

    #[test]
    fn polarity_wire_names() {
        let p: Polarity = serde_json::from_str("\"higherIsBullish\"").unwrap();
        assert_eq!(p, Polarity::HigherIsBullish);
        assert_eq!(Polarity::LowerIsBullish.to_string(), "lowerIsBullish");
    }
}
