// =============================================================================
// Signal Report — everything the presentation layer needs for one fetch cycle
// =============================================================================
//
// Values are carried unrounded.  Formatting (precision, sign prefixes, units,
// the absence dash) is the presentation adapter's job.

use serde::Serialize;

use crate::indicators::{delta, SpreadTriple};
use crate::payload::{ParsedPayload, PayloadWarning};
use crate::signals::{RuleContribution, ScoreVerdict, SignalAggregator};
use crate::types::{Indicator, SnapshotPair};

/// Current, prior and change for a single indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorRow {
    pub indicator: Indicator,
    pub label: &'static str,
    pub unit: &'static str,
    pub current: Option<f64>,
    pub prior: Option<f64>,
    pub delta: Option<f64>,
    pub current_date: Option<String>,
    pub prior_date: Option<String>,
}

impl IndicatorRow {
    fn build(pair: &SnapshotPair, indicator: Indicator) -> Self {
        let cur = pair.current.reading(indicator);
        let prev = pair.prior.reading(indicator);
        Self {
            indicator,
            label: indicator.label(),
            unit: indicator.unit(),
            current: cur.value,
            prior: prev.value,
            delta: delta(cur.value, prev.value),
            current_date: cur.date,
            prior_date: prev.date,
        }
    }
}

/// Complete output of one fetch cycle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalReport {
    /// Unique identifier for this report (UUID v4).
    pub id: String,

    /// RFC 3339 timestamp of when this report was built.
    pub generated_at: String,

    pub indicators: Vec<IndicatorRow>,

    /// 10Y minus 2Y.
    pub spread: SpreadTriple,

    pub verdict: ScoreVerdict,

    pub contributions: Vec<RuleContribution>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<PayloadWarning>,
}

impl SignalReport {
    /// Build a report from a parsed payload.
    pub fn build(parsed: ParsedPayload, aggregator: &SignalAggregator) -> Self {
        let ParsedPayload { pair, warnings } = parsed;

        let indicators = Indicator::ALL
            .iter()
            .map(|&ind| IndicatorRow::build(&pair, ind))
            .collect();
        let aggregation = aggregator.aggregate(&pair);

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            indicators,
            verdict: aggregation.verdict(),
            spread: aggregation.spread,
            contributions: aggregation.contributions,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::parse_payload;
    use serde_json::json;

    fn row(report: &SignalReport, indicator: Indicator) -> &IndicatorRow {
        report
            .indicators
            .iter()
            .find(|r| r.indicator == indicator)
            .unwrap()
    }

    fn sample() -> SignalReport {
        let doc = json!({
            "current": {
                "canadaYields": { "canada2Y": 3.00, "canada10Y": 3.20, "date": "2025-10-01" },
                "caUnemployment": { "value": 5.2, "date": "2025-09" }
            },
            "monthAgo": {
                "canadaYields": { "canada2Y": 3.10, "canada10Y": 3.40, "date": "2025-09-01" },
                "caUnemployment": { "value": 5.0, "date": "2025-08" }
            }
        });
        SignalReport::build(parse_payload(&doc), &SignalAggregator::default())
    }

    #[test]
    fn rows_cover_every_indicator_in_display_order() {
        let report = sample();
        let order: Vec<_> = report.indicators.iter().map(|r| r.indicator).collect();
        assert_eq!(order, Indicator::ALL.to_vec());
    }

    #[test]
    fn rows_carry_unrounded_triples() {
        let report = sample();
        let ten = row(&report, Indicator::Canada10Y);
        assert_eq!(ten.current, Some(3.20));
        assert_eq!(ten.prior, Some(3.40));
        assert_eq!(ten.delta, Some(3.20 - 3.40));
        assert_eq!(ten.current_date.as_deref(), Some("2025-10-01"));
        assert_eq!(ten.prior_date.as_deref(), Some("2025-09-01"));

        let missing = row(&report, Indicator::IveyPmiSA);
        assert_eq!((missing.current, missing.prior, missing.delta), (None, None, None));
    }

    #[test]
    fn spread_and_verdict() {
        let report = sample();
        assert_eq!(report.spread.current, Some(3.20 - 3.00));
        assert_eq!(report.spread.prior, Some(3.40 - 3.10));
        // 10Y +1, 2Y +1, spread -1, unemployment +1.
        match report.verdict {
            ScoreVerdict::Scored {
                score,
                rules_considered,
                ..
            } => {
                assert_eq!(score, 2);
                assert_eq!(rules_considered, 4);
            }
            ScoreVerdict::NoData => panic!("expected a score"),
        }
    }

    #[test]
    fn spread_comes_from_the_aggregation() {
        let doc = json!({
            "current": { "canadaYields": { "canada2Y": 3.00, "canada10Y": 3.20 } },
            "monthAgo": { "canadaYields": { "canada2Y": 3.10, "canada10Y": 3.40 } }
        });
        let aggregator = SignalAggregator::default();
        let expected = aggregator.aggregate(&parse_payload(&doc).pair).spread;
        let report = SignalReport::build(parse_payload(&doc), &aggregator);
        assert_eq!(report.spread, expected);
        let rule = report
            .contributions
            .iter()
            .find(|c| c.rule == "curveSpread10Y2Y")
            .unwrap();
        assert_eq!((rule.current, rule.prior), (expected.current, expected.prior));
    }

    #[test]
    fn empty_document_reports_no_data() {
        let report = SignalReport::build(parse_payload(&json!({})), &SignalAggregator::default());
        assert_eq!(report.verdict, ScoreVerdict::NoData);
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn json_shape() {
        let report = sample();
        let v = serde_json::to_value(&report).unwrap();
        assert!(v["id"].is_string());
        assert!(v["generatedAt"].is_string());
        assert_eq!(v["indicators"][0]["indicator"], "canada2Y");
        assert_eq!(v["indicators"][0]["currentDate"], "2025-10-01");
        assert_eq!(v["verdict"]["status"], "scored");
        assert!(v.get("warnings").is_none());
        assert_eq!(v["contributions"].as_array().unwrap().len(), 9);
    }
}
