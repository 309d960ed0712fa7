// =============================================================================
// Payload Parsing — remote JSON document to a snapshot pair
// =============================================================================
//
// Accepted shapes:
//
//   { "current": { ... }, "monthAgo": { ... } }     (preferred; `prior` alias)
//   { "fiveYBreakeven": { "value": 2.3 }, ... }     (flat; prior is empty)
//
// Inside a snapshot a reading is either `{ "value": .., "date": .. }` or a bare
// scalar.  The yield curve may sit under `canadaYields` with a shared `date`.
//
// A missing section never fails the parse: it becomes an empty snapshot and a
// warning, which degrades to a "no data" verdict downstream.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::indicators::coerce;
use crate::types::{Indicator, IndicatorReading, Snapshot, SnapshotPair};

const CURRENT_KEY: &str = "current";
const PRIOR_KEYS: [&str; 2] = ["monthAgo", "prior"];
const CURVE_KEY: &str = "canadaYields";

/// Non-fatal problems found while reading a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "section", rename_all = "camelCase")]
pub enum PayloadWarning {
    /// A top-level section was missing or not an object.
    MissingSection(&'static str),
    /// The document used the older single-snapshot shape.
    FlatPayload,
}

impl std::fmt::Display for PayloadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSection(name) => write!(f, "section `{name}` missing from payload"),
            Self::FlatPayload => write!(f, "flat payload: no prior period available"),
        }
    }
}

/// A parsed payload plus whatever was wrong with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPayload {
    pub pair: SnapshotPair,
    pub warnings: Vec<PayloadWarning>,
}

/// Parse the remote document.  Never fails; see [`PayloadWarning`].
pub fn parse_payload(doc: &Value) -> ParsedPayload {
    let Some(root) = doc.as_object() else {
        warn!("payload is not a JSON object");
        return ParsedPayload {
            pair: SnapshotPair::default(),
            warnings: vec![
                PayloadWarning::MissingSection(CURRENT_KEY),
                PayloadWarning::MissingSection(PRIOR_KEYS[0]),
            ],
        };
    };

    let has_sections =
        root.contains_key(CURRENT_KEY) || PRIOR_KEYS.iter().any(|k| root.contains_key(*k));

    if !has_sections && looks_like_snapshot(root) {
        debug!("flat payload detected");
        return ParsedPayload {
            pair: SnapshotPair {
                current: parse_snapshot(root),
                prior: Snapshot::empty(),
            },
            warnings: vec![PayloadWarning::FlatPayload],
        };
    }

    let mut warnings = Vec::new();

    let current = match root.get(CURRENT_KEY).and_then(Value::as_object) {
        Some(section) => parse_snapshot(section),
        None => {
            warn!(section = CURRENT_KEY, "payload section missing, treating as empty");
            warnings.push(PayloadWarning::MissingSection(CURRENT_KEY));
            Snapshot::empty()
        }
    };

    let prior = match PRIOR_KEYS
        .iter()
        .find_map(|k| root.get(*k).and_then(Value::as_object))
    {
        Some(section) => parse_snapshot(section),
        None => {
            warn!(section = PRIOR_KEYS[0], "payload section missing, treating as empty");
            warnings.push(PayloadWarning::MissingSection(PRIOR_KEYS[0]));
            Snapshot::empty()
        }
    };

    debug!(
        current_present = current.present_count(),
        prior_present = prior.present_count(),
        "payload parsed"
    );

    ParsedPayload {
        pair: SnapshotPair { current, prior },
        warnings,
    }
}

fn looks_like_snapshot(obj: &Map<String, Value>) -> bool {
    obj.contains_key(CURVE_KEY) || Indicator::ALL.iter().any(|i| obj.contains_key(i.key()))
}

/// Read one snapshot section.
pub fn parse_snapshot(section: &Map<String, Value>) -> Snapshot {
    let curve = section.get(CURVE_KEY).and_then(Value::as_object);
    let curve_date = curve.and_then(|c| c.get("date")).and_then(date_label);

    Indicator::ALL
        .iter()
        .filter_map(|&ind| {
            let own = section.get(ind.key());
            let nested = if Indicator::CURVE.contains(&ind) {
                curve.and_then(|c| c.get(ind.key()))
            } else {
                None
            };

            let reading = match (own, nested) {
                (Some(v), _) if !v.is_null() => parse_reading(v),
                (_, Some(v)) => {
                    let mut r = parse_reading(v);
                    if r.date.is_none() {
                        r.date = curve_date.clone();
                    }
                    r
                }
                (Some(v), None) => parse_reading(v),
                (None, None) => return None,
            };

            Some((ind, reading))
        })
        .collect()
}

/// A reading object or a bare scalar.
fn parse_reading(v: &Value) -> IndicatorReading {
    match v {
        Value::Object(obj) => IndicatorReading::new(
            obj.get("value").and_then(coerce),
            obj.get("date").and_then(date_label),
        ),
        other => IndicatorReading::new(coerce(other), None),
    }
}

fn date_label(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_payload() {
        let doc = json!({
            "current": {
                "fiveYBreakeven": { "value": 2.31, "date": "2025-09-30" },
                "canadaYields": {
                    "canada2Y": "2.47",
                    "canada10Y": 3.18,
                    "canada10YReal": { "value": 1.52 },
                    "date": "2025-10-01"
                },
                "cpiTrimYoY": { "value": "3.1", "date": "2025-08" },
                "caUnemployment": { "value": 7.1, "date": "2025-09" },
                "iveyPmiSA": { "value": null, "date": "2025-09" },
                "igCreditSpread": { "value": 1.05, "date": "2025-10-01" }
            },
            "monthAgo": {
                "fiveYBreakeven": { "value": 2.28, "date": "2025-08-29" },
                "canadaYields": { "canada2Y": 2.66, "canada10Y": 3.33, "date": "2025-09-01" }
            }
        });

        let parsed = parse_payload(&doc);
        assert!(parsed.warnings.is_empty());

        let cur = &parsed.pair.current;
        assert_eq!(cur.value(Indicator::Canada2Y), Some(2.47));
        assert_eq!(cur.value(Indicator::Canada10Y), Some(3.18));
        assert_eq!(cur.value(Indicator::Canada10YReal), Some(1.52));
        assert_eq!(cur.reading(Indicator::Canada2Y).date.as_deref(), Some("2025-10-01"));
        assert_eq!(cur.reading(Indicator::Canada10YReal).date.as_deref(), Some("2025-10-01"));
        assert_eq!(cur.value(Indicator::CpiTrimYoY), Some(3.1));

        // Absent value keeps its date for display.
        let pmi = cur.reading(Indicator::IveyPmiSA);
        assert_eq!(pmi.value, None);
        assert_eq!(pmi.date.as_deref(), Some("2025-09"));

        let prior = &parsed.pair.prior;
        assert_eq!(prior.value(Indicator::Canada10Y), Some(3.33));
        assert_eq!(prior.value(Indicator::Canada10YReal), None);
        assert_eq!(prior.value(Indicator::IgCreditSpread), None);
    }

    #[test]
    fn missing_current_section_degrades_to_empty() {
        let doc = json!({ "monthAgo": { "caUnemployment": { "value": 6.9 } } });
        let parsed = parse_payload(&doc);
        assert_eq!(parsed.warnings, vec![PayloadWarning::MissingSection("current")]);
        assert_eq!(parsed.pair.current, Snapshot::empty());
        assert_eq!(parsed.pair.prior.value(Indicator::CaUnemployment), Some(6.9));
    }

    #[test]
    fn non_object_section_counts_as_missing() {
        let doc = json!({ "current": null, "monthAgo": [] });
        let parsed = parse_payload(&doc);
        assert_eq!(
            parsed.warnings,
            vec![
                PayloadWarning::MissingSection("current"),
                PayloadWarning::MissingSection("monthAgo"),
            ]
        );
    }

    #[test]
    fn prior_alias_is_accepted() {
        let doc = json!({
            "current": { "canada10Y": 3.1 },
            "prior": { "canada10Y": 3.3 }
        });
        let parsed = parse_payload(&doc);
        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.pair.prior.value(Indicator::Canada10Y), Some(3.3));
    }

    #[test]
    fn flat_payload_has_no_prior() {
        let doc = json!({ "fiveYBreakeven": { "value": 2.31, "date": "2025-09-30" } });
        let parsed = parse_payload(&doc);
        assert_eq!(parsed.warnings, vec![PayloadWarning::FlatPayload]);
        assert_eq!(parsed.pair.current.value(Indicator::FiveYBreakeven), Some(2.31));
        assert_eq!(parsed.pair.prior, Snapshot::empty());
    }

    #[test]
    fn non_object_document() {
        let parsed = parse_payload(&json!("oops"));
        assert_eq!(parsed.pair, SnapshotPair::default());
        assert_eq!(parsed.warnings.len(), 2);
    }

    #[test]
    fn top_level_yield_overrides_nested() {
        let section = json!({
            "canada10Y": { "value": 3.5, "date": "own" },
            "canadaYields": { "canada10Y": 3.0, "date": "shared" }
        });
        let snap = parse_snapshot(section.as_object().unwrap());
        let r = snap.reading(Indicator::Canada10Y);
        assert_eq!(r.value, Some(3.5));
        assert_eq!(r.date.as_deref(), Some("own"));
    }

    #[test]
    fn garbage_values_are_absent() {
        let section = json!({
            "igCreditSpread": { "value": "n/a" },
            "iveyPmiSA": true,
            "caUnemployment": { "value": "NaN", "date": "" }
        });
        let snap = parse_snapshot(section.as_object().unwrap());
        assert_eq!(snap.present_count(), 0);
        assert_eq!(snap.reading(Indicator::CaUnemployment), IndicatorReading::absent());
    }

    #[test]
    fn warning_serialisation() {
        let json = serde_json::to_value(PayloadWarning::MissingSection("current")).unwrap();
        assert_eq!(json, json!({ "kind": "missingSection", "section": "current" }));
        let json = serde_json::to_value(PayloadWarning::FlatPayload).unwrap();
        assert_eq!(json, json!({ "kind": "flatPayload" }));
    }
}
