// =============================================================================
// Presentation — text and HTML rendering of a signal report
// =============================================================================
//
// No decision logic lives here.  Every value arrives unrounded from
// `SignalReport`; this module only decides how it looks.

use std::fmt::Write as _;

use chrono::NaiveDate;
use html_escape::encode_text;

use crate::indicators::SpreadTriple;
use crate::report::{IndicatorRow, SignalReport};
use crate::signals::ScoreVerdict;

/// Rendered in place of any absent value.
pub const ABSENT: &str = "—";

const DECIMALS: usize = 2;
const SPREAD_LABEL: &str = "10Y–2Y Spread";
const UNAVAILABLE: &str = "Data unavailable. The indicator source could not be reached or returned an unreadable response.";

/// Two-decimal fixed point, without a stray minus on values that round to zero.
fn fixed(x: f64) -> String {
    let s = format!("{:.*}", DECIMALS, x);
    if s.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        s.trim_start_matches('-').to_string()
    } else {
        s
    }
}

/// A level such as `3.20%`.
pub fn format_level(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{}{unit}", fixed(v)),
        None => ABSENT.to_string(),
    }
}

/// A change such as `+0.12%` or `-0.20%`; an unchanged value has no sign.
pub fn format_delta(delta: Option<f64>, unit: &str) -> String {
    match delta {
        Some(d) => {
            let s = fixed(d);
            if s.starts_with('-') || s.chars().all(|c| c == '0' || c == '.') {
                format!("{s}{unit}")
            } else {
                format!("+{s}{unit}")
            }
        }
        None => ABSENT.to_string(),
    }
}

/// `2025-09-30` becomes `Sep 30, 2025` and `2025-09` becomes `Sep 2025`.
/// Anything else is shown as received.
pub fn format_date(date: Option<&str>) -> String {
    let Some(raw) = date else {
        return ABSENT.to_string();
    };
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.format("%b %-d, %Y").to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        return d.format("%b %Y").to_string();
    }
    raw.to_string()
}

/// One-line summary of the verdict.
pub fn score_line(verdict: &ScoreVerdict) -> String {
    match verdict {
        ScoreVerdict::NoData => "Signal score: no data".to_string(),
        ScoreVerdict::Scored {
            score,
            rules_considered,
            bias,
        } => {
            let signed = if *score > 0 {
                format!("+{score}")
            } else {
                score.to_string()
            };
            format!("Signal score: {signed} / {rules_considered} rules ({bias})")
        }
    }
}

// =============================================================================
// Plain text
// =============================================================================

struct TextRow {
    label: String,
    current: String,
    prior: String,
    change: String,
    as_of: String,
}

impl From<&IndicatorRow> for TextRow {
    fn from(row: &IndicatorRow) -> Self {
        Self {
            label: row.label.to_string(),
            current: format_level(row.current, row.unit),
            prior: format_level(row.prior, row.unit),
            change: format_delta(row.delta, row.unit),
            as_of: format_date(row.current_date.as_deref()),
        }
    }
}

fn spread_text_row(spread: &SpreadTriple) -> TextRow {
    TextRow {
        label: SPREAD_LABEL.to_string(),
        current: format_level(spread.current, "%"),
        prior: format_level(spread.prior, "%"),
        change: format_delta(spread.delta, "%"),
        as_of: ABSENT.to_string(),
    }
}

/// Fixed-width terminal table followed by the score line.
pub fn render_text(report: &SignalReport) -> String {
    let mut rows: Vec<TextRow> = report.indicators.iter().map(TextRow::from).collect();
    rows.push(spread_text_row(&report.spread));

    let header = TextRow {
        label: "Indicator".into(),
        current: "Current".into(),
        prior: "Prior".into(),
        change: "Change".into(),
        as_of: "As of".into(),
    };

    let mut w = [0usize; 4];
    for r in rows.iter().chain(std::iter::once(&header)) {
        for (i, cell) in [&r.label, &r.current, &r.prior, &r.change].into_iter().enumerate() {
            w[i] = w[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut line = |r: &TextRow| {
        let _ = writeln!(
            out,
            "{:<w0$}  {:>w1$}  {:>w2$}  {:>w3$}  {}",
            r.label,
            r.current,
            r.prior,
            r.change,
            r.as_of,
            w0 = w[0],
            w1 = w[1],
            w2 = w[2],
            w3 = w[3],
        );
    };
    line(&header);
    for r in &rows {
        line(r);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", score_line(&report.verdict));
    for warning in &report.warnings {
        let _ = writeln!(out, "note: {warning}");
    }
    out
}

pub fn render_unavailable_text() -> String {
    format!("{UNAVAILABLE}\n")
}

// =============================================================================
// HTML
// =============================================================================

fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Bond Signal</title>\n<style>\n\
         body {{ font-family: system-ui, sans-serif; margin: 2rem; }}\n\
         table {{ border-collapse: collapse; }}\n\
         th, td {{ padding: 0.3rem 0.8rem; border-bottom: 1px solid #ddd; }}\n\
         td.num {{ text-align: right; font-variant-numeric: tabular-nums; }}\n\
         .up {{ color: #0a7d32; }} .down {{ color: #b3261e; }}\n\
         </style>\n</head>\n<body>\n<h1>Bond Signal</h1>\n{body}</body>\n</html>\n"
    )
}

fn delta_class(delta: Option<f64>) -> &'static str {
    match delta {
        Some(d) if d > 0.0 => "num up",
        Some(d) if d < 0.0 => "num down",
        _ => "num",
    }
}

fn html_row(out: &mut String, row: &TextRow, delta: Option<f64>) {
    let _ = writeln!(
        out,
        "<tr><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td>\
         <td class=\"{}\">{}</td><td>{}</td></tr>",
        encode_text(&row.label),
        encode_text(&row.current),
        encode_text(&row.prior),
        delta_class(delta),
        encode_text(&row.change),
        encode_text(&row.as_of),
    );
}

/// Self-contained dashboard page.
pub fn render_html(report: &SignalReport) -> String {
    let mut body = String::new();
    let _ = writeln!(
        body,
        "<p class=\"score\"><strong>{}</strong></p>",
        encode_text(&score_line(&report.verdict))
    );
    let _ = writeln!(
        body,
        "<table>\n<thead><tr><th>Indicator</th><th>Current</th><th>Prior</th>\
         <th>Change</th><th>As of</th></tr></thead>\n<tbody>"
    );
    for row in &report.indicators {
        html_row(&mut body, &TextRow::from(row), row.delta);
    }
    html_row(&mut body, &spread_text_row(&report.spread), report.spread.delta);
    let _ = writeln!(body, "</tbody>\n</table>");

    for warning in &report.warnings {
        let _ = writeln!(
            body,
            "<p class=\"note\">{}</p>",
            encode_text(&warning.to_string())
        );
    }
    let _ = writeln!(
        body,
        "<p class=\"meta\">Generated {}</p>",
        encode_text(&report.generated_at)
    );
    page(&body)
}

pub fn render_unavailable_html() -> String {
    page(&format!("<p class=\"error\">{}</p>\n", encode_text(UNAVAILABLE)))
}
