// =============================================================================
// Application State — what every fetch cycle needs, shared read-only
// =============================================================================
//
// Nothing here is mutated after startup.  Each fetch cycle builds its own
// snapshots and report and drops them when done; no data survives between
// cycles.
// =============================================================================

use anyhow::Result;
use tracing::{info, warn};

use crate::payload::parse_payload;
use crate::report::SignalReport;
use crate::runtime_config::RuntimeConfig;
use crate::signals::{RuleTable, ScoreVerdict, SignalAggregator};
use crate::source::SnapshotSource;

/// Shared across request handlers via `Arc<AppState>`.
pub struct AppState {
    pub config: RuntimeConfig,
    pub source: SnapshotSource,
    pub aggregator: SignalAggregator,
}

impl AppState {
    pub fn new(config: RuntimeConfig, source: SnapshotSource) -> Self {
        let aggregator = SignalAggregator::new(RuleTable::standard(&config.rules));
        Self {
            config,
            source,
            aggregator,
        }
    }

    /// Fetch, parse and score one snapshot pair.
    ///
    /// Only the fetch can fail; a malformed document still yields a report.
    pub async fn run_cycle(&self) -> Result<SignalReport> {
        let doc = self.source.load().await?;
        let parsed = parse_payload(&doc);
        for w in &parsed.warnings {
            warn!(warning = %w, "payload degraded");
        }

        let report = SignalReport::build(parsed, &self.aggregator);
        match report.verdict {
            ScoreVerdict::Scored {
                score,
                rules_considered,
                bias,
            } => info!(
                report_id = %report.id,
                score,
                rules_considered,
                bias = %bias,
                "signal computed"
            ),
            ScoreVerdict::NoData => warn!(report_id = %report.id, "no rule had enough data"),
        }
        Ok(report)
    }
}
