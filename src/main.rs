// =============================================================================
// Bond Signal — Main Entry Point
// =============================================================================
//
// Default: serve the dashboard and JSON report over HTTP.
// `--once`: run a single fetch cycle, print the table, and exit non-zero if
// the source was unavailable.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod api;
mod app_state;
mod cli;
mod indicators;
mod payload;
mod presentation;
mod report;
mod runtime_config;
mod signals;
mod source;
mod types;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::cli::Cli;
use crate::runtime_config::RuntimeConfig;
use crate::source::SnapshotSource;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = RuntimeConfig::load(&cli.config).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        RuntimeConfig::default()
    });
    config.apply_overrides(cli.source_url, cli.fixture);

    info!(
        spread_polarity = %config.rules.spread_polarity,
        pmi_threshold = config.rules.pmi_threshold,
        "Rule policy"
    );

    // ── 2. Build shared state ────────────────────────────────────────────
    let source = SnapshotSource::from_config(&config)?;
    let state = Arc::new(AppState::new(config, source));

    // ── 3. One-shot mode ─────────────────────────────────────────────────
    if cli.once {
        let (output, available) = render_once(&state).await;
        print!("{output}");
        return Ok(if available {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    // ── 4. Start the API server ──────────────────────────────────────────
    let bind_addr = cli.bind_addr;
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind API server on {bind_addr}"))?;
    info!(addr = %bind_addr, "API server listening");

    let app = api::rest::router(state);
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "API server failed");
        return Err(e.into());
    }

    info!("Bond Signal shut down complete.");
    Ok(ExitCode::SUCCESS)
}

/// Run one fetch cycle for the terminal.  The flag is `false` when the source
/// was unavailable; the error itself only goes to the log.
async fn render_once(state: &AppState) -> (String, bool) {
    match state.run_cycle().await {
        Ok(report) => (presentation::render_text(&report), true),
        Err(e) => {
            error!(error = %format!("{e:#}"), "fetch cycle failed");
            (presentation::render_unavailable_text(), false)
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    warn!("Shutdown signal received — stopping gracefully");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture_state(path: &str) -> AppState {
        let config = RuntimeConfig {
            fixture_path: Some(PathBuf::from(path)),
            ..RuntimeConfig::default()
        };
        let source = SnapshotSource::from_config(&config).unwrap();
        AppState::new(config, source)
    }

    #[tokio::test]
    async fn once_prints_table_for_bundled_fixture() {
        let state = fixture_state(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/yields_sample.json"));
        let (output, available) = render_once(&state).await;
        assert!(available);
        assert!(output.starts_with("Indicator"));
        assert!(output.contains("Signal score: +1 / 9 rules (Bullish)"));
    }

    #[tokio::test]
    async fn once_shows_only_the_unavailable_message_on_failure() {
        let state = fixture_state("/nonexistent/yields.json");
        let (output, available) = render_once(&state).await;
        assert!(!available);
        assert_eq!(output, presentation::render_unavailable_text());
        assert!(!output.contains("fixture"));
    }
}
