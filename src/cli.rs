// =============================================================================
// Command Line — flags and their environment fallbacks
// =============================================================================

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bondsignal", version, about = "Macro bond-market signal dashboard")]
pub struct Cli {
    /// Run a single fetch cycle, print the table and exit
    #[arg(long)]
    pub once: bool,

    /// JSON configuration file
    #[arg(long, env = "BONDSIGNAL_CONFIG", default_value = "bondsignal_config.json")]
    pub config: PathBuf,

    /// Address the HTTP server binds to
    #[arg(long, env = "BONDSIGNAL_BIND_ADDR", default_value = "0.0.0.0:3001")]
    pub bind_addr: String,

    /// Override the indicator endpoint from the config file
    #[arg(long, env = "BONDSIGNAL_SOURCE_URL")]
    pub source_url: Option<String>,

    /// Read the indicator document from a local file instead of the endpoint
    #[arg(long, env = "BONDSIGNAL_FIXTURE")]
    pub fixture: Option<String>,
}
