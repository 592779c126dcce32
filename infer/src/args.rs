use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Chat inference service
#[derive(Debug, Parser)]
#[command(name = "infer", about = "Batch, streamed and tool-augmented chat over an LLM provider")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "infer.toml", env = "INFER_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "INFER_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Override the configured log filter
    #[arg(long, env = "INFER_LOG")]
    pub log: Option<String>,
}
