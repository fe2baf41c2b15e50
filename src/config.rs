use clap::Parser;
use std::net::SocketAddr;
use tracing::Level;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:9000";
const DEFAULT_DEMO_ITEMS: usize = 50;

/// In-memory auction bid tracker
#[derive(Parser, Clone, Debug)]
#[command(version, about)]
pub struct Options {
    /// Address and port the HTTP API will bind to.
    #[arg(long = "listen-addr")]
    #[arg(default_value = DEFAULT_LISTEN_ADDR)]
    #[arg(env = "BID_LISTEN_ADDR")]
    pub listen_addr: SocketAddr,

    /// Pre-fill the store with demo users, items and bids.
    #[arg(long = "demo")]
    #[arg(env = "BID_DEMO")]
    pub demo: bool,

    /// Number of items created by `--demo`.
    #[arg(long = "demo-items")]
    #[arg(default_value_t = DEFAULT_DEMO_ITEMS)]
    #[arg(env = "BID_DEMO_ITEMS")]
    pub demo_items: usize,

    /// Maximum level of log events printed to stdout.
    #[arg(long = "log-level")]
    #[arg(default_value = "info")]
    #[arg(env = "BID_LOG_LEVEL")]
    pub log_level: Level,
}
