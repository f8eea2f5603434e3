//! Command-line flags.

use clap::Parser;
use common::GeoPoint;
use orchestration::{Request, StrategyKind};

use crate::config::Config;

/// CLI arguments for the shopping orchestrator
#[derive(Parser, Debug)]
#[command(name = "shopping-orchestrator")]
#[command(author, version, about = "Answer a product query by coordinating four specialist services")]
#[command(long_about = r#"
Runs one orchestration over the search, matchmaking, location and navigation
specialists and prints the response as JSON on stdout. Logs go to stderr.

Strategies: sequential, concurrent, handoff, groupchat, magentic.

Environment:
  SPECIALIST_BASE_URL     root of the specialist services (default http://localhost:5000)
  SPECIALIST_MODE         backend mode for every specialist (default llm)
  SPECIALIST_TIMEOUT_MS   per-call timeout (default 30000)
  RUST_LOG                tracing filter (default info)

Example:
  shopping-orchestrator "cordless drill" --strategy magentic --lat 47.6062 --lon -122.3321
  shopping-orchestrator "paint roller" --offline --json-logs
"#)]
pub struct Cli {
    /// The product to look for
    pub query: String,

    /// User the request is made on behalf of
    #[arg(short, long, default_value = "cli-user")]
    pub user: String,

    /// Coordination strategy
    #[arg(short, long, default_value = "sequential")]
    pub strategy: StrategyKind,

    /// Shopper latitude (requires --lon)
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Shopper longitude (requires --lat)
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Backend mode for every specialist, overrides SPECIALIST_MODE
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Specialist base URL, overrides SPECIALIST_BASE_URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Per-call timeout in milliseconds, overrides SPECIALIST_TIMEOUT_MS
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Use the in-memory specialists instead of calling the services
    #[arg(long)]
    pub offline: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Print a Prometheus metrics snapshot to stderr after the run
    #[arg(long)]
    pub print_metrics: bool,
}

impl Cli {
    pub fn location(&self) -> Option<GeoPoint> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        }
    }

    /// The orchestration request described by these flags.
    pub fn request(&self) -> Request {
        let request = Request::new(self.user.clone(), self.query.clone()).with_strategy(self.strategy);
        match self.location() {
            Some(location) => request.with_location(location),
            None => request,
        }
    }

    /// Layers flag overrides on top of the environment configuration.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(mode) = &self.mode {
            config.mode = specialists::mode::normalize(mode);
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        config
    }
}
