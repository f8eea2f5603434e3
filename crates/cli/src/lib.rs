//! Command-line front end for the orchestration engine.
//!
//! Provides:
//! - [`Config`]: environment configuration with defaults
//! - [`Cli`]: command-line flags that override it
//! - [`build_orchestrator`]: wires HTTP or in-memory specialists into an [`Orchestrator`]

pub mod args;
pub mod config;

pub use args::Cli;
pub use config::Config;

use orchestration::{Orchestrator, Specialists};
use specialists::HttpTransport;

/// Creates an orchestrator backed by the remote specialists, or by the
/// in-memory ones when `offline` is set.
pub fn build_orchestrator(config: &Config, offline: bool) -> Orchestrator {
    let specialists = if offline {
        Specialists::in_memory()
    } else {
        Specialists::http(HttpTransport::new(config.base_url.clone()))
    };
    Orchestrator::new(specialists, config.orchestrator_config())
}
