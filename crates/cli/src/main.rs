//! Orchestrator entry point.

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Config};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, cancelling outstanding specialist calls");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, cancelling outstanding specialist calls");
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.apply(Config::from_env());

    // 1. Initialize tracing; stdout is reserved for the response
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let json_layer = cli
        .json_logs
        .then(|| fmt::layer().json().with_writer(std::io::stderr));
    let text_layer = (!cli.json_logs).then(|| fmt::layer().with_writer(std::io::stderr));
    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    // 2. Install Prometheus metrics recorder when a snapshot was asked for
    let metrics_handle = if cli.print_metrics {
        let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
            .install_recorder()
            .context("failed to install Prometheus recorder")?;
        Some(handle)
    } else {
        None
    };

    // 3. Wire the specialists
    let orchestrator = cli::build_orchestrator(&config, cli.offline);
    tracing::info!(
        base_url = %config.base_url,
        mode = %config.mode,
        offline = cli.offline,
        "orchestrator ready"
    );

    // 4. Cancel outstanding calls on shutdown
    let cancel = CancellationToken::new();
    let watcher = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            shutdown_signal().await;
            cancel.cancel();
        }
    });

    // 5. Run and print
    let response = orchestrator
        .run_with_cancellation(cli.request(), cancel)
        .await
        .context("orchestration failed")?;
    watcher.abort();

    let body = serde_json::to_string_pretty(&response).context("failed to encode response")?;
    println!("{body}");

    if let Some(handle) = metrics_handle {
        eprintln!("{}", handle.render());
    }

    Ok(())
}
