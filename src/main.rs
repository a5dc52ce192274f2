// * Binary entry point.
// * With no arguments: runs the HTML fetch proxy daemon.
// * With a posting URL argument: runs one extraction through a proxy and
// * extraction service configured via JOBDRAFT_* environment variables,
// * printing the draft record as JSON.

use jobdraft::config::{DEFAULT_PROXY_PORT, ENV_PROXY_PORT};
use jobdraft::network::server;
use jobdraft::{Pipeline, PipelineConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("jobdraft=debug,info")
        .with_target(false)
        .json()
        .init();

    match std::env::args().nth(1) {
        Some(url) => run_extraction(&url).await,
        None => run_proxy_daemon().await,
    }
}

async fn run_extraction(url: &str) {
    let pipeline = match Pipeline::new(PipelineConfig::from_env()) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!(error = %e, "Failed to wire pipeline from environment");
            std::process::exit(1);
        }
    };

    match pipeline.run(url, "").await {
        Ok(draft) => {
            let json = serde_json::to_string_pretty(&draft).unwrap_or_else(|_| "{}".to_string());
            println!("{json}");
        }
        Err(e) => {
            tracing::error!(error = %e, "Extraction run failed");
            std::process::exit(1);
        }
    }
}

async fn run_proxy_daemon() {
    let port = std::env::var(ENV_PROXY_PORT)
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PROXY_PORT);

    let mut handle = match server::start_proxy_server(port).await {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start fetch proxy");
            std::process::exit(1);
        }
    };

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }

    handle.shutdown();
}
