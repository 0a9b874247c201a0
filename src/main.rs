use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod report;
mod server;
mod terms;

/// Config file used when no path is given on the command line
const DEFAULT_CONFIG_PATH: &str = "config";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::Config::load_from(&config_path)?;
    logger::init(&cfg.logging)?;

    // Create Tokio runtime, sizing the worker pool from config
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr, cfg.server.backlog)?;
    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(config::AppState::new(cfg));
    server::serve(listener, state, async {
        match server::shutdown_signal().await {
            Ok(signal) => tracing::info!("{signal} received, shutting down"),
            Err(e) => {
                tracing::error!("Failed to install signal handlers: {e}");
                std::future::pending::<()>().await;
            }
        }
    })
    .await;

    tracing::info!("Server stopped");
    Ok(())
}
