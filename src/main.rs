use std::sync::Arc;

mod api;
mod config;
mod handler;
mod http;
mod logger;
mod navigation;
mod server;

const DEFAULT_CONFIG_PATH: &str = "config";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::Config::load_from(&config_path)?;

    logger::init(&cfg)?;

    // Worker thread count follows `server.workers`, defaulting to CPU cores
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
    let listener = server::create_listener(addr).map_err(|e| {
        logger::log_error(&format!("Failed to bind {addr}: {e}"));
        e
    })?;

    let state = Arc::new(config::AppState::new(&cfg));
    logger::log_server_start(&addr, &state);

    if !state.store.path().exists() {
        logger::log_warning(&format!(
            "Navigation data file {} does not exist yet; GET /api/navigation will fail until it is written",
            state.store.path().display()
        ));
    }

    server::run_server_loop(listener, state, server::shutdown_signal()).await;
    Ok(())
}
