use std::sync::Arc;
use tokio::sync::Notify;

use tiddler_relay::catalog;
use tiddler_relay::config::{self, AppState};
use tiddler_relay::handler::MessageRouter;
use tiddler_relay::library::HttpLibrary;
use tiddler_relay::logger;
use tiddler_relay::server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::Config::load_from(&config_path)?;
    logger::init(&cfg)?;

    // Create the Tokio runtime, thread count from the workers setting
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

    // The catalog is loaded once, before any message is accepted
    let library_url = cfg.library_url();
    let fetcher = Arc::new(HttpLibrary::new(
        &cfg.library.user_agent,
        cfg.library.fetch_timeout,
    )?);
    let catalog = catalog::load(fetcher.as_ref(), library_url.as_deref()).await;
    let router = MessageRouter::new(catalog, library_url, fetcher);

    if cfg.relay.allowed_origins.is_empty() {
        logger::log_warning("relay.allowed_origins is empty, messages from any origin are answered");
    }

    let listener = server::create_listener(addr)?;
    let state = Arc::new(AppState::new(&cfg, router));
    logger::log_relay_start(&addr, &cfg, state.router.catalog().len());

    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown))?;

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::start_server_loop(listener, state, shutdown))
        .await
}
