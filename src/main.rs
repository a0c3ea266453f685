use std::sync::Arc;

use webctx::config::Config;
use webctx::dispatch::Dispatcher;
use webctx::routing::RouteRegistry;
use webctx::server::{create_reusable_listener, serve, AppState};
use webctx::{contexts, logger};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    logger::init(&cfg)?;

    // Fixed-size worker pool; unset falls back to the CPU-count default.
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    // Registration phase: the registry is mutable only here, before the
    // listener starts accepting.
    let mut registry = RouteRegistry::new();
    contexts::register_all(&mut registry);

    let addr = cfg.socket_addr()?;
    let listener = create_reusable_listener(addr)?;

    let dispatcher = Dispatcher::new(registry);
    logger::log_server_start(&addr, &cfg, dispatcher.registry().route_count());

    let state = Arc::new(AppState {
        config: cfg,
        dispatcher,
    });
    serve(listener, state).await
}
