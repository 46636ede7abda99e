use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

mod api;
mod config;
mod http;
mod logger;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = server::bind_listener(addr)?;

    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(config::AppState::new(cfg));
    let connections = Arc::new(AtomicUsize::new(0));

    let shutdown = server::ShutdownSignal::new();
    server::signal::spawn_listener(&shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        server::accept_connection(stream, peer_addr, &state, &connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notify.notified() => {
                logger::log_shutdown(connections.load(Ordering::SeqCst));
                break;
            }
        }
    }

    Ok(())
}
