//! subhost binary entry point
//!
//! Startup order: load config (token must be set), install cloudflared if
//! absent, bootstrap the content store, bind the local listener, start the
//! tunnel and wait for its connected event, then serve until a termination
//! signal arrives.

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

use subhost::{config, content, handler, logger, server, tunnel};

fn main() {
    let cfg = match config::Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            logger::log_error(&format!("Failed to load configuration: {e}"));
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            logger::log_error(&format!("Failed to build runtime: {e}"));
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(async_main(cfg)) {
        logger::log_error(&format!("Failed to start server: {e}"));
        std::process::exit(1);
    }
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let bin = tunnel::install::ensure_installed().await?;

    content::ensure_content_directories(
        Path::new(&cfg.content.root),
        &cfg.content.default_subdomain,
    )
    .await?;

    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;
    logger::log_server_start(&addr, &cfg);

    logger::log_info("Starting cloudflared tunnel...");
    let mut tunnel = tunnel::Tunnel::with_token(&bin, &cfg.tunnel.token)?;
    let connection = tunnel.wait_connected().await?;
    logger::log_info(&format!(
        "Cloudflared tunnel running at: {}",
        serde_json::to_string(&connection).unwrap_or_else(|_| format!("{connection:?}"))
    ));
    tunnel.forward_logs();

    let signal_name = serve(listener, Arc::new(cfg)).await;
    logger::log_info(&format!("{signal_name} received, shutting down..."));
    tunnel.stop().await;

    Ok(())
}

/// Accept connections until a termination signal fires; returns the
/// signal's name.
async fn serve(listener: TcpListener, config: Arc<config::Config>) -> &'static str {
    let mut shutdown = std::pin::pin!(server::shutdown_signal());

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        if config.logging.access_log {
                            logger::log_connection_accepted(&peer_addr);
                        }
                        handle_connection(stream, Arc::clone(&config));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            name = &mut shutdown => return name,
        }
    }
}

/// Serve one connection on a spawned task
fn handle_connection(stream: tokio::net::TcpStream, config: Arc<config::Config>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);
        let conn = http1::Builder::new().serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, Arc::clone(&config))),
        );
        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
