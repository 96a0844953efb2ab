//! Development server
//!
//! Serves the built output directory over HTTP for local preview. The
//! server never rebuilds anything; the CLI runs one build before
//! starting it. Blocks until Ctrl-C, then shuts down cleanly.

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use tower_http::services::ServeDir;

use crate::Site;

/// Serve the output directory on the given port until interrupted.
pub async fn start(site: &Site, port: u16) -> Result<()> {
    let serve_dir =
        ServeDir::new(&site.output_dir).append_index_html_on_directories(true);

    let app = Router::new().fallback_service(serve_dir);

    let addr: SocketAddr = ([127, 0, 0, 1], port).into();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    println!("Serving site at http://localhost:{}", port);
    println!("Press Ctrl+C to stop");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\nServer stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
