// crates/server/src/main.rs
//! Exportd server binary.
//!
//! Wires the real converter (ultralytics `yolo` CLI) and hardware probe
//! (`nvidia-smi`) into the export manager and serves the HTTP API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use exportd_core::{ExportManager, NvidiaSmiProbe, YoloCliConverter};
use exportd_server::create_app;
use tracing_subscriber::EnvFilter;

/// Default port for the server.
const DEFAULT_PORT: u16 = 47311;

/// Get the server port from environment or use default.
fn get_port() -> u16 {
    std::env::var("EXPORTD_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let manager = Arc::new(ExportManager::new(
        Arc::new(YoloCliConverter::new()),
        Arc::new(NvidiaSmiProbe::new()),
    ));
    let app = create_app(manager);

    let addr = SocketAddr::from(([127, 0, 0, 1], get_port()));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "exportd listening");

    axum::serve(listener, app).await?;
    Ok(())
}
