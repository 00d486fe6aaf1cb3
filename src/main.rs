//! GDP Matcher · quiz backend binary.
//!
//! - Axum HTTP API (`/api/game`, `/api/validate_matches`, `/api/health`)
//! - Static frontend fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT               : u16 (default 5000)
//!   DATA_FILE          : country data JSON (default data/game_data_with_flags.json)
//!   GAME_CONFIG_PATH   : optional TOML config (see `config`)
//!   ROUND_SIZE         : countries per round (default 5)
//!   DEFAULT_DIFFICULTY : easy | medium | hard (default medium)
//!   GAME_RNG_SEED      : fixed seed for reproducible rounds
//!   STATIC_DIR         : frontend build directory (default ./static)
//!   LOG_LEVEL          : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT         : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};

use tokio::net::TcpListener;
use tracing::info;

use gdp_matcher::{build_router, telemetry, AppState, GameConfig};

const DEFAULT_PORT: u16 = 5000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing();

    let config = GameConfig::from_env();
    let state = Arc::new(AppState::new(config));
    if state.config.preload {
        state.preload().await;
    }

    let app = build_router(state.clone());

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = TcpListener::bind(addr).await?;
    info!(target: "gdp_matcher", %addr, "HTTP server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(target: "gdp_matcher", error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!(target: "gdp_matcher", "Shutdown signal received");
}
