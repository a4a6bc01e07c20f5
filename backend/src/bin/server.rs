//! Flight delays HTTP server binary.
//!
//! Loads the dataset, builds the reactive controller and serves the REST API.
//!
//! # Usage
//!
//! ```bash
//! FLIGHTS_CSV=./data/vuelos.csv cargo run --bin flight-delays-server
//! ```
//!
//! # Environment Variables
//!
//! - `FLIGHTS_CSV`: Dataset path (default: data/flights.csv)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use flight_delays::config::AppConfig;
use flight_delays::dataset;
use flight_delays::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting flight delays server");

    let config = AppConfig::from_default_location()?.with_env_overrides()?;

    // A dataset that cannot be loaded is fatal: the server never starts.
    let dataset = dataset::init_dataset(&config.dataset.path)
        .with_context(|| format!("Failed to load {}", config.dataset.path.display()))?;
    info!(
        records = dataset.len(),
        states = dataset.unique_states().len(),
        "Dataset loaded"
    );

    let state = AppState::new(Arc::clone(&dataset));
    let app = create_router(state);

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
