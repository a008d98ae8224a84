use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use doctor_cell::{DoctorCellState, DoctorRoster};
use shared_config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Doctor Search API server");

    // Load configuration
    let config = AppConfig::from_env();
    info!(
        "Fuzzy threshold {}, page size {} (max {})",
        config.fuzzy_threshold, config.default_page_size, config.max_page_size
    );

    // The roster is the whole dataset; there is nothing to serve without it.
    let roster = DoctorRoster::load_csv(&config.doctors_csv_path).with_context(|| {
        format!(
            "Failed to load doctor roster from '{}' (set DOCTORS_CSV_PATH)",
            config.doctors_csv_path
        )
    })?;

    let addr = config.bind_address();
    let state = DoctorCellState::new(Arc::new(config), roster);

    // Build the application router
    let app = router::create_router(state);

    // Run the server
    let listener = TcpListener::bind(addr.as_str())
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
