// Initialize logging
// Load configuration
// Bootstrap the ledger (snapshot or generated demo corpus)
// Create shared state
// Start HTTP server

use sentinel_ledger::{api, config::Config, ledger::Ledger, state::AppState};

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    // Bootstrap the ledger; a broken snapshot aborts startup
    let mut rng = match config.demo_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let ledger = Ledger::initialize(&config.bootstrap_options(), &mut rng)?;
    info!("Loaded {} demo transactions", ledger.len());

    // Create shared state
    let addr = config.bind_addr();
    let app_state = Arc::new(AppState::new(config, ledger));

    info!("======================================================================");
    info!("SENTINEL AI - DEMO MODE");
    info!("Transaction ledger ready (in-memory)");
    info!("Mock AI analysis enabled");
    info!("======================================================================");

    // Start HTTP server
    let app = api::create_router(app_state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Starting server on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => error!("Failed to listen for shutdown signal: {}", e),
            }
        })
        .await?;

    Ok(())
}
