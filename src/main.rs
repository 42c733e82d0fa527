//! Hourglass Timer - headless view host for the hourglass lifecycle
//!
//! This is the main entry point for the hourglass-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use hourglass_timer::{
    api::create_router,
    config::Config,
    state::AppState,
    utils::shutdown_signal,
};

// The lifecycle is a single cooperative event loop
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("hourglass_timer={},tower_http=info", config.log_level()))
        .init();

    config.validate()?;

    info!("Starting hourglass-timer v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, cycle={}ms, speed={}, external_animation={}",
        config.host, config.port, config.cycle_ms, config.speed, config.external_animation
    );

    let (state, lifecycle) =
        AppState::launch(config.port, config.host.clone(), config.animation_settings());

    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /choices        - Duration catalog");
    info!("  POST /select/:label  - Start an hourglass session");
    info!("  POST /restart        - Back to selection");
    info!("  POST /animation      - Report external playback state");
    info!("  GET  /screen         - Current screen");
    info!("  GET  /session        - Saved state record");
    info!("  POST /session        - Restore from a saved state record");
    info!("  GET  /status         - Status and uptime");
    info!("  GET  /health         - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        signal = shutdown_signal() => {
            match signal {
                Ok(_) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Failed to listen for signals: {}", e),
            }
        }
    }

    if let Err(e) = state.shutdown().await {
        tracing::warn!("Lifecycle task already stopped: {}", e);
    }
    if let Err(e) = lifecycle.await {
        tracing::error!("Lifecycle task failed: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
