//! Lap Timer - a stopwatch with lap tracking behind a small HTTP API
//! 
//! This is the main entry point for the lap-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use lap_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::display_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("lap_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting lap-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms",
          config.host, config.port, config.tick_ms);

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), config.tick_interval()));

    // Render session changes to the log
    let display_state = Arc::clone(&state);
    tokio::spawn(async move {
        display_task(display_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start      - Start a new session");
    info!("  POST /lap        - Record a lap");
    info!("  POST /stop       - Stop the timer");
    info!("  POST /reset      - Reset a stopped timer");
    info!("  GET  /status     - Current time, laps and highlights");
    info!("  GET  /format?ms= - Format milliseconds as MM:SS,CC");
    info!("  GET  /health     - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    state.shutdown();
    info!("Server shutdown complete");
    Ok(())
}
