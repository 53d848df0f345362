/**
 * itemfeed Server Entry Point
 *
 * Loads configuration, initializes tracing and serves the item API until
 * Ctrl-C or SIGTERM.
 */

use itemfeed::backend::routes::create_router;
use itemfeed::backend::server::create_state;
use itemfeed::backend::ItemUpdatesPublisher;
use itemfeed::shared::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    tracing::info!("[Startup] Server initialization started");

    let config = AppConfig::from_env()?;
    let app_state = create_state(&config).await;
    let publisher = app_state.item_updates.clone();
    let app = create_router(app_state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("[Startup] Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(publisher))
        .await?;

    tracing::info!("[Shutdown] Server stopped");
    Ok(())
}

/// Resolve on Ctrl-C or SIGTERM, closing the publisher first so that open
/// event streams finish and their connections can drain.
async fn shutdown_signal(publisher: ItemUpdatesPublisher) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("[Shutdown] Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("[Shutdown] Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("[Shutdown] Signal received, closing item streams");
    publisher.close();
}
