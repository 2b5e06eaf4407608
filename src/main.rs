use std::time::Duration;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use textbin::{api::create_router, ApplicationBuilder, Config};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    }
}

/// Resolves on SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for ctrl-c: {}", e);
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
                warn!("Failed to listen for SIGTERM: {}", e);
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
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting textbin service");

    // Load configuration
    let config = Config::from_env()?;
    config.validate()?;
    info!(backend = %config.store_backend, "Configuration loaded and validated");

    // Connect and migrate before binding; failures here are fatal
    let builder = ApplicationBuilder::new(config.clone()).with_store().await?;
    let store = builder.store().ok_or("Document store not initialized")?;

    let root_token = CancellationToken::new();
    let state = builder.build(root_token.clone())?;
    let app = create_router(state, &config);

    info!("Listening on {}", config.listen_addr);
    let listener = TcpListener::bind(&config.listen_addr).await?;

    let stop_accepting = CancellationToken::new();
    let server = {
        let stop = stop_accepting.clone();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { stop.cancelled().await })
                .await
        })
    };

    shutdown_signal().await;
    info!("Shutdown signal received, draining connections");
    stop_accepting.cancel();

    let grace = Duration::from_secs(config.shutdown_grace_secs);
    let abort = server.abort_handle();
    match tokio::time::timeout(grace, server).await {
        Ok(Ok(Ok(()))) => info!("Server drained"),
        Ok(Ok(Err(e))) => warn!("Server exited with error: {}", e),
        Ok(Err(e)) => warn!("Server task failed: {}", e),
        Err(_) => {
            warn!(
                "Requests still in flight after {:?}, cancelling them",
                grace
            );
            root_token.cancel();
            abort.abort();
        }
    }

    match tokio::time::timeout(grace, store.close()).await {
        Ok(Ok(())) => info!(backend = store.backend_name(), "Document store closed"),
        Ok(Err(e)) => warn!("Failed to close document store: {}", e),
        Err(_) => warn!("Timed out closing document store after {:?}", grace),
    }

    info!("Shutdown complete");
    Ok(())
}
