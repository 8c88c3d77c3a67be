// bobbin server
// Startup: config -> store/queue/pool -> HTTP. Shutdown: HTTP first, then the pool.

use std::sync::Arc;

use anyhow::{Context, Result};
use bobbin_core::impls::{InMemoryTaskStore, SimulatedWork};
use bobbin_core::{Config, TaskQueue, TaskService, WorkerPool};
use bobbin_server::{AppState, router};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bobbin_core=info,bobbin_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("starting server...");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        addr = %config.addr,
        workers = config.workers,
        queue_capacity = config.queue_capacity,
        "configuration loaded"
    );

    let store = Arc::new(InMemoryTaskStore::new());
    let queue = Arc::new(TaskQueue::new(config.queue_capacity).context("Failed to create task queue")?);
    let executor = Arc::new(SimulatedWork::new(config.work_duration));
    let pool = WorkerPool::new(queue.clone(), store.clone(), executor)
        .with_monitor_interval(config.monitor_interval);
    let service = Arc::new(TaskService::new(store, queue));

    pool.start(config.workers)
        .await
        .context("Failed to start worker pool")?;

    let app = router(AppState::new(service));
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.addr))?;
    info!("Listening on {}", config.addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "HTTP server error");
    }
    info!("HTTP server stopped");

    match tokio::time::timeout(config.shutdown_timeout, pool.stop()).await {
        Ok(result) => result.context("Failed to stop worker pool")?,
        Err(_) => warn!(
            timeout_secs = config.shutdown_timeout.as_secs(),
            "worker pool did not stop in time"
        ),
    }

    info!("graceful shutdown complete");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
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

    info!("starting graceful shutdown...");
}
