use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use showyo_worker::sweeper::{Sweeper, DEFAULT_SWEEP_INTERVAL_SECS};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "showyo_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = showyo_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    showyo_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database connection established");

    let interval_secs: u64 = std::env::var("SWEEP_INTERVAL_SECS")
        .unwrap_or_else(|_| DEFAULT_SWEEP_INTERVAL_SECS.to_string())
        .parse()
        .expect("SWEEP_INTERVAL_SECS must be a valid u64");
    tracing::info!(interval_secs, "Starting expiry sweeper");

    let cancel = CancellationToken::new();
    let sweeper = Sweeper::new(pool, Duration::from_secs(interval_secs));

    let loop_cancel = cancel.clone();
    let handle = tokio::spawn(async move {
        sweeper.run(loop_cancel).await;
    });

    shutdown_signal().await;
    cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    tracing::info!("Expiry sweeper stopped");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the worker shuts
/// down cleanly whether stopped interactively or by a process manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
