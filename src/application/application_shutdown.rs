use super::ApplicationStateToClose;
use crate::service::broker::Brokers;
use std::time::Duration;

pub async fn close(state: ApplicationStateToClose, shutdown_timeout: Duration) {
    tracing::info!("closing brokers");
    state.brokers.close();

    tracing::info!("waiting for background tasks");
    state.background_tasks.close(shutdown_timeout).await;

    tracing::info!("closing connection with database");
    state.db_pool.close().await;
}

///
/// Resolves on Ctrl+C or SIGTERM.
/// Brokers are closed right away, so open event streams finish
/// and the server does not wait for them.
///
pub async fn shutdown_signal(brokers: Brokers) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to install SIGTERM handler");
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

    tracing::info!("starting shutdown");
    brokers.close();
}
