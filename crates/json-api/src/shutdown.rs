//! Graceful shutdown on Ctrl+C or SIGTERM.

use std::{io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
#[error("failed to install {signal} handler: {source}")]
pub(crate) struct ShutdownSignalError {
    signal: &'static str,
    #[source]
    source: io::Error,
}

impl ShutdownSignalError {
    fn installing(signal: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| Self { signal, source }
    }
}

/// Wait for a termination signal, then stop accepting connections and give
/// in-flight requests up to `grace` to finish.
pub(crate) async fn listen(handle: ServerHandle, grace: Duration) -> Result<(), ShutdownSignalError> {
    let signal = wait_for_signal().await?;

    info!(signal, grace_seconds = grace.as_secs(), "shutting down");

    handle.stop_graceful(grace);

    Ok(())
}

#[cfg(unix)]
async fn wait_for_signal() -> Result<&'static str, ShutdownSignalError> {
    let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(ShutdownSignalError::installing("SIGTERM"))?;

    tokio::select! {
        result = signal::ctrl_c() => {
            result.map_err(ShutdownSignalError::installing("Ctrl+C"))?;
            Ok("SIGINT")
        }
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> Result<&'static str, ShutdownSignalError> {
    signal::ctrl_c()
        .await
        .map_err(ShutdownSignalError::installing("Ctrl+C"))?;

    Ok("Ctrl+C")
}
