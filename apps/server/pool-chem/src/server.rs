use crate::error::ServerError;

use common::ErrorLocation;

use std::net::SocketAddr;

use axum::Router;
use log::{info, warn};
use tokio::net::TcpListener;

/// Bind `address` and serve `router` until Ctrl-C.
pub async fn serve(router: Router, address: SocketAddr) -> Result<(), ServerError> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.to_string(),
            location: ErrorLocation::caller(),
            source,
        })?;

    info!("Pool ChemGPT listening on http://{address}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|source| ServerError::Serve {
            location: ErrorLocation::caller(),
            source,
        })?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!("Failed to listen for shutdown signal: {e}"),
    }
}
