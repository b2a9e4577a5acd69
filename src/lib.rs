//! Obsidian Finance is a REST API for managing personal finances: income and
//! expense transactions, spending categories, recurring bills, and loans.
//!
//! Every resource belongs to exactly one user. Requests are authenticated
//! with a JWT bearer token and all reads and writes are scoped to the
//! authenticated user.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod analytics;
mod auth;
mod bill;
mod category;
mod database_id;
mod db;
mod endpoints;
mod error;
mod loan;
mod password;
mod routing;
mod state;
#[cfg(test)]
mod test_utils;
mod transaction;
mod user;

pub use database_id::DatabaseID;
pub use db::initialize as initialize_db;
pub use error::Error;
pub use password::PasswordHash;
pub use routing::build_router;
pub use state::AppState;
pub use user::{User, UserID};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
