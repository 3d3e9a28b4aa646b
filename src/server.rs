use std::{net::SocketAddr, str::FromStr};

use axum::{Extension, Router, routing::get};
use tokio::task::JoinHandle;

use crate::{
    Error, Result, api,
    spotify::auth::{LoginOutcome, SharedCredentials},
};

/// Routes of the login server.
///
/// - `/callback` exchanges the authorization code through `credentials` and
///   reports the result on `outcome`
/// - `/health` reports status, version and whether a credential is installed
pub fn callback_router(credentials: SharedCredentials, outcome: LoginOutcome) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .layer(Extension(credentials))
        .layer(Extension(outcome))
}

/// Binds the OAuth callback server and serves it in the background.
///
/// Binding happens before returning so an occupied port fails the login
/// immediately instead of after the callback timeout.
///
/// # Arguments
///
/// * `addr` - Socket address such as `127.0.0.1:8888`
/// * `credentials` - Manager that performs the code exchange
/// * `outcome` - Channel receiving the login result
///
/// # Errors
///
/// [`Error::Config`] for an unparsable address, [`Error::Io`] when binding
/// fails.
pub async fn start_api_server(
    addr: &str,
    credentials: SharedCredentials,
    outcome: LoginOutcome,
) -> Result<JoinHandle<()>> {
    let app = callback_router(credentials, outcome);

    let addr = SocketAddr::from_str(addr)
        .map_err(|e| Error::Config(format!("Failed to parse server address {addr}: {e}")))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::debug!(%addr, "callback server listening");

    Ok(tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "callback server stopped");
        }
    }))
}
