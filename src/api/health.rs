use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::{spotify::auth::SharedCredentials, types::CredentialState};

pub async fn health(Extension(credentials): Extension<SharedCredentials>) -> Json<Value> {
    let authenticated = credentials.state().await != CredentialState::Unauthenticated;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "authenticated": authenticated,
    }))
}
