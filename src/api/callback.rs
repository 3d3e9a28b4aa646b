use std::collections::HashMap;

use axum::{Extension, extract::Query, response::Html};

use crate::{
    Error, Result,
    spotify::auth::{LoginOutcome, SharedCredentials},
    types::Credential,
};

/// Receives the redirect from the authorization server and exchanges the
/// code for a credential.
///
/// A denied authorization and the exchange result both end the waiting
/// login through `outcome`. Requests without `code` or `error` are answered
/// but not reported.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(credentials): Extension<SharedCredentials>,
    Extension(outcome): Extension<LoginOutcome>,
) -> Html<&'static str> {
    if let Some(reason) = params.get("error") {
        report(&outcome, Err(Error::AuthDenied(reason.clone())));
        return Html("<h4>Login denied.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let result = credentials.exchange(code).await;
    let page = match &result {
        Ok(_) => Html("<h2>Authentication successful.</h2><p>Close browser window.</p>"),
        Err(e) => {
            tracing::warn!(error = %e, "authorization code exchange failed");
            Html("<h4>Login failed.</h4>")
        }
    };
    report(&outcome, result);
    page
}

// only the first outcome counts; later callbacks find the channel full or closed
fn report(outcome: &LoginOutcome, result: Result<Credential>) {
    if outcome.try_send(result).is_err() {
        tracing::debug!("login outcome already reported");
    }
}
