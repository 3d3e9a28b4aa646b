use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    routing::{get, post},
};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use spotifeat::config::Config;
use spotifeat::management::CredentialManager;
use spotifeat::server::callback_router;
use spotifeat::spotify::SpotifyClient;
use spotifeat::spotify::auth::{HttpTokenEndpoint, SharedCredentials, TokenEndpoint, wait_for_login};
use spotifeat::types::{Credential, CredentialState};
use spotifeat::Error;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// Requests seen by the stand-in Spotify server.
#[derive(Default)]
struct Recorded {
    forms: Mutex<Vec<HashMap<String, String>>>,
    bearers: Mutex<Vec<String>>,
    offsets: Mutex<Vec<usize>>,
}

type Shared = Arc<Recorded>;

async fn token(
    State(recorded): State<Shared>,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    recorded.forms.lock().unwrap().push(form.clone());

    let rejected = form.get("code").is_some_and(|c| c == "used-code")
        || form.get("refresh_token").is_some_and(|t| t == "revoked");
    if rejected {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant" })),
        );
    }

    let access_token = match form.get("grant_type").map(String::as_str) {
        Some("refresh_token") => "refreshed-token",
        _ => "exchanged-token",
    };
    (
        StatusCode::OK,
        Json(json!({
            "access_token": access_token,
            "token_type": "Bearer",
            "expires_in": 3600,
            "refresh_token": "issued-refresh",
            "scope": "user-top-read",
        })),
    )
}

async fn me(State(recorded): State<Shared>, headers: HeaderMap) -> Json<Value> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    recorded.bearers.lock().unwrap().push(bearer);
    Json(json!({ "id": "alice", "display_name": "Alice" }))
}

async fn player() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn missing_track() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "non existing id")
}

fn playlist_track(id: &str) -> Value {
    json!({ "track": { "id": id, "name": format!("Track {id}"), "uri": format!("spotify:track:{id}") } })
}

async fn playlist_tracks(
    State(recorded): State<Shared>,
    Path(_id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let offset: usize = query
        .get("offset")
        .and_then(|o| o.parse().ok())
        .unwrap_or_default();
    recorded.offsets.lock().unwrap().push(offset);

    let items = match offset {
        0 => vec![playlist_track("t0"), playlist_track("t1")],
        2 => vec![json!({ "track": null })],
        _ => Vec::new(),
    };
    Json(json!({ "items": items, "total": 3 }))
}

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn spotify_stub() -> (Config, Shared) {
    let recorded = Shared::default();
    let router = Router::new()
        .route("/api/token", post(token))
        .route("/v1/me", get(me))
        .route("/v1/me/player", get(player))
        .route("/v1/tracks/{id}", get(missing_track))
        .route("/v1/playlists/{id}/tracks", get(playlist_tracks))
        .with_state(Arc::clone(&recorded));
    let base = serve(router).await;

    let config = Config::from_lookup(|key| match key {
        "SPOTIFY_API_AUTH_CLIENT_ID" => Some("client-id".to_string()),
        "SPOTIFY_API_AUTH_CLIENT_SECRET" => Some("client-secret".to_string()),
        "SPOTIFY_API_REDIRECT_URI" => Some("http://127.0.0.1:8888/callback".to_string()),
        "SPOTIFY_API_TOKEN_URL" => Some(format!("{base}/api/token")),
        "SPOTIFY_API_URL" => Some(format!("{base}/v1")),
        _ => None,
    })
    .unwrap();

    (config, recorded)
}

fn endpoint(config: &Config) -> HttpTokenEndpoint {
    HttpTokenEndpoint::new(config, config.http_client().unwrap())
}

fn expired_credential(refresh_token: &str) -> Credential {
    Credential {
        access_token: Some("stale".to_string()),
        expires_at: Utc::now() - Duration::seconds(1),
        refresh_token: refresh_token.to_string(),
        scope: None,
    }
}

fn client_with(config: &Config, credential: Credential) -> SpotifyClient {
    let manager = CredentialManager::with_credential(endpoint(config), credential);
    SpotifyClient::new(
        config.http_client().unwrap(),
        config.api_url.clone(),
        Arc::new(manager),
    )
}

fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn test_exchange_posts_authorization_code_grant() {
    let (config, recorded) = spotify_stub().await;

    let response = endpoint(&config).exchange_code("fresh-code").await.unwrap();

    assert_eq!(response.access_token, "exchanged-token");
    assert_eq!(response.expires_in, 3600);
    assert_eq!(response.refresh_token.as_deref(), Some("issued-refresh"));
    assert_eq!(
        recorded.forms.lock().unwrap()[0],
        form(&[
            ("code", "fresh-code"),
            ("grant_type", "authorization_code"),
            ("client_id", "client-id"),
            ("client_secret", "client-secret"),
            ("redirect_uri", "http://127.0.0.1:8888/callback"),
        ])
    );
}

#[tokio::test]
async fn test_rejected_code_is_an_exchange_error() {
    let (config, _) = spotify_stub().await;

    let err = endpoint(&config).exchange_code("used-code").await.unwrap_err();

    match err {
        Error::AuthExchange { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("invalid_grant"));
        }
        other => panic!("expected AuthExchange, got {other:?}"),
    }
}

#[tokio::test]
async fn test_refresh_posts_refresh_token_grant() {
    let (config, recorded) = spotify_stub().await;

    let response = endpoint(&config).refresh("r-1").await.unwrap();

    assert_eq!(response.access_token, "refreshed-token");
    assert_eq!(
        recorded.forms.lock().unwrap()[0],
        form(&[
            ("grant_type", "refresh_token"),
            ("client_id", "client-id"),
            ("client_secret", "client-secret"),
            ("refresh_token", "r-1"),
        ])
    );
}

#[tokio::test]
async fn test_rejected_refresh_is_a_refresh_error() {
    let (config, _) = spotify_stub().await;

    let err = endpoint(&config).refresh("revoked").await.unwrap_err();

    assert!(matches!(err, Error::TokenRefresh { status: 400, .. }));
}

#[tokio::test]
async fn test_client_refreshes_before_sending_bearer() {
    let (config, recorded) = spotify_stub().await;
    let client = client_with(&config, expired_credential("r-1"));

    let profile = client.current_user().await.unwrap();
    client.current_user().await.unwrap();

    assert_eq!(profile.id, "alice");
    assert_eq!(
        *recorded.bearers.lock().unwrap(),
        vec!["Bearer refreshed-token", "Bearer refreshed-token"]
    );
    // the second request reuses the refreshed token
    assert_eq!(recorded.forms.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_revoked_refresh_blocks_request() {
    let (config, recorded) = spotify_stub().await;
    let client = client_with(&config, expired_credential("revoked"));

    let err = client.current_user().await.unwrap_err();

    assert!(matches!(err, Error::TokenRefresh { status: 400, .. }));
    assert!(recorded.bearers.lock().unwrap().is_empty());
    assert_eq!(
        client.credentials().state().await,
        CredentialState::Unauthenticated
    );
}

#[tokio::test]
async fn test_no_content_playback_state_is_none() {
    let (config, _) = spotify_stub().await;
    let client = client_with(&config, expired_credential("r-1"));

    assert!(client.playback_state().await.unwrap().is_none());
}

#[tokio::test]
async fn test_api_rejection_is_an_api_error() {
    let (config, _) = spotify_stub().await;
    let client = client_with(&config, expired_credential("r-1"));

    let err = client.track("nope", None).await.unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "non existing id");
        }
        other => panic!("expected Api, got {other:?}"),
    }
}

#[tokio::test]
async fn test_playlist_tracks_page_until_empty() {
    let (config, recorded) = spotify_stub().await;
    let client = client_with(&config, expired_credential("r-1"));

    let tracks = client.playlist_tracks("p1").await.unwrap();

    let ids: Vec<&str> = tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["t0", "t1"]);
    assert_eq!(*recorded.offsets.lock().unwrap(), vec![0, 2, 3]);
}

/// Serves the login callback against the stub token endpoint.
async fn login_server(config: &Config) -> (String, SharedCredentials, mpsc::Receiver<spotifeat::Result<Credential>>) {
    let credentials: SharedCredentials = Arc::new(CredentialManager::new(endpoint(config)));
    let (outcome, outcome_rx) = mpsc::channel(1);
    let base = serve(callback_router(Arc::clone(&credentials), outcome)).await;
    (base, credentials, outcome_rx)
}

#[tokio::test]
async fn test_login_reports_exchanged_credential() {
    let (config, _) = spotify_stub().await;
    let (base, credentials, mut outcome) = login_server(&config).await;

    let page = reqwest::get(format!("{base}/callback?code=fresh-code"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let credential = wait_for_login(&mut outcome, StdDuration::from_secs(5))
        .await
        .unwrap();

    assert!(page.contains("Authentication successful"));
    assert_eq!(credential.access_token.as_deref(), Some("exchanged-token"));
    assert_eq!(credentials.current().await, Some(credential));
}

#[tokio::test]
async fn test_login_surfaces_rejected_exchange() {
    let (config, _) = spotify_stub().await;
    let (base, credentials, mut outcome) = login_server(&config).await;

    let page = reqwest::get(format!("{base}/callback?code=used-code"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let err = wait_for_login(&mut outcome, StdDuration::from_secs(5))
        .await
        .unwrap_err();

    assert!(page.contains("Login failed"));
    assert!(matches!(err, Error::AuthExchange { status: 400, .. }));
    assert_eq!(credentials.state().await, CredentialState::Unauthenticated);
}

#[tokio::test]
async fn test_login_ends_on_denied_authorization() {
    let (config, recorded) = spotify_stub().await;
    let (base, _, mut outcome) = login_server(&config).await;

    reqwest::get(format!("{base}/callback?error=access_denied"))
        .await
        .unwrap();
    let err = wait_for_login(&mut outcome, StdDuration::from_secs(5))
        .await
        .unwrap_err();

    match err {
        Error::AuthDenied(reason) => assert_eq!(reason, "access_denied"),
        other => panic!("expected AuthDenied, got {other:?}"),
    }
    assert!(recorded.forms.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_keeps_waiting_without_code() {
    let (config, _) = spotify_stub().await;
    let (base, _, mut outcome) = login_server(&config).await;

    let page = reqwest::get(format!("{base}/callback"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let err = wait_for_login(&mut outcome, StdDuration::from_millis(100))
        .await
        .unwrap_err();

    assert!(page.contains("Missing authorization code"));
    assert!(matches!(err, Error::LoginTimeout(_)));
}
