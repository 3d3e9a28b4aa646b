use std::{future::Future, sync::Arc, time::Duration};

use reqwest::Client;
use tokio::sync::mpsc;
use url::Url;

use crate::{
    Error, Result,
    config::Config,
    management::{CredentialManager, TokenCache},
    server::start_api_server,
    types::{Credential, TokenResponse},
    warning,
};

/// Credential manager shared between the callback server and the CLI.
pub type SharedCredentials = Arc<CredentialManager<HttpTokenEndpoint>>;

/// Channel on which the callback handler reports the login result.
pub type LoginOutcome = mpsc::Sender<Result<Credential>>;

/// The two grants of the authorization server's token endpoint.
pub trait TokenEndpoint: Send + Sync {
    /// `grant_type=authorization_code`. A non-success status is reported as
    /// [`Error::AuthExchange`].
    fn exchange_code(&self, code: &str) -> impl Future<Output = Result<TokenResponse>> + Send;

    /// `grant_type=refresh_token`. A non-success status is reported as
    /// [`Error::TokenRefresh`].
    fn refresh(&self, refresh_token: &str) -> impl Future<Output = Result<TokenResponse>> + Send;
}

impl<T: TokenEndpoint> TokenEndpoint for Arc<T> {
    fn exchange_code(&self, code: &str) -> impl Future<Output = Result<TokenResponse>> + Send {
        (**self).exchange_code(code)
    }

    fn refresh(&self, refresh_token: &str) -> impl Future<Output = Result<TokenResponse>> + Send {
        (**self).refresh(refresh_token)
    }
}

/// Token endpoint reached over HTTP with client id and secret in the form body.
#[derive(Debug, Clone)]
pub struct HttpTokenEndpoint {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl HttpTokenEndpoint {
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            client,
            token_url: config.token_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
        }
    }

    /// Posts `form` and returns the status with the raw body.
    async fn post_form(&self, form: &[(&str, &str)]) -> Result<(reqwest::StatusCode, String)> {
        let response = self
            .client
            .post(&self.token_url)
            .form(form)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

impl TokenEndpoint for HttpTokenEndpoint {
    async fn exchange_code(&self, code: &str) -> Result<TokenResponse> {
        let (status, body) = self
            .post_form(&[
                ("code", code),
                ("grant_type", "authorization_code"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .await?;

        if !status.is_success() {
            return Err(Error::AuthExchange {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse> {
        let (status, body) = self
            .post_form(&[
                ("grant_type", "refresh_token"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", refresh_token),
            ])
            .await?;

        if !status.is_success() {
            return Err(Error::TokenRefresh {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Builds the URL the user opens to grant access.
///
/// Carries `response_type=code`, `redirect_uri`, `show_dialog=true`, `scope`
/// and `client_id`.
pub fn authorize_url(config: &Config) -> Result<Url> {
    Url::parse_with_params(
        &config.auth_url,
        &[
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("show_dialog", "true"),
            ("scope", config.scope.as_str()),
            ("client_id", config.client_id.as_str()),
        ],
    )
    .map_err(|e| Error::Config(format!("invalid SPOTIFY_API_AUTH_URL: {e}")))
}

/// How long [`login`] waits for the browser round trip.
pub const LOGIN_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs the interactive authorization-code login.
///
/// 1. Starts the local callback server
/// 2. Opens the authorization URL in the browser
/// 3. Waits for the callback to report the outcome of the code exchange
///
/// The resulting credential is written to `cache`.
///
/// # Arguments
///
/// * `config` - Client credentials, redirect URI and server address
/// * `cache` - Where the credential is persisted once exchanged
///
/// # Errors
///
/// - [`Error::AuthExchange`] when the token endpoint rejects the code
/// - [`Error::AuthDenied`] when the user declines the authorization
/// - [`Error::LoginTimeout`] when no callback arrives within [`LOGIN_TIMEOUT`]
/// - [`Error::Io`] when the callback server cannot bind its address
///
/// # Example
///
/// ```
/// let config = Config::from_env()?;
/// let credential = login(&config, TokenCache::default_location()).await?;
/// println!("valid until {}", credential.expires_at);
/// ```
pub async fn login(config: &Config, cache: TokenCache) -> Result<Credential> {
    let endpoint = HttpTokenEndpoint::new(config, config.http_client()?);
    let credentials: SharedCredentials = Arc::new(CredentialManager::new(endpoint).with_cache(cache));
    let (outcome, mut outcome_rx) = mpsc::channel(1);

    let server = start_api_server(&config.server_addr, Arc::clone(&credentials), outcome).await?;

    let auth_url = authorize_url(config)?;
    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let result = wait_for_login(&mut outcome_rx, LOGIN_TIMEOUT).await;
    server.abort();

    result
}

/// Waits for the first outcome reported by the callback handler.
///
/// Returns the exchanged credential, or the exchange error unchanged.
///
/// # Errors
///
/// [`Error::LoginTimeout`] when nothing is reported within `max_wait` or
/// the server went away before reporting.
pub async fn wait_for_login(
    outcome: &mut mpsc::Receiver<Result<Credential>>,
    max_wait: Duration,
) -> Result<Credential> {
    match tokio::time::timeout(max_wait, outcome.recv()).await {
        Ok(Some(result)) => result,
        Ok(None) | Err(_) => Err(Error::LoginTimeout(max_wait.as_secs())),
    }
}
