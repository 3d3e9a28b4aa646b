use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    Error, Result,
    config::Config,
    management::{CredentialManager, TokenCache},
    spotify::auth::{HttpTokenEndpoint, SharedCredentials},
};

/// Spotify Web API client.
///
/// Every request asks the credential manager for a valid bearer header
/// right before it is sent, which may refresh the access token.
#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    credentials: SharedCredentials,
}

impl SpotifyClient {
    pub fn new(http: Client, api_url: impl Into<String>, credentials: SharedCredentials) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// Client for the session stored in `cache`.
    ///
    /// # Arguments
    ///
    /// * `config` - API and token URLs, client credentials and timeout
    /// * `cache` - Token cache written by `spotifeat auth`
    ///
    /// # Errors
    ///
    /// [`Error::NotAuthenticated`] when no cached credential can be read; the
    /// user has to log in.
    ///
    /// # Example
    ///
    /// ```
    /// let config = Config::from_env()?;
    /// let client = SpotifyClient::from_cache(&config, TokenCache::default_location()).await?;
    /// let me = client.current_user().await?;
    /// ```
    pub async fn from_cache(config: &Config, cache: TokenCache) -> Result<Self> {
        let http = config.http_client()?;
        let endpoint = HttpTokenEndpoint::new(config, http.clone());
        let manager = CredentialManager::load(endpoint, cache).await.map_err(|e| {
            tracing::debug!(error = %e, "no usable cached token");
            Error::NotAuthenticated
        })?;

        Ok(Self::new(http, config.api_url.clone(), Arc::new(manager)))
    }

    pub fn credentials(&self) -> &SharedCredentials {
        &self.credentials
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Starts an authorized request against `path`.
    pub(crate) async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let headers = self.credentials.authorization_header().await?;
        Ok(self.http.request(method, self.url(path)).headers(headers))
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self.request(Method::GET, path).await?.query(query).send().await?;
        handle_response(response).await
    }

    pub(crate) async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(method, path).await?.json(body).send().await?;
        handle_response(response).await
    }

    /// For endpoints answering with an empty body.
    pub(crate) async fn send_empty(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<()> {
        let response = self
            .request(method, path)
            .await?
            .query(query)
            .send()
            .await?;
        check_status(response).await.map(|_| ())
    }
}

/// Turns a non-success status into [`Error::Api`].
pub(crate) async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), %message, "request rejected");
        return Err(Error::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response)
}

pub(crate) async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = check_status(response).await?;
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
