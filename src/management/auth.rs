use std::path::PathBuf;

use chrono::Utc;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tokio::sync::Mutex;

use crate::{
    Error, Result, config,
    spotify::auth::TokenEndpoint,
    types::{Credential, CredentialState},
};

/// Derives the bearer header for a credential.
///
/// Pure: it never refreshes. Call it with the credential returned by
/// [`CredentialManager::ensure_valid`].
pub fn header_for(credential: &Credential) -> Result<HeaderMap> {
    let token = credential
        .access_token
        .as_deref()
        .ok_or(Error::NotAuthenticated)?;
    let value =
        HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| Error::InvalidHeader)?;

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

/// JSON file holding the session credential between runs.
///
/// The manager writes through to it after every exchange and refresh and
/// deletes it when a refresh is rejected, so the file always mirrors the
/// in-memory credential.
///
/// # Example
///
/// ```
/// let cache = TokenCache::default_location();
/// let credential = cache.load().await?;
/// println!("token expires at {}", credential.expires_at);
/// ```
#[derive(Debug, Clone)]
pub struct TokenCache {
    path: PathBuf,
}

impl TokenCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<data>/spotifeat/cache/token.json`
    pub fn default_location() -> Self {
        let mut path = config::data_dir();
        path.push("cache/token.json");
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Reads the cached credential.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] when the file is missing or unreadable, [`Error::Json`]
    /// when it does not hold a credential.
    pub async fn load(&self) -> Result<Credential> {
        let content = async_fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Writes `credential` as pretty JSON, creating parent directories.
    ///
    /// # Arguments
    ///
    /// * `credential` - The credential to store, replacing any previous one
    pub async fn persist(&self, credential: &Credential) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(credential)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Deletes the cache file. A missing file is not an error.
    pub async fn clear(&self) -> Result<()> {
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Single owner and writer of the session credential.
///
/// The credential sits behind an async mutex that is held across the
/// staleness check and the refresh, so concurrent callers observing the same
/// expired token trigger exactly one refresh. A refresh either replaces the
/// credential as a whole or, when rejected, removes it.
pub struct CredentialManager<E> {
    endpoint: E,
    credential: Mutex<Option<Credential>>,
    cache: Option<TokenCache>,
}

impl<E: TokenEndpoint> CredentialManager<E> {
    /// Unauthenticated manager; [`exchange`](Self::exchange) logs it in.
    pub fn new(endpoint: E) -> Self {
        Self {
            endpoint,
            credential: Mutex::new(None),
            cache: None,
        }
    }

    pub fn with_credential(endpoint: E, credential: Credential) -> Self {
        Self {
            endpoint,
            credential: Mutex::new(Some(credential)),
            cache: None,
        }
    }

    /// Writes the credential through to `cache` after every change.
    pub fn with_cache(mut self, cache: TokenCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Restores a manager from the token cache.
    ///
    /// The restored manager keeps writing through to `cache`.
    ///
    /// # Errors
    ///
    /// Whatever [`TokenCache::load`] reports; callers usually treat it as
    /// "not logged in".
    pub async fn load(endpoint: E, cache: TokenCache) -> Result<Self> {
        let credential = cache.load().await?;
        Ok(Self::with_credential(endpoint, credential).with_cache(cache))
    }

    /// Trades a single-use authorization code for a credential and installs
    /// it. This is the only way out of the unauthenticated state.
    ///
    /// # Errors
    ///
    /// [`Error::AuthExchange`] when the code is rejected. Not retried.
    pub async fn exchange(&self, authorization_code: &str) -> Result<Credential> {
        let response = self.endpoint.exchange_code(authorization_code).await?;
        let credential = Credential::from_exchange(response, Utc::now())?;

        let mut slot = self.credential.lock().await;
        *slot = Some(credential.clone());
        self.write_through(&credential).await;
        tracing::debug!(expires_at = %credential.expires_at, "authorization code exchanged");

        Ok(credential)
    }

    /// Returns a credential that is safe to send right now.
    ///
    /// The stored credential is returned untouched when its access token is
    /// present and expires strictly in the future. Otherwise it is refreshed
    /// with the refresh token first. Must be called before every authorized
    /// resource request.
    ///
    /// # Errors
    ///
    /// - [`Error::NotAuthenticated`] when no login has happened yet
    /// - [`Error::TokenRefresh`] when the refresh grant is rejected; the
    ///   credential is dropped and a fresh login is required
    /// - transport errors leave the stored credential unchanged
    pub async fn ensure_valid(&self) -> Result<Credential> {
        let mut slot = self.credential.lock().await;

        let refresh_token = match slot.as_ref() {
            None => return Err(Error::NotAuthenticated),
            Some(current) if !current.is_expired_at(Utc::now()) => return Ok(current.clone()),
            Some(current) => {
                tracing::debug!(
                    expires_at = %current.expires_at,
                    has_access_token = current.access_token.is_some(),
                    "access token stale, refreshing"
                );
                current.refresh_token.clone()
            }
        };

        match self.endpoint.refresh(&refresh_token).await {
            Ok(response) => {
                let refreshed = match slot.as_ref() {
                    Some(current) => current.refreshed(response, Utc::now())?,
                    None => return Err(Error::NotAuthenticated),
                };
                *slot = Some(refreshed.clone());
                self.write_through(&refreshed).await;
                Ok(refreshed)
            }
            Err(err @ Error::TokenRefresh { .. }) => {
                tracing::warn!(error = %err, "refresh token rejected, dropping credential");
                *slot = None;
                if let Some(cache) = &self.cache {
                    if let Err(e) = cache.clear().await {
                        tracing::warn!(error = %e, "failed to clear token cache");
                    }
                }
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// `Authorization: Bearer <token>` for a credential validated in the same
    /// call.
    ///
    /// # Errors
    ///
    /// Same as [`ensure_valid`](Self::ensure_valid).
    ///
    /// # Example
    ///
    /// ```
    /// let headers = manager.authorization_header().await?;
    /// let response = http.get(url).headers(headers).send().await?;
    /// ```
    pub async fn authorization_header(&self) -> Result<HeaderMap> {
        let credential = self.ensure_valid().await?;
        header_for(&credential)
    }

    /// Snapshot of the stored credential without any refresh.
    pub async fn current(&self) -> Option<Credential> {
        self.credential.lock().await.clone()
    }

    pub async fn state(&self) -> CredentialState {
        match self.credential.lock().await.as_ref() {
            None => CredentialState::Unauthenticated,
            Some(credential) => credential.state_at(Utc::now()),
        }
    }

    async fn write_through(&self, credential: &Credential) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.persist(credential).await {
                tracing::warn!(path = %cache.path().display(), error = %e, "failed to save token to cache");
            }
        }
    }
}
