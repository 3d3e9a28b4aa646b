use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::{Error, Result};

/// Lifecycle state of a session's credential at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialState {
    Unauthenticated,
    AuthenticatedValid,
    AuthenticatedExpired,
}

/// OAuth2 access/refresh token pair.
///
/// Expiry is always evaluated against the current time at the point of use.
/// A missing access token counts as expired whatever `expires_at` says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub refresh_token: String,
    #[serde(default)]
    pub scope: Option<String>,
}

impl Credential {
    /// Builds the credential returned by the authorization-code exchange.
    ///
    /// # Arguments
    ///
    /// * `response` - Token endpoint payload of the `authorization_code` grant
    /// * `now` - Instant the response was received; `expires_in` counts from it
    ///
    /// # Errors
    ///
    /// - [`Error::MissingField`] when no refresh token was issued
    /// - [`Error::InvalidField`] when `expires_in` does not fit a timestamp
    pub fn from_exchange(response: TokenResponse, now: DateTime<Utc>) -> Result<Self> {
        let refresh_token = response
            .refresh_token
            .ok_or(Error::MissingField("refresh_token"))?;

        Ok(Self {
            access_token: Some(response.access_token),
            expires_at: expiry_after(now, response.expires_in)?,
            refresh_token,
            scope: response.scope,
        })
    }

    /// Returns a copy carrying the refreshed access token and expiry.
    ///
    /// The refresh token is kept as is, even if the server sent a new one.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidField`] when `expires_in` does not fit a timestamp.
    pub fn refreshed(&self, response: TokenResponse, now: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            access_token: Some(response.access_token),
            expires_at: expiry_after(now, response.expires_in)?,
            refresh_token: self.refresh_token.clone(),
            scope: response.scope.or_else(|| self.scope.clone()),
        })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.access_token.is_none() || self.expires_at <= now
    }

    pub fn state_at(&self, now: DateTime<Utc>) -> CredentialState {
        if self.is_expired_at(now) {
            CredentialState::AuthenticatedExpired
        } else {
            CredentialState::AuthenticatedValid
        }
    }
}

fn expiry_after(now: DateTime<Utc>, expires_in: u64) -> Result<DateTime<Utc>> {
    i64::try_from(expires_in)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or(Error::InvalidField("expires_in"))
}

/// Token endpoint payload for both the code exchange and the refresh grant.
///
/// A negative `expires_in` fails to deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime of `access_token` in seconds.
    pub expires_in: u64,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Historical window of the listening-history endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An item with its aggregate preference score.
///
/// Produced by [`crate::ranking::aggregate`]; higher means more preferred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredItem {
    pub item_id: String,
    pub score: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub popularity: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleAlbum {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub album_type: Option<String>,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
    #[serde(default)]
    pub album: Option<SimpleAlbum>,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub popularity: Option<u32>,
}

impl Track {
    /// Artist names joined with `, `.
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Offset-paginated list as returned by most collection endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
}

/// Search results. Entries inside a page may be `null` upstream.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub tracks: Option<Page<Option<Track>>>,
    #[serde(default)]
    pub artists: Option<Page<Option<Artist>>>,
    #[serde(default)]
    pub albums: Option<Page<Option<Album>>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistTopTracksResponse {
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelatedArtistsResponse {
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub collaborative: bool,
    #[serde(default)]
    pub snapshot_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

/// Entry of a playlist page. `track` is null for local or removed tracks.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub track: Option<Track>,
}

/// Spotify Connect device.
#[derive(Debug, Clone, Deserialize)]
pub struct Device {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub volume_percent: Option<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DevicesResponse {
    pub devices: Vec<Device>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackState {
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub progress_ms: Option<u64>,
    #[serde(default)]
    pub item: Option<Track>,
    #[serde(default)]
    pub device: Option<Device>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayRequest {
    pub uris: Vec<String>,
    pub position_ms: u64,
    pub offset: PlayOffset,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayOffset {
    pub position: u32,
}

#[derive(Tabled)]
pub struct ScoreTableRow {
    pub rank: usize,
    pub score: i64,
    pub name: String,
    pub artists: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artists: String,
    pub album: String,
    pub release: String,
}

#[derive(Tabled)]
pub struct DeviceTableRow {
    pub name: String,
    pub kind: String,
    pub active: String,
    pub volume: String,
}
