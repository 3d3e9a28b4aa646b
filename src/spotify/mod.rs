//! # Spotify Integration Module
//!
//! HTTP layer between spotifeat and the Spotify Web API.
//!
//! ```text
//! CLI
//!  ↓
//! SpotifyClient (resource calls)      ranking / discovery
//!  ↓                                        ↓
//! CredentialManager::ensure_valid  ←  search_tracks
//!  ↓
//! reqwest
//! ```
//!
//! ## Modules
//!
//! - [`auth`] - token endpoint (code exchange, refresh), authorization URL
//!   and the interactive login through the local callback server
//! - [`client`] - [`SpotifyClient`] and the shared request plumbing. Every
//!   request obtains its bearer header from the credential manager right
//!   before it is sent.
//! - [`me`] - profile and listening history, including the aggregated top
//!   track scores
//! - [`search`] - `/search` query builder
//! - [`resources`] - tracks, artists and albums
//! - [`playlist`] - playlist creation, track insertion and paging
//! - [`follow`] - following other users
//! - [`player`] - devices and playback
//!
//! ## Errors
//!
//! Non-success statuses become [`crate::Error::Api`], unparsable bodies
//! [`crate::Error::Json`]. Credential failures propagate unchanged from
//! [`crate::management::CredentialManager`].

pub mod auth;
pub mod client;
pub mod follow;
pub mod me;
pub mod player;
pub mod playlist;
pub mod resources;
pub mod search;

pub use client::SpotifyClient;
