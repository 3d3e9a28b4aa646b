//! # CLI Module
//!
//! User-facing commands. Each command loads the configuration and the cached
//! session, delegates to [`crate::spotify`], [`crate::ranking`] or
//! [`crate::discovery`], and renders the outcome with the status macros and
//! `tabled` tables. Failures end the process through [`crate::error!`].
//!
//! ```bash
//! spotifeat auth                      # log in, cache the credential
//! spotifeat top --limit 20            # aggregated top tracks
//! spotifeat top --long-weight 2       # favour all-time listening
//! spotifeat discover --genre jazz     # random jazz track
//! spotifeat discover --playlist ID    # ...and add it to a playlist
//! ```

mod auth;
mod discover;
mod follow;
mod me;
mod player;
mod playlist;
mod top;

pub use auth::auth;
pub use discover::discover;
pub use discover::genres;
pub use follow::FollowAction;
pub use follow::follow;
pub use me::me;
pub use player::devices;
pub use player::pause;
pub use playlist::playlist;
pub use top::top;

use crate::{config::Config, error, management::TokenCache, spotify::SpotifyClient};

fn load_config() -> Config {
    match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    }
}

/// Client for the cached session, or exit asking the user to log in.
async fn load_client() -> SpotifyClient {
    let config = load_config();
    match SpotifyClient::from_cache(&config, TokenCache::default_location()).await {
        Ok(client) => client,
        Err(e) => error!("Failed to load token. {}", e),
    }
}
