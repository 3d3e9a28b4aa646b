//! spotifeat library
//!
//! Session-bound client for the Spotify Web API. It keeps an OAuth2
//! authorization-code credential fresh, scores the user's listening history
//! across three time windows and discovers random tracks through search.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local login callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration from environment variables and `.env`
//! - `discovery` - Bounded-retry random track discovery
//! - `error` - Crate-wide error taxonomy
//! - `management` - Credential lifecycle and token cache
//! - `ranking` - Multi-window preference scoring
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Table and progress helpers
//!
//! # Example
//!
//! ```
//! use spotifeat::{config, management::TokenCache, ranking::WindowWeights, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> spotifeat::Result<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     let client = SpotifyClient::from_cache(&config, TokenCache::default_location()).await?;
//!     let top = client.top_track_scores(WindowWeights::default()).await?;
//!     println!("{} scored tracks", top.scores.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod management;
pub mod ranking;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, Result};

/// Prints an informational line with a blue `o` marker.
///
/// Accepts the same arguments as `println!`.
///
/// ```
/// info!("Opening the Spotify login page...");
/// info!("Scored {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success line with a green checkmark.
///
/// ```
/// success!("Authentication successful!");
/// success!("Added {} tracks to {}", count, playlist);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error line with a red `!` to stderr and exits with status 1.
///
/// Only for command handlers: nothing after it runs.
///
/// ```
/// error!("Cannot load environment. Err: {}", e);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning line with a yellow `!` to stderr.
///
/// ```
/// warning!("Genre {} is not in the known catalog", genre);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
