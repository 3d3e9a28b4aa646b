//! # API Module
//!
//! HTTP endpoints of the short-lived local server that completes the
//! authorization-code login.
//!
//! - [`callback`] - receives `?code=...` from the authorization server and
//!   hands it to the shared [`CredentialManager`](crate::management::CredentialManager)
//!   for the one-time exchange. `?error=...` reports a denied login.
//! - [`health`] - status, version and whether a credential is installed.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
