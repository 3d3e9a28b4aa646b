mod auth;

pub use auth::CredentialManager;
pub use auth::TokenCache;
pub use auth::header_for;
