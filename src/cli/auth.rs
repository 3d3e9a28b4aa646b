use crate::{error, info, management::TokenCache, spotify, success};

pub async fn auth() {
    let config = super::load_config();
    let cache = TokenCache::default_location();

    info!("Identification is required. Please authorize spotifeat in your browser.");
    match spotify::auth::login(&config, cache.clone()).await {
        Ok(credential) => {
            success!(
                "Authentication successful! Token cached at {}, valid until {}",
                cache.path().display(),
                credential.expires_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
        Err(e) => error!("Authentication failed: {}", e),
    }
}
