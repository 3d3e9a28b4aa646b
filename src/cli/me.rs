use crate::{error, info};

pub async fn me() {
    let client = super::load_client().await;

    let profile = match client.current_user().await {
        Ok(profile) => profile,
        Err(e) => error!("Cannot fetch profile: {}", e),
    };

    info!(
        "{name} ({id})",
        name = profile.display_name.as_deref().unwrap_or("-"),
        id = profile.id
    );
    if let Some(country) = profile.country {
        info!("Country: {}", country);
    }
    if let Some(product) = profile.product {
        info!("Plan: {}", product);
    }
}
