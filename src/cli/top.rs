use tabled::Table;

use crate::{error, ranking::WindowWeights, spotify::playlist::mix_playlist_name, success, utils, warning};

pub async fn top(limit: usize, weights: WindowWeights, save: bool) {
    let client = super::load_client().await;

    let pb = utils::spinner("Fetching short, medium and long term top tracks...");
    let top = match client.top_track_scores(weights).await {
        Ok(top) => top,
        Err(e) => {
            pb.finish_and_clear();
            error!("Cannot score top tracks: {}", e);
        }
    };
    pb.finish_and_clear();

    if top.scores.is_empty() {
        warning!("No listening history available yet.");
        return;
    }

    println!("{}", Table::new(utils::score_rows(&top, limit)));

    if !save {
        return;
    }

    let profile = match client.current_user().await {
        Ok(profile) => profile,
        Err(e) => error!("Cannot fetch profile: {}", e),
    };
    let name = mix_playlist_name(&[profile.display_name.as_deref().unwrap_or(&profile.id)]);
    let playlist = match client.create_playlist(&profile.id, &name, false, false).await {
        Ok(playlist) => playlist,
        Err(e) => error!("Cannot create playlist: {}", e),
    };

    let ids: Vec<String> = top
        .scores
        .iter()
        .take(limit)
        .map(|s| s.item_id.clone())
        .collect();
    match client.add_tracks(&playlist.id, &ids).await {
        Ok(_) => success!("Saved {} tracks to playlist {}", ids.len(), playlist.name),
        Err(e) => error!("Cannot add tracks to playlist {}: {}", playlist.name, e),
    }
}
