use tabled::Table;

use crate::{error, info, utils};

pub async fn playlist(playlist_id: String) {
    let client = super::load_client().await;

    let pb = utils::spinner(format!("Fetching tracks of playlist {playlist_id}..."));
    let tracks = match client.playlist_tracks(&playlist_id).await {
        Ok(tracks) => tracks,
        Err(e) => {
            pb.finish_and_clear();
            error!("Cannot fetch playlist {}: {}", playlist_id, e);
        }
    };
    pb.finish_and_clear();

    info!("{} tracks", tracks.len());
    println!("{}", Table::new(utils::track_rows(&tracks)));
}
