use rand::{SeedableRng, rngs::StdRng};

use crate::{
    discovery::{Discovery, GENRES, is_known_genre},
    error, info, success, utils, warning,
};

pub async fn discover(genre: Option<String>, attempts: u32, playlist: Option<String>, play: bool) {
    if let Some(g) = genre.as_deref() {
        if !is_known_genre(g) {
            warning!("Genre {} is not in the known catalog, searching anyway.", g);
        }
    }

    let client = super::load_client().await;

    let discovery = Discovery::new(&client).with_max_attempts(attempts);
    let mut rng = StdRng::from_os_rng();

    let pb = utils::spinner("Searching for a random track...");
    let track = match discovery.find_candidate(&mut rng, genre.as_deref()).await {
        Ok(track) => track,
        Err(e) => {
            pb.finish_and_clear();
            error!("{}", e);
        }
    };
    pb.finish_and_clear();

    success!("{} - {} ({})", track.name, track.artist_names(), track.uri);

    if let Some(playlist_id) = playlist {
        match client.add_tracks(&playlist_id, &[track.id.clone()]).await {
            Ok(_) => success!("Added to playlist {}", playlist_id),
            Err(e) => error!("Cannot add track to playlist {}: {}", playlist_id, e),
        }
    }

    if play {
        match client.play_track(&track.id, 0, 0).await {
            Ok(()) => info!("Playing {}", track.name),
            Err(e) => error!("Cannot start playback: {}", e),
        }
    }
}

pub fn genres() {
    for genre in GENRES {
        println!("{genre}");
    }
}
