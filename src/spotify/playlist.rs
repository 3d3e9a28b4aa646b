use reqwest::Method;

use crate::{
    Result,
    spotify::SpotifyClient,
    types::{
        AddTracksRequest, CreatePlaylistRequest, Page, Playlist, PlaylistItem, SnapshotResponse,
        Track,
    },
};

/// Tracks added per request; the API rejects larger batches.
pub const ADD_TRACKS_BATCH: usize = 100;

/// `SpotiFeat Mix alice ft. bob`
pub fn mix_playlist_name<S: AsRef<str>>(users: &[S]) -> String {
    let names = users.iter().map(|u| u.as_ref()).collect::<Vec<_>>();
    format!("SpotiFeat Mix {}", names.join(" ft. "))
}

pub fn track_uri(id: &str) -> String {
    format!("spotify:track:{id}")
}

impl SpotifyClient {
    /// POST /users/{user_id}/playlists
    ///
    /// # Arguments
    ///
    /// * `user_id` - Owner of the new playlist, normally the current user
    /// * `name` - Display name, see [`mix_playlist_name`]
    /// * `public` - Whether it shows on the user's profile
    /// * `collaborative` - Whether followers may edit it; requires `public = false`
    pub async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
        collaborative: bool,
    ) -> Result<Playlist> {
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            public,
            collaborative,
        };
        self.send_json(Method::POST, &format!("/users/{user_id}/playlists"), &body)
            .await
    }

    /// POST /playlists/{id}/tracks in batches of [`ADD_TRACKS_BATCH`].
    ///
    /// Ids are turned into `spotify:track:<id>` URIs.
    ///
    /// # Returns
    ///
    /// The snapshot id of the last batch, `None` when `track_ids` is empty.
    pub async fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<Option<String>> {
        let mut snapshot = None;
        for batch in track_ids.chunks(ADD_TRACKS_BATCH) {
            let body = AddTracksRequest {
                uris: batch.iter().map(|id| track_uri(id)).collect(),
            };
            let response: SnapshotResponse = self
                .send_json(Method::POST, &format!("/playlists/{playlist_id}/tracks"), &body)
                .await?;
            snapshot = Some(response.snapshot_id);
        }
        Ok(snapshot)
    }

    /// GET /playlists/{id}/tracks, following offsets until an empty page.
    pub async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<Track>> {
        let path = format!("/playlists/{playlist_id}/tracks");
        let mut tracks = Vec::new();
        let mut offset = 0usize;

        loop {
            let page: Page<PlaylistItem> = self
                .get(&path, &[("offset", offset.to_string())])
                .await?;
            if page.items.is_empty() {
                break;
            }

            offset += page.items.len();
            tracks.extend(page.items.into_iter().filter_map(|item| item.track));
            tracing::debug!(playlist_id, fetched = offset, "playlist page fetched");
        }

        Ok(tracks)
    }
}
