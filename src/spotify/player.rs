use reqwest::{Method, StatusCode};

use crate::{
    Result,
    spotify::{
        SpotifyClient,
        client::{check_status, handle_response},
        playlist::track_uri,
    },
    types::{Device, DevicesResponse, PlayOffset, PlayRequest, PlaybackState},
};

impl SpotifyClient {
    /// GET /me/player/devices
    pub async fn devices(&self) -> Result<Vec<Device>> {
        let response: DevicesResponse = self.get("/me/player/devices", &[]).await?;
        Ok(response.devices)
    }

    /// GET /me/player. `None` when nothing is playing.
    pub async fn playback_state(&self) -> Result<Option<PlaybackState>> {
        let response = self.request(Method::GET, "/me/player").await?.send().await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        handle_response(response).await.map(Some)
    }

    /// PUT /me/player/play
    pub async fn play_track(&self, track_id: &str, offset: u32, position_ms: u64) -> Result<()> {
        let body = PlayRequest {
            uris: vec![track_uri(track_id)],
            position_ms,
            offset: PlayOffset { position: offset },
        };
        let response = self
            .request(Method::PUT, "/me/player/play")
            .await?
            .json(&body)
            .send()
            .await?;
        check_status(response).await.map(|_| ())
    }

    /// PUT /me/player/pause
    pub async fn pause(&self) -> Result<()> {
        self.send_empty(Method::PUT, "/me/player/pause", &[]).await
    }
}
