use crate::{
    Result,
    spotify::SpotifyClient,
    types::{Album, Artist, ArtistTopTracksResponse, Page, RelatedArtistsResponse, Track},
};

impl SpotifyClient {
    /// GET /tracks/{id}, optionally relinked for `market`.
    pub async fn track(&self, id: &str, market: Option<&str>) -> Result<Track> {
        let query: Vec<(&str, String)> = market
            .map(|m| vec![("market", m.to_string())])
            .unwrap_or_default();
        self.get(&format!("/tracks/{id}"), &query).await
    }

    /// GET /artists/{id}
    pub async fn artist(&self, id: &str) -> Result<Artist> {
        self.get(&format!("/artists/{id}"), &[]).await
    }

    /// GET /albums/{id}
    pub async fn album(&self, id: &str) -> Result<Album> {
        self.get(&format!("/albums/{id}"), &[]).await
    }

    /// GET /artists/{id}/top-tracks
    pub async fn artist_top_tracks(&self, id: &str, country: &str) -> Result<Vec<Track>> {
        let response: ArtistTopTracksResponse = self
            .get(
                &format!("/artists/{id}/top-tracks"),
                &[("country", country.to_string())],
            )
            .await?;
        Ok(response.tracks)
    }

    /// GET /artists/{id}/albums, first 50.
    pub async fn artist_albums(&self, id: &str) -> Result<Vec<Album>> {
        let page: Page<Album> = self
            .get(
                &format!("/artists/{id}/albums"),
                &[("limit", "50".to_string())],
            )
            .await?;
        Ok(page.items)
    }

    /// GET /artists/{id}/related-artists
    pub async fn related_artists(&self, id: &str) -> Result<Vec<Artist>> {
        let response: RelatedArtistsResponse = self
            .get(&format!("/artists/{id}/related-artists"), &[])
            .await?;
        Ok(response.artists)
    }
}
