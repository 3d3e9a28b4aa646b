use crate::{
    Result,
    ranking::{self, RankedList, WindowWeights},
    spotify::SpotifyClient,
    types::{Artist, Page, ScoredItem, TimeRange, Track, UserProfile},
};

/// Listening-history endpoints never return more than this many items.
pub const MAX_TOP_LIMIT: u32 = 50;

/// The three history windows with their tracks, plus the aggregate scores.
#[derive(Debug, Clone)]
pub struct TopTrackScores {
    pub scores: Vec<ScoredItem>,
    pub tracks: Vec<Track>,
}

impl TopTrackScores {
    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }
}

impl SpotifyClient {
    /// GET /me
    pub async fn current_user(&self) -> Result<UserProfile> {
        self.get("/me", &[]).await
    }

    /// GET /me/top/tracks, most preferred first.
    ///
    /// # Arguments
    ///
    /// * `time_range` - History window to rank
    /// * `limit` - Number of tracks, clamped to `1..=50`
    ///
    /// # Returns
    ///
    /// Tracks in rank order; index 0 is the most listened track.
    pub async fn top_tracks(&self, time_range: TimeRange, limit: u32) -> Result<Vec<Track>> {
        let page: Page<Track> = self
            .get(
                "/me/top/tracks",
                &[
                    ("limit", limit.clamp(1, MAX_TOP_LIMIT).to_string()),
                    ("time_range", time_range.to_string()),
                ],
            )
            .await?;
        Ok(page.items)
    }

    /// GET /me/top/artists, most preferred first.
    pub async fn top_artists(&self, time_range: TimeRange, limit: u32) -> Result<Vec<Artist>> {
        let page: Page<Artist> = self
            .get(
                "/me/top/artists",
                &[
                    ("limit", limit.clamp(1, MAX_TOP_LIMIT).to_string()),
                    ("time_range", time_range.to_string()),
                ],
            )
            .await?;
        Ok(page.items)
    }

    /// Ranked track ids for one history window.
    pub async fn top_track_ids(&self, time_range: TimeRange) -> Result<RankedList> {
        let tracks = self.top_tracks(time_range, MAX_TOP_LIMIT).await?;
        RankedList::new(tracks.into_iter().map(|t| t.id))
    }

    /// Fetches the short, medium and long term top tracks and scores them.
    ///
    /// Each window is requested at its 50 item cap and handed to
    /// [`ranking::aggregate`] with `weights`.
    ///
    /// # Returns
    ///
    /// The scores in descending order plus every track seen in any window,
    /// without duplicates, for rendering.
    ///
    /// # Errors
    ///
    /// Request errors of any window, or [`crate::Error::AggregationInput`]
    /// when the API lists a track twice in one window.
    ///
    /// # Example
    ///
    /// ```
    /// let top = client.top_track_scores(WindowWeights::default()).await?;
    /// for scored in top.scores.iter().take(10) {
    ///     println!("{} {}", scored.score, scored.item_id);
    /// }
    /// ```
    pub async fn top_track_scores(&self, weights: WindowWeights) -> Result<TopTrackScores> {
        let short = self.top_tracks(TimeRange::ShortTerm, MAX_TOP_LIMIT).await?;
        let medium = self.top_tracks(TimeRange::MediumTerm, MAX_TOP_LIMIT).await?;
        let long = self.top_tracks(TimeRange::LongTerm, MAX_TOP_LIMIT).await?;

        let ranked = |tracks: &[Track]| RankedList::new(tracks.iter().map(|t| t.id.as_str()));
        let scores = ranking::aggregate(&ranked(&short)?, &ranked(&medium)?, &ranked(&long)?, weights);

        let mut tracks = short;
        for track in medium.into_iter().chain(long) {
            if !tracks.iter().any(|t| t.id == track.id) {
                tracks.push(track);
            }
        }

        Ok(TopTrackScores { scores, tracks })
    }
}
