use std::fmt;

use crate::{
    Result,
    discovery::TrackSearch,
    spotify::SpotifyClient,
    types::{SearchResponse, Track},
};

pub const DEFAULT_SEARCH_LIMIT: u32 = 20;
pub const MAX_SEARCH_LIMIT: u32 = 50;

/// Market placeholder resolved by the API to the user's own country.
pub const MARKET_FROM_TOKEN: &str = "from_token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOperator {
    Or,
    Not,
}

impl fmt::Display for SearchOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOperator::Or => f.write_str("OR"),
            SearchOperator::Not => f.write_str("NOT"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    Track,
    Artist,
    Album,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Track => "track",
            SearchType::Artist => "artist",
            SearchType::Album => "album",
        }
    }
}

/// A `/search` request.
///
/// The free-text part supports `field:value` tokens and one trailing
/// `OR`/`NOT` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    operator: Option<(SearchOperator, String)>,
    limit: u32,
    market: String,
    kind: SearchType,
}

impl SearchQuery {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            operator: None,
            limit: DEFAULT_SEARCH_LIMIT,
            market: MARKET_FROM_TOKEN.to_string(),
            kind: SearchType::Track,
        }
    }

    /// `[("year", "1999"), ("genre", "rock")]` becomes `year:1999 genre:rock`.
    pub fn fields<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: fmt::Display,
        V: fmt::Display,
    {
        let text = pairs
            .into_iter()
            .map(|(k, v)| format!("{k}:{v}"))
            .collect::<Vec<_>>()
            .join(" ");
        Self::text(text)
    }

    pub fn operator(mut self, operator: SearchOperator, clause: impl Into<String>) -> Self {
        self.operator = Some((operator, clause.into()));
        self
    }

    /// Clamped to `1..=50`.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit.clamp(1, MAX_SEARCH_LIMIT);
        self
    }

    pub fn market(mut self, market: impl Into<String>) -> Self {
        self.market = market.into();
        self
    }

    pub fn kind(mut self, kind: SearchType) -> Self {
        self.kind = kind;
        self
    }

    /// The `q` parameter.
    pub fn q(&self) -> String {
        match &self.operator {
            Some((operator, clause)) => format!("{} {} {}", self.text, operator, clause),
            None => self.text.clone(),
        }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.q()),
            ("limit", self.limit.to_string()),
            ("market", self.market.clone()),
            ("type", self.kind.as_str().to_string()),
        ]
    }
}

impl SpotifyClient {
    /// GET /search
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        self.get("/search", &query.params()).await
    }
}

impl TrackSearch for SpotifyClient {
    async fn search_tracks(&self, query: &SearchQuery) -> Result<Vec<Option<Track>>> {
        let response = self.search(query).await?;
        Ok(response.tracks.map(|page| page.items).unwrap_or_default())
    }
}
