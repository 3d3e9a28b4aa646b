//! Random track discovery.
//!
//! A candidate is found by searching for `year:<Y> genre:<G>` in a random
//! market and picking one result at random. Empty or malformed result sets
//! are answered with a fresh random query, up to a fixed number of attempts.

use std::{future::Future, ops::RangeInclusive};

use rand::{Rng, seq::IndexedRandom};

use crate::{Error, Result, spotify::search::SearchQuery, types::Track};

/// Genre tags accepted by the search `genre:` filter.
pub const GENRES: &[&str] = &[
    "acoustic", "afrobeat", "alt-rock", "alternative", "ambient", "anime", "black-metal",
    "bluegrass", "blues", "bossanova", "brazil", "breakbeat", "british", "cantopop",
    "chicago-house", "children", "chill", "classical", "club", "comedy", "country", "dance",
    "dancehall", "death-metal", "deep-house", "detroit-techno", "disco", "disney",
    "drum-and-bass", "dub", "dubstep", "edm", "electro", "electronic", "emo", "folk", "forro",
    "french", "funk", "garage", "german", "gospel", "goth", "grindcore", "groove", "grunge",
    "guitar", "happy", "hard-rock", "hardcore", "hardstyle", "heavy-metal", "hip-hop",
    "holidays", "honky-tonk", "house", "idm", "indian", "indie", "indie-pop", "industrial",
    "iranian", "j-dance", "j-idol", "j-pop", "j-rock", "jazz", "k-pop", "kids", "latin",
    "latino", "malay", "mandopop", "metal", "metal-misc", "metalcore", "minimal-techno",
    "movies", "mpb", "new-age", "new-release", "opera", "pagode", "party", "philippines-opm",
    "piano", "pop", "pop-film", "post-dubstep", "power-pop", "progressive-house", "psych-rock",
    "punk", "punk-rock", "r-n-b", "rainy-day", "reggae", "reggaeton", "road-trip", "rock",
    "rock-n-roll", "rockabilly", "romance", "sad", "salsa", "samba", "sertanejo", "show-tunes",
    "singer-songwriter", "ska", "sleep", "songwriter", "soul", "soundtracks", "spanish",
    "study", "summer", "swedish", "synth-pop", "tango", "techno", "trance", "trip-hop",
    "turkish", "work-out", "world-music",
];

/// Markets a random query may target.
pub const MARKETS: &[&str] = &["US"];

pub const FIRST_YEAR: i32 = 1970;
pub const LAST_YEAR: i32 = 2020;

/// Results requested per query.
pub const RESULT_WINDOW: u32 = 50;

/// With an explicit genre only the top of the result window is eligible.
pub const GENRE_SUB_WINDOW: usize = 10;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

pub fn is_known_genre(genre: &str) -> bool {
    GENRES.contains(&genre)
}

/// Search capability discovery runs against.
pub trait TrackSearch: Send + Sync {
    /// Runs `query` and returns the track result window. Entries may be
    /// `None` when upstream returned `null` in their place.
    fn search_tracks(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<Option<Track>>>> + Send;
}

impl<T: TrackSearch + ?Sized> TrackSearch for &T {
    fn search_tracks(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<Option<Track>>>> + Send {
        (**self).search_tracks(query)
    }
}

/// One randomized search. Regenerated on every attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryQuery {
    pub year: i32,
    pub genre: String,
    pub market: String,
}

impl DiscoveryQuery {
    /// Draws a year from `years`, a market from `markets` and, unless one is
    /// supplied, a genre from [`GENRES`].
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        genre: Option<&str>,
        markets: &[String],
        years: &RangeInclusive<i32>,
    ) -> Self {
        let year = rng.random_range(years.clone());
        let genre = match genre {
            Some(g) => g.to_string(),
            None => GENRES.choose(rng).copied().unwrap_or("rock").to_string(),
        };
        let market = markets
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| MARKETS[0].to_string());

        Self {
            year,
            genre,
            market,
        }
    }

    pub fn to_search_query(&self) -> SearchQuery {
        SearchQuery::fields([("year", self.year.to_string()), ("genre", self.genre.clone())])
            .limit(RESULT_WINDOW)
            .market(&self.market)
    }
}

/// Picks an index into a result window of `result_len` entries.
///
/// With a fixed genre the pick is uniform over the first
/// [`GENRE_SUB_WINDOW`] entries (fewer if the window is shorter), otherwise
/// over the whole window. `None` for an empty window.
pub fn select_index<R: Rng + ?Sized>(
    rng: &mut R,
    result_len: usize,
    genre_fixed: bool,
) -> Option<usize> {
    let window = if genre_fixed {
        result_len.min(GENRE_SUB_WINDOW)
    } else {
        result_len
    };

    if window == 0 {
        None
    } else {
        Some(rng.random_range(0..window))
    }
}

/// Bounded-retry random discovery over a [`TrackSearch`].
pub struct Discovery<S> {
    search: S,
    max_attempts: u32,
    markets: Vec<String>,
    years: RangeInclusive<i32>,
}

impl<S: TrackSearch> Discovery<S> {
    pub fn new(search: S) -> Self {
        Self {
            search,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            markets: MARKETS.iter().map(|m| m.to_string()).collect(),
            years: FIRST_YEAR..=LAST_YEAR,
        }
    }

    /// Caps the number of queries. At least one query is always issued.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Replaces the market allow-list. An empty list is ignored.
    pub fn with_markets<I, T>(mut self, markets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let markets: Vec<String> = markets.into_iter().map(Into::into).collect();
        if !markets.is_empty() {
            self.markets = markets;
        }
        self
    }

    pub fn with_years(mut self, years: RangeInclusive<i32>) -> Self {
        if !years.is_empty() {
            self.years = years;
        }
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Finds a random track, optionally restricted to `genre`.
    ///
    /// Every attempt draws a fresh year and market (and genre, when none was
    /// given). Empty windows, `null` picks and rejected or unparsable search
    /// responses count as failed attempts.
    ///
    /// # Errors
    ///
    /// - [`Error::DiscoveryExhausted`] after `max_attempts` failed attempts
    /// - credential and transport errors are returned as soon as they occur
    pub async fn find_candidate<R: Rng + Send + ?Sized>(
        &self,
        rng: &mut R,
        genre: Option<&str>,
    ) -> Result<Track> {
        for attempt in 1..=self.max_attempts {
            let query = DiscoveryQuery::random(rng, genre, &self.markets, &self.years);

            let results = match self.search.search_tracks(&query.to_search_query()).await {
                Ok(results) => results,
                Err(e) if e.is_discovery_retryable() => {
                    tracing::debug!(attempt, error = %e, "search failed, trying a new random query");
                    continue;
                }
                Err(e) => return Err(e),
            };

            let picked = select_index(rng, results.len(), genre.is_some())
                .and_then(|index| results.get(index))
                .and_then(Option::as_ref);

            match picked {
                Some(track) => {
                    tracing::debug!(attempt, year = query.year, genre = %query.genre, track = %track.id, "candidate found");
                    return Ok(track.clone());
                }
                None => {
                    tracing::debug!(
                        attempt,
                        year = query.year,
                        genre = %query.genre,
                        market = %query.market,
                        results = results.len(),
                        "no usable result, trying a new random query"
                    );
                }
            }
        }

        Err(Error::DiscoveryExhausted {
            attempts: self.max_attempts,
        })
    }
}
