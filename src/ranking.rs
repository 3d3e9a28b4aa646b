//! Multi-window preference scoring.
//!
//! Three ranked windows (short, medium and long term listening history) are
//! folded into one score per item. An item at zero-based rank `r` in a
//! window earns `weight * (100 - r)` from that window, and the contributions
//! of every window containing it are summed. Items missing from a window
//! earn nothing there.
//!
//! Ordering is by descending score. Equal scores keep first-seen order: the
//! short window is walked first, then medium, then long, each from rank 0.

use std::collections::HashMap;

use crate::{Error, Result, types::ScoredItem};

/// Points earned by the top-ranked item of a window before weighting.
pub const RANK_CEILING: i64 = 100;

/// Ordered item identifiers, unique within the list. Position is rank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedList {
    items: Vec<String>,
}

impl RankedList {
    /// Validates that no identifier appears twice.
    ///
    /// # Errors
    ///
    /// [`Error::AggregationInput`] naming the repeated item and both ranks.
    pub fn new<I, S>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();

        let mut seen: HashMap<&str, usize> = HashMap::with_capacity(items.len());
        for (rank, id) in items.iter().enumerate() {
            if let Some(first) = seen.insert(id.as_str(), rank) {
                return Err(Error::AggregationInput {
                    item_id: id.clone(),
                    first,
                    second: rank,
                });
            }
        }

        Ok(Self { items })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn rank_of(&self, item_id: &str) -> Option<usize> {
        self.items.iter().position(|id| id == item_id)
    }
}

/// Per-window multipliers. All windows weigh 1 unless tuned; 0 mutes a
/// window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowWeights {
    pub short: u32,
    pub medium: u32,
    pub long: u32,
}

impl Default for WindowWeights {
    fn default() -> Self {
        Self {
            short: 1,
            medium: 1,
            long: 1,
        }
    }
}

/// Scores every item of the three windows and orders them by descending
/// score. Inputs are not modified; work is linear in their combined size.
///
/// Scores saturate at the `i64` bounds instead of wrapping, so extreme
/// weights still order items sensibly.
pub fn aggregate(
    short: &RankedList,
    medium: &RankedList,
    long: &RankedList,
    weights: WindowWeights,
) -> Vec<ScoredItem> {
    let windows = [
        (short, weights.short),
        (medium, weights.medium),
        (long, weights.long),
    ];

    let mut order: Vec<&str> = Vec::new();
    let mut scores: HashMap<&str, i64> = HashMap::new();

    for (window, weight) in windows {
        for (rank, id) in window.items().iter().enumerate() {
            let contribution = rank_points(rank).saturating_mul(i64::from(weight));
            match scores.get_mut(id.as_str()) {
                Some(score) => *score = score.saturating_add(contribution),
                None => {
                    order.push(id.as_str());
                    scores.insert(id.as_str(), contribution);
                }
            }
        }
    }

    let mut scored: Vec<ScoredItem> = order
        .into_iter()
        .map(|id| ScoredItem {
            item_id: id.to_string(),
            score: scores.get(id).copied().unwrap_or_default(),
        })
        .collect();

    // stable, so ties stay in first-seen order
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

fn rank_points(rank: usize) -> i64 {
    i64::try_from(rank).map_or(i64::MIN, |rank| RANK_CEILING.saturating_sub(rank))
}
