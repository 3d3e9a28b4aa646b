use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    spotify::me::TopTrackScores,
    types::{Device, DeviceTableRow, ScoreTableRow, Track, TrackTableRow},
};

pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

/// Table rows for the best `limit` scored tracks, in score order.
pub fn score_rows(top: &TopTrackScores, limit: usize) -> Vec<ScoreTableRow> {
    top.scores
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, scored)| {
            let (name, artists) = match top.track(&scored.item_id) {
                Some(track) => (track.name.clone(), track.artist_names()),
                None => (scored.item_id.clone(), String::new()),
            };
            ScoreTableRow {
                rank: i + 1,
                score: scored.score,
                name,
                artists,
            }
        })
        .collect()
}

pub fn track_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .map(|t| TrackTableRow {
            name: t.name.clone(),
            artists: t.artist_names(),
            album: t.album.as_ref().map(|a| a.name.clone()).unwrap_or_default(),
            release: t
                .album
                .as_ref()
                .and_then(|a| a.release_date.clone())
                .unwrap_or_default(),
        })
        .collect()
}

pub fn device_rows(devices: &[Device]) -> Vec<DeviceTableRow> {
    devices
        .iter()
        .map(|d| DeviceTableRow {
            name: d.name.clone(),
            kind: d.kind.clone(),
            active: if d.is_active { "yes" } else { "" }.to_string(),
            volume: d
                .volume_percent
                .map(|v| format!("{v}%"))
                .unwrap_or_default(),
        })
        .collect()
}
