use spotifeat::spotify::me::TopTrackScores;
use spotifeat::spotify::playlist::{mix_playlist_name, track_uri};
use spotifeat::types::{Device, ScoredItem, SimpleAlbum, SimpleArtist, Track};
use spotifeat::utils::{device_rows, score_rows, track_rows};

// Helper function to create a test track
fn create_test_track(id: &str, name: &str, artists: &[&str]) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        uri: track_uri(id),
        artists: artists
            .iter()
            .map(|a| SimpleArtist {
                id: a.to_lowercase(),
                name: a.to_string(),
            })
            .collect(),
        album: Some(SimpleAlbum {
            id: format!("album-{id}"),
            name: format!("Album {name}"),
            release_date: Some("1999-01-01".to_string()),
        }),
        duration_ms: 200_000,
        popularity: Some(50),
    }
}

fn scored(id: &str, score: i64) -> ScoredItem {
    ScoredItem {
        item_id: id.to_string(),
        score,
    }
}

#[test]
fn test_score_rows() {
    let top = TopTrackScores {
        scores: vec![scored("b", 199), scored("a", 100), scored("c", 98)],
        tracks: vec![
            create_test_track("a", "Alpha", &["Ann"]),
            create_test_track("b", "Beta", &["Bob", "Bea"]),
            create_test_track("c", "Gamma", &[]),
        ],
    };

    let rows = score_rows(&top, 2);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].rank, 1);
    assert_eq!(rows[0].score, 199);
    assert_eq!(rows[0].name, "Beta");
    assert_eq!(rows[0].artists, "Bob, Bea");
    assert_eq!(rows[1].rank, 2);
    assert_eq!(rows[1].name, "Alpha");
}

#[test]
fn test_score_rows_without_track_details() {
    let top = TopTrackScores {
        scores: vec![scored("missing", 100)],
        tracks: Vec::new(),
    };

    let rows = score_rows(&top, 10);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "missing");
    assert_eq!(rows[0].artists, "");
}

#[test]
fn test_track_rows() {
    let mut bare = create_test_track("x", "Bare", &["Solo"]);
    bare.album = None;

    let rows = track_rows(&[create_test_track("a", "Alpha", &["Ann"]), bare]);

    assert_eq!(rows[0].album, "Album Alpha");
    assert_eq!(rows[0].release, "1999-01-01");
    assert_eq!(rows[1].album, "");
    assert_eq!(rows[1].release, "");
    assert_eq!(rows[1].artists, "Solo");
}

#[test]
fn test_device_rows() {
    let devices = vec![
        Device {
            id: Some("d1".to_string()),
            name: "Kitchen".to_string(),
            kind: "Speaker".to_string(),
            is_active: true,
            volume_percent: Some(40),
        },
        Device {
            id: None,
            name: "Phone".to_string(),
            kind: "Smartphone".to_string(),
            is_active: false,
            volume_percent: None,
        },
    ];

    let rows = device_rows(&devices);

    assert_eq!(rows[0].active, "yes");
    assert_eq!(rows[0].volume, "40%");
    assert_eq!(rows[1].active, "");
    assert_eq!(rows[1].volume, "");
}

#[test]
fn test_mix_playlist_name() {
    assert_eq!(mix_playlist_name(&["alice"]), "SpotiFeat Mix alice");
    assert_eq!(
        mix_playlist_name(&["alice", "bob", "carol"]),
        "SpotiFeat Mix alice ft. bob ft. carol"
    );
}

#[test]
fn test_track_uri() {
    assert_eq!(track_uri("4uLU6hMCjMI75M1A2tKUQC"), "spotify:track:4uLU6hMCjMI75M1A2tKUQC");
}
