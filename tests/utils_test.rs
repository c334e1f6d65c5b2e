use undergroundcli::types::{Artist, ExternalUrls, Playlist, PlaylistTracksRef, SimpleArtist, Track};
use undergroundcli::utils::*;

// Helper function to create a test artist
fn create_test_artist(id: &str, name: &str, popularity: u32) -> Artist {
    Artist {
        id: id.to_string(),
        name: name.to_string(),
        popularity,
        genres: vec!["ambient".to_string(), "idm".to_string()],
        external_urls: Some(ExternalUrls {
            spotify: Some(format!("https://open.spotify.com/artist/{}", id)),
        }),
        ..Artist::default()
    }
}

// Helper function to create a test track credited to the given artist ids
fn create_test_track(name: &str, popularity: u32, artist_ids: &[Option<&str>]) -> Track {
    Track {
        id: Some(format!("{}_id", name)),
        name: name.to_string(),
        popularity,
        artists: artist_ids
            .iter()
            .enumerate()
            .map(|(i, id)| SimpleArtist {
                id: id.map(str::to_string),
                name: format!("Artist {}", i),
            })
            .collect(),
        ..Track::default()
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters, inside the 43..=128 range PKCE allows
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    // Known S256 pair from RFC 7636, appendix B
    let verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r-wW1gFWFOEjXk";
    let challenge = generate_code_challenge(verifier);
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");

    // Should be deterministic - same input produces same output
    assert_eq!(challenge, generate_code_challenge(verifier));

    // Different input should produce different output
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_generate_state() {
    let state = generate_state();

    assert_eq!(state.len(), 32);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(state, generate_state());
}

#[test]
fn test_is_underground_threshold() {
    assert!(is_underground(0));
    assert!(is_underground(39));

    // The threshold itself is no longer underground
    assert!(!is_underground(40));
    assert!(!is_underground(100));
}

#[test]
fn test_underground_artists_keeps_order() {
    let artists = vec![
        create_test_artist("a1", "Quiet", 12),
        create_test_artist("a2", "Famous", 87),
        create_test_artist("a3", "Edge", 40),
        create_test_artist("a4", "Almost", 39),
    ];

    let filtered = underground_artists(artists);

    let names: Vec<&str> = filtered.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Quiet", "Almost"]);
}

#[test]
fn test_underground_tracks() {
    let tracks = vec![
        create_test_track("deep", 5, &[Some("a1")]),
        create_test_track("hit", 75, &[Some("a1")]),
    ];

    let filtered = underground_tracks(tracks);

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "deep");
}

#[test]
fn test_remove_duplicate_artists() {
    let mut artists = vec![
        create_test_artist("a1", "First", 10),
        create_test_artist("a2", "Second", 20),
        create_test_artist("a1", "First again", 10),
        create_test_artist("a3", "Third", 30),
        create_test_artist("a2", "Second again", 20),
    ];

    remove_duplicate_artists(&mut artists);

    // Keeps the first occurrence of every id
    let names: Vec<&str> = artists.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second", "Third"]);
}

#[test]
fn test_remove_duplicate_artists_empty() {
    let mut artists: Vec<Artist> = Vec::new();
    remove_duplicate_artists(&mut artists);
    assert!(artists.is_empty());
}

#[test]
fn test_seed_artist_ids_distinct_in_order() {
    let tracks = vec![
        create_test_track("t1", 10, &[Some("a1"), Some("a2")]),
        create_test_track("t2", 10, &[Some("a2"), None]),
        create_test_track("t3", 10, &[Some(""), Some("a3")]),
        create_test_track("t4", 10, &[Some("a4"), Some("a5"), Some("a6")]),
    ];

    let seeds = seed_artist_ids(&tracks, 5);

    assert_eq!(seeds, vec!["a1", "a2", "a3", "a4", "a5"]);
}

#[test]
fn test_seed_artist_ids_without_ids() {
    let tracks = vec![create_test_track("local", 0, &[None, None])];
    assert!(seed_artist_ids(&tracks, 5).is_empty());
    assert!(seed_artist_ids(&[], 5).is_empty());
}

#[test]
fn test_artist_table_rows() {
    let mut unlinked = create_test_artist("a2", "Nowhere", 3);
    unlinked.external_urls = None;
    unlinked.genres = vec![
        "one".to_string(),
        "two".to_string(),
        "three".to_string(),
        "four".to_string(),
    ];

    let rows = artist_table_rows(&[create_test_artist("a1", "Somewhere", 22), unlinked]);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Somewhere");
    assert_eq!(rows[0].popularity, 22);
    assert_eq!(rows[0].genres, "ambient, idm");
    assert_eq!(rows[0].link, "https://open.spotify.com/artist/a1");

    // At most three genres, and a dash when there is no link
    assert_eq!(rows[1].genres, "one, two, three");
    assert_eq!(rows[1].link, "-");
}

#[test]
fn test_track_table_rows_join_artists() {
    let rows = track_table_rows(&[create_test_track("duet", 18, &[Some("a1"), Some("a2")])]);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "duet");
    assert_eq!(rows[0].artists, "Artist 0, Artist 1");
    assert_eq!(rows[0].popularity, 18);
    assert_eq!(rows[0].link, "-");
}

#[test]
fn test_playlist_table_rows_are_numbered_from_one() {
    let playlists = vec![
        Playlist {
            id: "p1".to_string(),
            name: "Night drive".to_string(),
            tracks: Some(PlaylistTracksRef { total: 42 }),
            ..Playlist::default()
        },
        Playlist {
            id: "p2".to_string(),
            name: "Empty".to_string(),
            ..Playlist::default()
        },
    ];

    let rows = playlist_table_rows(&playlists);

    assert_eq!(rows[0].index, 1);
    assert_eq!(rows[0].tracks, 42);
    assert_eq!(rows[1].index, 2);
    assert_eq!(rows[1].tracks, 0);
    assert_eq!(rows[1].id, "p2");
}
