use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::{
    config::UNDERGROUND_POPULARITY_THRESHOLD,
    types::{Artist, ArtistTableRow, Playlist, PlaylistTableRow, Track, TrackTableRow},
};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Random value echoed back by the authorization server to tie the redirect
/// to the request that started it.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

pub fn is_underground(popularity: u32) -> bool {
    popularity < UNDERGROUND_POPULARITY_THRESHOLD
}

pub fn underground_artists(artists: Vec<Artist>) -> Vec<Artist> {
    artists
        .into_iter()
        .filter(|a| is_underground(a.popularity))
        .collect()
}

pub fn underground_tracks(tracks: Vec<Track>) -> Vec<Track> {
    tracks
        .into_iter()
        .filter(|t| is_underground(t.popularity))
        .collect()
}

/// Keeps the first occurrence of every artist id, preserving order.
pub fn remove_duplicate_artists(artists: &mut Vec<Artist>) {
    let mut seen_ids = HashSet::new();
    artists.retain(|artist| seen_ids.insert(artist.id.clone()));
}

/// Distinct artist ids across the given tracks in order of first appearance,
/// skipping artists without an id, capped at `max`.
pub fn seed_artist_ids(tracks: &[Track], max: usize) -> Vec<String> {
    let mut seen_ids = HashSet::new();
    tracks
        .iter()
        .flat_map(|t| t.artists.iter())
        .filter_map(|a| a.id.as_deref())
        .filter(|id| !id.is_empty())
        .filter(|id| seen_ids.insert(id.to_string()))
        .take(max)
        .map(str::to_string)
        .collect()
}

pub fn artist_table_rows(artists: &[Artist]) -> Vec<ArtistTableRow> {
    artists
        .iter()
        .map(|a| ArtistTableRow {
            name: a.name.clone(),
            popularity: a.popularity,
            genres: a.genres.iter().take(3).cloned().collect::<Vec<_>>().join(", "),
            link: spotify_link(a.external_urls.as_ref().and_then(|u| u.spotify.as_deref())),
        })
        .collect()
}

pub fn track_table_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .map(|t| TrackTableRow {
            name: t.name.clone(),
            artists: t
                .artists
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            popularity: t.popularity,
            link: spotify_link(t.external_urls.as_ref().and_then(|u| u.spotify.as_deref())),
        })
        .collect()
}

pub fn playlist_table_rows(playlists: &[Playlist]) -> Vec<PlaylistTableRow> {
    playlists
        .iter()
        .enumerate()
        .map(|(i, p)| PlaylistTableRow {
            index: i + 1,
            name: p.name.clone(),
            tracks: p.tracks.as_ref().map_or(0, |t| t.total),
            id: p.id.clone(),
        })
        .collect()
}

fn spotify_link(url: Option<&str>) -> String {
    url.unwrap_or("-").to_string()
}
