//! Recommendation queries.
//!
//! Each function takes an access token by value, performs a fixed sequence of
//! provider calls and applies the underground filter. They keep no state and
//! pass provider errors through unchanged.

use tracing::debug;

use crate::{
    Res,
    error::Error,
    lastfm::{DEFAULT_TOP_ARTISTS, LastFmClient},
    spotify::{self, SpotifyClient},
    types::{Artist, ArtistTracks, Track},
    utils,
};

/// Maximum number of artists returned by [`lastfm_underground_picks`].
pub const MAX_PICKS: usize = 20;

/// Underground artists related to the user's Last.fm top artists.
///
/// For every top artist (best first) the first Spotify search hit is used as
/// the seed; names without a hit are skipped. Related artists are
/// de-duplicated by id, keeping the first occurrence, and capped at
/// [`MAX_PICKS`].
pub async fn lastfm_underground_picks(
    spotify: &SpotifyClient,
    lastfm: &LastFmClient,
    token: &str,
    username: &str,
) -> Res<Vec<Artist>> {
    let username = non_blank(username, "Last.fm username")?;
    let top_artists = lastfm.get_user_top_artists(username, DEFAULT_TOP_ARTISTS).await?;

    let mut related: Vec<Artist> = Vec::new();
    for artist_name in top_artists {
        let found = spotify::artists::search_artist(spotify, token, &artist_name).await?;
        let Some(artist) = found.first() else {
            debug!(%artist_name, "no Spotify match");
            continue;
        };

        related.extend(spotify::artists::get_related_artists(spotify, token, &artist.id).await?);
    }

    utils::remove_duplicate_artists(&mut related);
    related.truncate(MAX_PICKS);
    Ok(related)
}

/// Underground artists related to the best search match for `query`.
pub async fn related_underground_artists(
    spotify: &SpotifyClient,
    token: &str,
    query: &str,
) -> Res<Vec<Artist>> {
    let query = non_blank(query, "artist name")?;
    let artists = spotify::artists::search_artist(spotify, token, query).await?;
    let Some(artist) = artists.first() else {
        return Err(Error::EmptyResult(
            "No artists found. Try another search.".to_string(),
        ));
    };

    spotify::artists::get_related_artists(spotify, token, &artist.id).await
}

/// Low-popularity tracks from the catalog of the best match for `artist_name`.
pub async fn hidden_gems(spotify: &SpotifyClient, token: &str, artist_name: &str) -> Res<ArtistTracks> {
    let artist_name = non_blank(artist_name, "favorite artist")?;
    spotify::artists::get_artist_by_name_with_tracks(spotify, token, artist_name)
        .await?
        .ok_or_else(|| Error::EmptyResult("No tracks found for that artist.".to_string()))
}

/// Underground recommendations seeded by the artists of one of the user's
/// playlists.
pub async fn playlist_discoveries(
    spotify: &SpotifyClient,
    token: &str,
    playlist_id: &str,
) -> Res<Vec<Track>> {
    let playlist_id = non_blank(playlist_id, "playlist")?;
    spotify::playlists::get_playlist_based_recommendations(spotify, token, playlist_id).await
}

fn non_blank<'a>(value: &'a str, field: &'static str) -> Res<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::MissingInput(field));
    }
    Ok(value)
}
