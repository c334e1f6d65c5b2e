use crate::{
    Res,
    spotify::SpotifyClient,
    types::{
        Artist, ArtistTracks, RelatedArtistsResponse, SearchArtistsResponse, SearchTracksResponse,
        Track,
    },
    utils,
};

/// Searches the catalog for artists matching `query`.
///
/// Returns at most five artists in Spotify's relevance order. The first entry
/// is treated as "the" artist by every caller.
///
/// # Example
///
/// ```
/// let artists = search_artist(&client, token, "Boards of Canada").await?;
/// if let Some(artist) = artists.first() {
///     println!("{} ({})", artist.name, artist.popularity);
/// }
/// ```
pub async fn search_artist(client: &SpotifyClient, token: &str, query: &str) -> Res<Vec<Artist>> {
    let res = client
        .fetch::<SearchArtistsResponse>(
            token,
            "/search",
            &[("type", "artist"), ("limit", "5"), ("q", query)],
        )
        .await?;

    Ok(res.artists.items)
}

/// Retrieves the artists Spotify relates to `artist_id`, keeping only the
/// underground ones (popularity below the threshold).
///
/// # Arguments
///
/// * `client` - API client pointing at the Web API root
/// * `token` - Access token from the session
/// * `artist_id` - Seed artist; usually the first hit of [`search_artist`]
///
/// # Returns
///
/// Related artists in Spotify's order. A `204 No Content` answer yields an
/// empty list.
pub async fn get_related_artists(
    client: &SpotifyClient,
    token: &str,
    artist_id: &str,
) -> Res<Vec<Artist>> {
    let res = client
        .fetch::<RelatedArtistsResponse>(
            token,
            &format!("/artists/{id}/related-artists", id = artist_id),
            &[],
        )
        .await?;

    Ok(utils::underground_artists(res.artists))
}

/// Searches up to 50 tracks credited to `artist_name` and keeps the
/// underground ones.
pub async fn get_artist_underground_tracks(
    client: &SpotifyClient,
    token: &str,
    artist_name: &str,
) -> Res<Vec<Track>> {
    let query = format!("artist:\"{}\"", artist_name);
    let res = client
        .fetch::<SearchTracksResponse>(
            token,
            "/search",
            &[("type", "track"), ("limit", "50"), ("q", query.as_str())],
        )
        .await?;

    Ok(utils::underground_tracks(res.tracks.items))
}

/// Resolves `artist_name` to the best matching artist and collects its
/// underground tracks. `None` when the search finds no artist at all.
pub async fn get_artist_by_name_with_tracks(
    client: &SpotifyClient,
    token: &str,
    artist_name: &str,
) -> Res<Option<ArtistTracks>> {
    let artists = search_artist(client, token, artist_name).await?;
    let Some(artist) = artists.into_iter().next() else {
        return Ok(None);
    };

    let underground_tracks = get_artist_underground_tracks(client, token, &artist.name).await?;

    Ok(Some(ArtistTracks {
        artist,
        underground_tracks,
    }))
}

/// Retrieves a single artist by Spotify id (`GET /artists/{id}`).
///
/// No popularity filter is applied; this is the detail view for any artist.
///
/// # Arguments
///
/// * `client` - API client pointing at the Web API root
/// * `token` - Access token from the session
/// * `artist_id` - Spotify artist id, e.g. `4Z8W4fKeB5YxbusRsdQVPb`
///
/// # Errors
///
/// Returns [`crate::error::Error::Provider`] with status 404 for unknown ids.
pub async fn get_artist_details(client: &SpotifyClient, token: &str, artist_id: &str) -> Res<Artist> {
    client
        .fetch::<Artist>(token, &format!("/artists/{id}", id = artist_id), &[])
        .await
}
