use tracing::debug;

use crate::{
    Res,
    spotify::SpotifyClient,
    types::{Paging, Playlist, PlaylistItem, RecommendationsResponse, Track},
    utils,
};

/// Number of distinct playlist artists used as recommendation seeds. The
/// recommendations endpoint accepts at most five seeds.
pub const MAX_SEED_ARTISTS: usize = 5;

/// Retrieves every playlist of the current user, following `next` links
/// until the last page.
///
/// # Arguments
///
/// * `client` - API client pointing at the Web API root
/// * `token` - Access token from the session
///
/// # Example
///
/// ```
/// let playlists = get_user_playlists(&client, token).await?;
/// for (i, playlist) in playlists.iter().enumerate() {
///     println!("{}. {}", i + 1, playlist.name);
/// }
/// ```
pub async fn get_user_playlists(client: &SpotifyClient, token: &str) -> Res<Vec<Playlist>> {
    let mut playlists: Vec<Playlist> = Vec::new();
    let mut next: Option<String> = Some(format!("{}/me/playlists?limit=50", client.api_url()));

    while let Some(url) = next {
        let page = client.fetch::<Paging<Playlist>>(token, &url, &[]).await?;
        playlists.extend(page.items);
        next = page.next;
    }

    Ok(playlists)
}

/// Retrieves every track of a playlist, following `next` links. Items whose
/// track is gone (removed from the catalog, episodes without data) are
/// skipped.
pub async fn get_playlist_tracks(
    client: &SpotifyClient,
    token: &str,
    playlist_id: &str,
) -> Res<Vec<Track>> {
    let mut tracks: Vec<Track> = Vec::new();
    let mut next: Option<String> = Some(format!(
        "{uri}/playlists/{id}/tracks?limit=100",
        uri = client.api_url(),
        id = playlist_id
    ));

    while let Some(url) = next {
        let page = client.fetch::<Paging<PlaylistItem>>(token, &url, &[]).await?;
        tracks.extend(page.items.into_iter().filter_map(|item| item.track));
        next = page.next;
    }

    Ok(tracks)
}

/// Recommends underground tracks seeded by the artists of a playlist.
///
/// Takes the first five distinct artist ids in playlist order as seeds and
/// asks for 20 recommendations, keeping the underground ones. A playlist
/// without any identifiable artist yields an empty list without calling the
/// recommendations endpoint.
pub async fn get_playlist_based_recommendations(
    client: &SpotifyClient,
    token: &str,
    playlist_id: &str,
) -> Res<Vec<Track>> {
    let tracks = get_playlist_tracks(client, token, playlist_id).await?;
    let seed_artists = utils::seed_artist_ids(&tracks, MAX_SEED_ARTISTS);

    if seed_artists.is_empty() {
        debug!(playlist_id, "no seed artists");
        return Ok(Vec::new());
    }

    let seeds = seed_artists.join(",");
    let res = client
        .fetch::<RecommendationsResponse>(
            token,
            "/recommendations",
            &[("limit", "20"), ("seed_artists", seeds.as_str())],
        )
        .await?;

    Ok(utils::underground_tracks(res.tracks))
}
