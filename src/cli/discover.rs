use crate::{Res, discover, error::Error, info, spotify, types::Playlist};

use super::{App, render};

pub async fn picks(app: &App, username: &str) -> Res<()> {
    let token = app.token().await?;
    let pb = render::spinner("Finding underground matches...");
    let result = discover::lastfm_underground_picks(&app.spotify, &app.lastfm, &token, username).await;
    pb.finish_and_clear();

    render::show_artists(&result?);
    Ok(())
}

pub async fn related(app: &App, query: &str) -> Res<()> {
    let token = app.token().await?;
    let pb = render::spinner("Fetching related artists...");
    let result = discover::related_underground_artists(&app.spotify, &token, query).await;
    pb.finish_and_clear();

    render::show_artists(&result?);
    Ok(())
}

pub async fn gems(app: &App, artist_name: &str) -> Res<()> {
    let token = app.token().await?;
    let pb = render::spinner("Digging through the catalog...");
    let result = discover::hidden_gems(&app.spotify, &token, artist_name).await;
    pb.finish_and_clear();

    let gems = result?;
    render::show_artist(&gems.artist);
    render::show_tracks(&gems.underground_tracks);
    Ok(())
}

/// Lists the user's playlists and returns them so a caller can pick one.
pub async fn playlists(app: &App) -> Res<Vec<Playlist>> {
    let token = app.token().await?;
    let pb = render::spinner("Loading playlists...");
    let result = spotify::playlists::get_user_playlists(&app.spotify, &token).await;
    pb.finish_and_clear();

    let playlists = result?;
    render::show_playlists(&playlists);
    Ok(playlists)
}

/// Recommends underground tracks for `playlist_id`, or for the user's first
/// playlist when none is given.
pub async fn recommend(app: &App, playlist_id: Option<&str>) -> Res<()> {
    let token = app.token().await?;

    let playlist_id = match playlist_id {
        Some(id) => id.to_string(),
        None => {
            let playlists = spotify::playlists::get_user_playlists(&app.spotify, &token).await?;
            let first = playlists
                .into_iter()
                .next()
                .ok_or_else(|| Error::EmptyResult("You have no playlists yet.".to_string()))?;
            info!("Using playlist {}", first.name);
            first.id
        }
    };

    let pb = render::spinner("Fetching playlist-based recommendations...");
    let result = discover::playlist_discoveries(&app.spotify, &token, &playlist_id).await;
    pb.finish_and_clear();

    render::show_tracks(&result?);
    Ok(())
}

pub async fn artist(app: &App, artist_id: &str) -> Res<()> {
    let token = app.token().await?;
    let artist = spotify::artists::get_artist_details(&app.spotify, &token, artist_id).await?;
    render::show_artist(&artist);
    Ok(())
}
