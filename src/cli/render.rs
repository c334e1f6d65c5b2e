use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error::Error,
    info,
    types::{Artist, Playlist, Track, UserProfile},
    utils, warning,
};

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

/// Prints an error in the message category the user should see.
pub fn report(error: &Error) {
    match error {
        Error::ConfigurationMissing(var) => {
            warning!("Configuration missing. Set {} in your environment.", var)
        }
        Error::AuthFailed(reason) => {
            warning!("Authentication failed. Please try again. ({})", reason)
        }
        Error::SessionExpired => warning!("Session expired. Please sign in again."),
        e if e.is_informational() => info!("{}", e),
        e => warning!("{}", e),
    }
}

pub fn show_artists(artists: &[Artist]) {
    if artists.is_empty() {
        info!("No results yet.");
        return;
    }
    println!("{}", Table::new(utils::artist_table_rows(artists)));
}

pub fn show_tracks(tracks: &[Track]) {
    if tracks.is_empty() {
        info!("No results yet.");
        return;
    }
    println!("{}", Table::new(utils::track_table_rows(tracks)));
}

pub fn show_playlists(playlists: &[Playlist]) {
    if playlists.is_empty() {
        info!("No playlists found.");
        return;
    }
    println!("{}", Table::new(utils::playlist_table_rows(playlists)));
}

pub fn show_artist(artist: &Artist) {
    info!(
        "{} · Popularity {}{}",
        artist.name,
        artist.popularity,
        if artist.genres.is_empty() {
            String::new()
        } else {
            format!(" · {}", artist.genres.iter().take(3).cloned().collect::<Vec<_>>().join(", "))
        }
    );
}

pub fn show_profile(profile: &UserProfile) {
    info!("Signed in as {}", profile.label());
}
