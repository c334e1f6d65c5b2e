//! Configuration management for Undergroundcli.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Values are read once into a [`Config`] that is
//! shared by the session manager and the API clients.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)
//!
//! Required values are validated lazily: a missing client id or API key only
//! fails the operation that needs it, never startup.

use std::{env, path::PathBuf, time::Duration};

use crate::{Res, error::Error};

/// Popularity score (0-100) below which an artist or track counts as underground.
pub const UNDERGROUND_POPULARITY_THRESHOLD: u32 = 40;

/// Scopes requested during authorization.
pub const SPOTIFY_SCOPES: [&str; 5] = [
    "user-read-email",
    "user-read-private",
    "playlist-read-private",
    "playlist-read-collaborative",
    "user-library-read",
];

/// Token lifetime assumed when the provider omits `expires_in`.
pub const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_LASTFM_API_URL: &str = "https://ws.audioscrobbler.com/2.0/";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 120;

const APP_DIR: &str = "undergroundcli";

#[derive(Debug, Clone)]
pub struct Config {
    pub spotify_client_id: Option<String>,
    pub spotify_redirect_uri: Option<String>,
    pub lastfm_api_key: Option<String>,
    pub spotify_api_url: String,
    pub spotify_auth_url: String,
    pub spotify_token_url: String,
    pub lastfm_api_url: String,
    pub server_addr: String,
    pub auth_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spotify_client_id: None,
            spotify_redirect_uri: None,
            lastfm_api_key: None,
            spotify_api_url: DEFAULT_SPOTIFY_API_URL.to_string(),
            spotify_auth_url: DEFAULT_SPOTIFY_AUTH_URL.to_string(),
            spotify_token_url: DEFAULT_SPOTIFY_TOKEN_URL.to_string(),
            lastfm_api_url: DEFAULT_LASTFM_API_URL.to_string(),
            server_addr: DEFAULT_SERVER_ADDRESS.to_string(),
            auth_timeout: Duration::from_secs(DEFAULT_AUTH_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// Call [`load_env`] first if values should also come from `.env` files.
    /// Nothing is validated here.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            spotify_client_id: non_empty_var("SPOTIFY_CLIENT_ID"),
            spotify_redirect_uri: non_empty_var("SPOTIFY_REDIRECT_URI"),
            lastfm_api_key: non_empty_var("LASTFM_API_KEY"),
            spotify_api_url: non_empty_var("SPOTIFY_API_URL").unwrap_or(defaults.spotify_api_url),
            spotify_auth_url: non_empty_var("SPOTIFY_API_AUTH_URL")
                .unwrap_or(defaults.spotify_auth_url),
            spotify_token_url: non_empty_var("SPOTIFY_API_TOKEN_URL")
                .unwrap_or(defaults.spotify_token_url),
            lastfm_api_url: non_empty_var("LASTFM_API_URL").unwrap_or(defaults.lastfm_api_url),
            server_addr: non_empty_var("SERVER_ADDRESS").unwrap_or(defaults.server_addr),
            auth_timeout: non_empty_var("AUTH_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.auth_timeout),
        }
    }

    /// Returns the Spotify client id or `ConfigurationMissing`.
    pub fn client_id(&self) -> Res<&str> {
        self.spotify_client_id
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or(Error::ConfigurationMissing("SPOTIFY_CLIENT_ID"))
    }

    /// Returns the Last.fm API key or `ConfigurationMissing`.
    pub fn lastfm_api_key(&self) -> Res<&str> {
        self.lastfm_api_key
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or(Error::ConfigurationMissing("LASTFM_API_KEY"))
    }

    /// Returns the configured redirect URI, or the loopback callback address
    /// of the local server when none is configured.
    pub fn redirect_uri(&self) -> String {
        match self.spotify_redirect_uri.as_deref() {
            Some(uri) if !uri.is_empty() => uri.to_string(),
            _ => format!("http://{}/callback", self.server_addr),
        }
    }

    /// Space separated scope list as expected by the authorize endpoint.
    pub fn scope(&self) -> String {
        SPOTIFY_SCOPES.join(" ")
    }
}

/// Loads environment variables from `.env` files.
///
/// Reads `.env` from the working directory and from the platform-specific
/// local data directory under `undergroundcli/.env`:
/// - Linux: `~/.local/share/undergroundcli/.env`
/// - macOS: `~/Library/Application Support/undergroundcli/.env`
/// - Windows: `%LOCALAPPDATA%/undergroundcli/.env`
///
/// Variables already present in the process environment are never overridden.
/// Missing files are skipped; only unreadable or malformed files are errors.
pub async fn load_env() -> Res<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    match dotenv::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(Error::Environment(e.to_string())),
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| Error::Environment(e.to_string()))?;
    }

    Ok(())
}

/// Location of the user's `.env` file.
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path.push(".env");
    path
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
