//! Last.fm client used as the listening-history signal.

use reqwest::Client;
use tracing::warn;

use crate::{
    Res,
    config::Config,
    error::{Error, Service},
    types::LastFmTopArtistsResponse,
};

/// Number of top artists requested when the caller does not say otherwise.
pub const DEFAULT_TOP_ARTISTS: u32 = 10;

#[derive(Debug, Clone)]
pub struct LastFmClient {
    http: Client,
    api_url: String,
    api_key: Option<String>,
}

impl LastFmClient {
    /// # Arguments
    ///
    /// * `api_url` - Last.fm REST root, e.g. `https://ws.audioscrobbler.com/2.0/`
    /// * `api_key` - Optional key; checked when a request is made
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into(),
            api_key,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.lastfm_api_url.clone(), config.lastfm_api_key.clone())
    }

    /// Returns the names of the user's most played artists, best first.
    ///
    /// Fails with `ConfigurationMissing` before any request when no API key is
    /// configured. Last.fm error payloads become [`Error::Provider`].
    pub async fn get_user_top_artists(&self, username: &str, limit: u32) -> Res<Vec<String>> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(Error::ConfigurationMissing("LASTFM_API_KEY"))?;

        let limit = limit.to_string();
        let response = self
            .http
            .get(&self.api_url)
            .query(&[
                ("method", "user.gettopartists"),
                ("user", username),
                ("api_key", api_key),
                ("format", "json"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Last.fm request failed");
            return Err(Error::provider(Service::LastFm, status, body));
        }

        let data = response.json::<LastFmTopArtistsResponse>().await?;
        if let Some(code) = data.error {
            return Err(Error::provider(
                Service::LastFm,
                status,
                format!("{} {}", code, data.message.unwrap_or_default()),
            ));
        }

        Ok(data
            .topartists
            .map(|top| top.artist.into_iter().map(|a| a.name).collect())
            .unwrap_or_default())
    }
}
