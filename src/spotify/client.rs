use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    Res,
    config::Config,
    error::{Error, Service},
};

/// Bearer-authenticated client for the Spotify Web API.
///
/// The client holds no credential. Every call receives the access token by
/// value from the caller and forgets it afterwards.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
}

impl SpotifyClient {
    /// `api_url` is the Web API root; a trailing slash is dropped.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.spotify_api_url.clone())
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Issues a GET against `endpoint` and decodes the JSON body.
    ///
    /// `endpoint` is either a path relative to the API root or an absolute URL
    /// such as a pagination `next` link, which is used verbatim. A `204 No
    /// Content` yields `T::default()`. Any other non-2xx status becomes
    /// [`Error::Provider`] carrying the status and the response text.
    ///
    /// # Example
    ///
    /// ```
    /// let page = client
    ///     .fetch::<Paging<Playlist>>(token, "/me/playlists", &[("limit", "50")])
    ///     .await?;
    /// ```
    pub async fn fetch<T>(&self, token: &str, endpoint: &str, query: &[(&str, &str)]) -> Res<T>
    where
        T: DeserializeOwned + Default,
    {
        let url = if endpoint.starts_with("http") {
            endpoint.to_string()
        } else {
            format!("{}{}", self.api_url, endpoint)
        };

        let mut request = self.http.get(&url).bearer_auth(token);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            debug!(%url, "empty response");
            return Ok(T::default());
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%url, status = status.as_u16(), "Spotify request failed");
            return Err(Error::provider(Service::Spotify, status, body));
        }

        Ok(response.json::<T>().await?)
    }
}
