use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Body returned by the token endpoint for both the code exchange and the
/// refresh exchange. `refresh_token` and `expires_in` may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub product: Option<String>,
}

impl UserProfile {
    /// Name shown to the user, falling back to the account id.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub popularity: u32,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    pub external_urls: Option<ExternalUrls>,
}

/// Artist reference embedded in a track. Local files carry no id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleArtist {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackAlbum {
    pub name: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub popularity: u32,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
    pub album: Option<TrackAlbum>,
    pub external_urls: Option<ExternalUrls>,
}

/// A page of results following Spotify's offset pagination. `next` holds the
/// absolute URL of the following page, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

impl<T> Default for Paging<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next: None,
            total: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistTracksRef {
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub owner: Option<PlaylistOwner>,
    pub tracks: Option<PlaylistTracksRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchArtistsResponse {
    #[serde(default)]
    pub artists: Paging<Artist>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchTracksResponse {
    #[serde(default)]
    pub tracks: Paging<Track>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelatedArtistsResponse {
    #[serde(default)]
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// An artist together with its underground tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistTracks {
    pub artist: Artist,
    pub underground_tracks: Vec<Track>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LastFmTopArtist {
    pub name: String,
    pub playcount: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LastFmTopArtists {
    #[serde(default)]
    pub artist: Vec<LastFmTopArtist>,
}

/// Last.fm answers with either `topartists` or an `error`/`message` pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LastFmTopArtistsResponse {
    pub topartists: Option<LastFmTopArtists>,
    pub error: Option<u32>,
    pub message: Option<String>,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub name: String,
    pub popularity: u32,
    pub genres: String,
    pub link: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artists: String,
    pub popularity: u32,
    pub link: String,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub name: String,
    pub tracks: u64,
    pub id: String,
}
