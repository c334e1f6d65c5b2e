//! # Spotify Integration Module
//!
//! This module is the integration layer between Undergroundcli and the Spotify
//! Web API and accounts service. It handles HTTP communication, the OAuth 2.0
//! PKCE exchanges and the underground filtering applied to every result.
//!
//! ## Architecture
//!
//! ```text
//! Presentation Layer (CLI)
//!          ↓
//! Recommendation queries (discover)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE, token endpoint, browser surface)
//!     ├── Client (bearer requests, 204 handling, provider errors)
//!     ├── Profile (current user)
//!     ├── Artists (search, related artists, underground tracks)
//!     └── Playlists (paginated playlists and tracks, recommendations)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Credentials
//!
//! None of the functions here store a token. They receive the access token by
//! value from the caller, who obtained it from
//! [`crate::session::SessionManager::get_valid_credential`].
//!
//! ## Error Handling
//!
//! Any non-2xx response becomes [`crate::error::Error::Provider`] with the
//! status code and the response text. Nothing is retried. A `204 No Content`
//! counts as an empty success.
//!
//! ## API Coverage
//!
//! - `GET /me` - Current user's profile
//! - `GET /me/playlists` - User's playlists, followed through `next`
//! - `GET /playlists/{id}/tracks` - Playlist tracks, followed through `next`
//! - `GET /search` - Artist and track search
//! - `GET /artists/{id}` - Artist details
//! - `GET /artists/{id}/related-artists` - Related artists
//! - `GET /recommendations` - Seed based recommendations
//! - `POST /api/token` - Code exchange and refresh

pub mod artists;
pub mod auth;
pub mod client;
pub mod playlists;
pub mod profile;

pub use client::SpotifyClient;
