//! # CLI Module
//!
//! The presentation layer of Undergroundcli. Each public function is one
//! screen: it asks the session for a credential, calls a recommendation query
//! and renders the result as a table.
//!
//! ## Command Categories
//!
//! ### Session
//!
//! - [`sign_in`] - Interactive Spotify sign-in (OAuth 2.0 PKCE)
//! - [`sign_out`] - Drops the in-memory session
//! - [`whoami`] - Shows the signed-in profile
//!
//! ### Discovery
//!
//! - [`picks`] - Underground artists related to your Last.fm top artists
//! - [`related`] - Underground artists related to any artist
//! - [`gems`] - Low-popularity tracks of your favorite artist
//! - [`playlists`] - Your playlists
//! - [`recommend`] - Underground tracks inspired by one of your playlists
//! - [`artist`] - Details of a single artist
//!
//! ### Interactive
//!
//! - [`shell`] - Keeps one session alive across many commands
//! - [`preload_playlists`] - Playlist preload the shell runs after `login`
//!
//! ## Error Presentation
//!
//! Commands return errors instead of printing them. [`run`] clears the
//! [`StatusLine`] before a command starts and records the error it ends with,
//! so exactly one message is outstanding at a time and the last one wins.
//!
//! ## Usage Patterns
//!
//! ```bash
//! undergroundcli auth                      # Sign in and show your profile
//! undergroundcli picks my-lastfm-user      # Last.fm powered picks
//! undergroundcli related "Slowdive"        # Related underground artists
//! undergroundcli gems "Radiohead"          # Hidden gems
//! undergroundcli recommend                 # Seeded by your first playlist
//! undergroundcli shell                     # Interactive session
//! ```

mod auth;
mod discover;
mod render;
mod shell;
mod status;

use std::{future::Future, sync::Arc};

pub use auth::sign_in;
pub use auth::sign_out;
pub use auth::whoami;
pub use discover::artist;
pub use discover::gems;
pub use discover::picks;
pub use discover::playlists;
pub use discover::recommend;
pub use discover::related;
pub use render::report;
pub use shell::ShellCommand;
pub use shell::parse_line;
pub use shell::preload_playlists;
pub use shell::shell;
pub use status::StatusLine;

use crate::{
    Res,
    config::Config,
    error::Error,
    lastfm::LastFmClient,
    session::{AuthorizationOutcome, SessionManager},
    spotify::SpotifyClient,
};

/// Everything a screen needs: the injected session plus the API clients.
pub struct App {
    pub session: Arc<SessionManager>,
    pub spotify: SpotifyClient,
    pub lastfm: LastFmClient,
    pub status: StatusLine,
    auto_sign_in: bool,
}

impl App {
    pub fn new(config: &Config, session: Arc<SessionManager>) -> Self {
        Self {
            session,
            spotify: SpotifyClient::from_config(config),
            lastfm: LastFmClient::from_config(config),
            status: StatusLine::new(),
            auto_sign_in: false,
        }
    }

    /// Starts an interactive sign-in when a screen needs a credential and
    /// none is stored. Used by one-shot commands, where every process begins
    /// without a session.
    pub fn with_auto_sign_in(mut self, enabled: bool) -> Self {
        self.auto_sign_in = enabled;
        self
    }

    /// Access token for a single provider call.
    pub async fn token(&self) -> Res<String> {
        if let Some(credential) = self.session.get_valid_credential().await? {
            return Ok(credential.access_token().to_string());
        }

        if !self.auto_sign_in {
            return Err(Error::SignInRequired);
        }

        if let AuthorizationOutcome::Authorized { profile } =
            self.session.request_interactive_authorization().await?
        {
            if let Some(profile) = profile {
                render::show_profile(&profile);
            }
        }

        let credential = self.session.require_credential().await?;
        Ok(credential.access_token().to_string())
    }
}

/// Runs one screen with status line bookkeeping and reports its error.
/// Returns `false` when the command failed; notices do not count as failures.
pub async fn run<F>(app: &App, command: F) -> bool
where
    F: Future<Output = Res<()>>,
{
    app.status.clear();
    match command.await {
        Ok(()) => true,
        Err(e) => {
            render::report(&e);
            app.status.set(&e);
            e.is_informational()
        }
    }
}
