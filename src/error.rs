//! Error taxonomy for Undergroundcli.
//!
//! Every fallible operation in the library returns [`Res`], which carries one
//! of the variants below. The presentation layer decides how each variant is
//! shown to the user; library code never prints.

use std::fmt;

use thiserror::Error;

/// The remote service that produced a [`Error::Provider`] failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Spotify,
    LastFm,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Spotify => write!(f, "Spotify"),
            Service::LastFm => write!(f, "Last.fm"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// A required value was not supplied by the environment.
    #[error("Missing {0}. Please configure your environment variables.")]
    ConfigurationMissing(&'static str),

    /// Interactive authorization did not complete.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// A refresh attempt failed and the session was cleared.
    #[error("Session expired. Please sign in again.")]
    SessionExpired,

    /// No credential is available; the caller must sign in first.
    #[error("Please sign in to Spotify to continue.")]
    SignInRequired,

    /// Any non-success response from a provider API.
    #[error("{service} API error: {status} {body}")]
    Provider {
        service: Service,
        status: u16,
        body: String,
    },

    /// A query ran fine but produced nothing worth showing.
    #[error("{0}")]
    EmptyResult(String),

    /// Blank user input rejected before any call was made.
    #[error("Enter a {0} to continue.")]
    MissingInput(&'static str),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot load environment: {0}")]
    Environment(String),
}

impl Error {
    /// Notices are shown to the user as information rather than failures.
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            Error::EmptyResult(_) | Error::MissingInput(_) | Error::SignInRequired
        )
    }

    pub(crate) fn provider(service: Service, status: reqwest::StatusCode, body: String) -> Self {
        Error::Provider {
            service,
            status: status.as_u16(),
            body,
        }
    }
}
