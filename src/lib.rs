//! Undergroundcli Library
//!
//! This library signs a user in to Spotify, reads listening signals from
//! Last.fm and surfaces "underground" artists and tracks: everything with a
//! Spotify popularity below 40. It includes the session lifecycle manager,
//! the API clients, the recommendation queries and the CLI screens.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `cli` - Command-line screens and the interactive shell
//! - `config` - Configuration management and environment variables
//! - `discover` - Recommendation queries combining the API clients
//! - `error` - Error taxonomy shared by all modules
//! - `lastfm` - Last.fm API client
//! - `server` - Local HTTP server for OAuth callbacks
//! - `session` - Credential acquisition, expiry, refresh and sign-out
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use undergroundcli::{config, session::SessionManager, spotify::auth::BrowserAuthorizer};
//!
//! #[tokio::main]
//! async fn main() -> undergroundcli::Res<()> {
//!     config::load_env().await?;
//!     let config = Arc::new(config::Config::from_env());
//!     let authorizer = Arc::new(BrowserAuthorizer::new(Arc::clone(&config)));
//!     let session = SessionManager::new(config, authorizer);
//!     session.request_interactive_authorization().await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod discover;
pub mod error;
pub mod lastfm;
pub mod server;
pub mod session;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Every library function reports failures through [`error::Error`], whose
/// variants map one-to-one onto the message categories shown to the user.
///
/// # Example
///
/// ```
/// use undergroundcli::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, error::Error>;

/// Prints an informational line prefixed with a blue `o`.
///
/// Accepts the same arguments as `println!`.
///
/// ```
/// info!("Found {} related artists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success line prefixed with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error line prefixed with a red `!` and exits with status 1.
///
/// Only for fatal startup failures. Screens return their errors and let
/// [`cli::report`] print them instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning line prefixed with a yellow `!`. Used for failures the
/// user can recover from.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
