//! # API Module
//!
//! HTTP endpoints served by the loopback server while an interactive sign-in
//! is outstanding.
//!
//! - [`callback`] - Receives the redirect from Spotify's authorization server
//!   and forwards the authorization code (or the user's refusal) to the
//!   waiting [`crate::spotify::auth::BrowserAuthorizer`]. The code exchange
//!   itself happens in the session manager, not here.

mod callback;

pub use callback::CallbackParams;
pub use callback::CallbackSlot;
pub use callback::callback;
