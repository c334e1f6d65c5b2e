//! # Session Lifecycle
//!
//! Owns the single credential slot of the application. Every caller that
//! needs to talk to Spotify asks the [`SessionManager`] for a credential and
//! either gets one that is valid for immediate use or a definitive "not
//! available" answer.
//!
//! ```text
//!            authorize ok                      expiry (computed)
//!   Absent ───────────────▶ Present(valid) ─────────────────▶ Present(expired)
//!     ▲                         ▲   │                              │
//!     │                         │   │ sign out                     │ refresh
//!     │                         │   ▼                              │
//!     └──── sign out / ─────────┴── Absent ◀── refresh failed ─────┤
//!           refresh failed          Present(valid) ◀── refresh ok ─┘
//! ```
//!
//! State transitions are serialized behind a mutex that is never held across
//! a network call. The credential is replaced by a single assignment of an
//! immutable value, so a concurrent reader sees either the old or the new one.
//! Refreshes are single-flight: callers arriving while a refresh is running
//! wait for it and reuse its result.

mod authorizer;
mod clock;
mod credential;

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

pub use authorizer::{AuthorizationRequest, AuthorizationResponse, Authorizer};
pub use clock::{Clock, SystemClock};
pub use credential::{Credential, SKEW_MS};

use crate::{
    Res,
    config::Config,
    error::Error,
    spotify::{self, SpotifyClient, auth::OAuthClient},
    types::UserProfile,
};

/// Progress of interactive authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Idle,
    Authorizing,
    Authorized,
    Failed,
}

/// Result of a call to [`SessionManager::request_interactive_authorization`].
#[derive(Debug, Clone, PartialEq)]
pub enum AuthorizationOutcome {
    /// A new credential is stored. `profile` is `None` when the profile fetch
    /// failed; the session is usable regardless.
    Authorized { profile: Option<UserProfile> },
    /// Another authorization is already outstanding; this call did nothing.
    AlreadyInProgress,
}

#[derive(Debug)]
struct SessionState {
    credential: Option<Arc<Credential>>,
    profile: Option<UserProfile>,
    auth: AuthState,
    /// Bumped whenever the stored credential is replaced or dropped.
    epoch: u64,
    /// Bumped when an interactive authorization starts or is cancelled.
    attempt: u64,
}

impl SessionState {
    /// Drops the credential and the cached profile. An authorization that is
    /// still outstanding keeps running and may commit later.
    fn drop_credential(&mut self) {
        self.credential = None;
        self.profile = None;
        self.epoch += 1;
        if self.auth != AuthState::Authorizing {
            self.auth = AuthState::Idle;
        }
    }
}

/// Owner of the application's single credential slot.
///
/// Shared behind an `Arc` by every screen. All methods take `&self`.
pub struct SessionManager {
    oauth: OAuthClient,
    spotify: SpotifyClient,
    authorizer: Arc<dyn Authorizer>,
    clock: Arc<dyn Clock>,
    state: Mutex<SessionState>,
    refresh_gate: Mutex<()>,
}

impl SessionManager {
    /// Creates a signed-out session.
    ///
    /// # Arguments
    ///
    /// * `config` - Client id, redirect URI and the token/API endpoints
    /// * `authorizer` - Surface that shows the authorization URL to the user
    ///   and reports the redirect back
    ///
    /// # Example
    ///
    /// ```
    /// let config = Arc::new(Config::from_env());
    /// let authorizer = Arc::new(BrowserAuthorizer::new(Arc::clone(&config)));
    /// let session = SessionManager::new(config, authorizer);
    /// assert!(!session.is_signed_in().await);
    /// ```
    pub fn new(config: Arc<Config>, authorizer: Arc<dyn Authorizer>) -> Self {
        Self {
            oauth: OAuthClient::new(Arc::clone(&config)),
            spotify: SpotifyClient::from_config(&config),
            authorizer,
            clock: Arc::new(SystemClock),
            state: Mutex::new(SessionState {
                credential: None,
                profile: None,
                auth: AuthState::Idle,
                epoch: 0,
                attempt: 0,
            }),
            refresh_gate: Mutex::new(()),
        }
    }

    /// Replaces the [`SystemClock`] used for `issued_at` stamps and expiry
    /// checks.
    ///
    /// # Arguments
    ///
    /// * `clock` - Time source returning epoch milliseconds
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Runs the authorization-code-with-PKCE flow through the configured
    /// [`Authorizer`].
    ///
    /// Returns `AlreadyInProgress` without side effects while another attempt
    /// is outstanding. Any non-success answer from the authorization surface
    /// or a rejected code exchange yields `AuthFailed` and leaves the stored
    /// credential untouched. On success the user profile is fetched once and
    /// cached.
    #[instrument(skip(self))]
    pub async fn request_interactive_authorization(&self) -> Res<AuthorizationOutcome> {
        let request = self.oauth.authorization_request()?;

        let attempt = {
            let mut state = self.state.lock().await;
            if state.auth == AuthState::Authorizing {
                debug!("authorization already in progress");
                return Ok(AuthorizationOutcome::AlreadyInProgress);
            }
            state.auth = AuthState::Authorizing;
            state.attempt += 1;
            state.attempt
        };

        let credential = match self.authorize_and_exchange(&request).await {
            Ok(credential) => credential,
            Err(e) => {
                let mut state = self.state.lock().await;
                if state.attempt == attempt && state.auth == AuthState::Authorizing {
                    state.auth = AuthState::Failed;
                }
                warn!("authorization failed: {}", e);
                return Err(e);
            }
        };

        let access_token = credential.access_token().to_string();
        let epoch = {
            let mut state = self.state.lock().await;
            // only sign_out cancels an outstanding attempt
            if state.attempt != attempt || state.auth != AuthState::Authorizing {
                return Err(Error::AuthFailed(
                    "sign-in was superseded before it completed".to_string(),
                ));
            }
            state.credential = Some(Arc::new(credential));
            state.profile = None;
            state.auth = AuthState::Authorized;
            state.epoch += 1;
            state.epoch
        };
        debug!("credential stored");

        let profile = match spotify::profile::get_current_user(&self.spotify, &access_token).await {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!("failed to load user profile: {}", e);
                None
            }
        };

        if let Some(profile) = &profile {
            let mut state = self.state.lock().await;
            if state.epoch == epoch {
                state.profile = Some(profile.clone());
            }
        }

        Ok(AuthorizationOutcome::Authorized { profile })
    }

    async fn authorize_and_exchange(&self, request: &AuthorizationRequest) -> Res<Credential> {
        let code = match self.authorizer.authorize(request).await {
            AuthorizationResponse::Success { code, state } => {
                if state.as_deref() != Some(request.state.as_str()) {
                    return Err(Error::AuthFailed(
                        "authorization state did not match".to_string(),
                    ));
                }
                code
            }
            AuthorizationResponse::Dismissed => {
                return Err(Error::AuthFailed("authorization was dismissed".to_string()));
            }
            AuthorizationResponse::Error(message) => return Err(Error::AuthFailed(message)),
        };

        let response = self
            .oauth
            .exchange_code(&code, request)
            .await
            .map_err(|e| Error::AuthFailed(e.to_string()))?;

        Ok(Credential::from_response(response, self.clock.now_millis()))
    }

    /// Returns a credential that is valid for immediate use.
    ///
    /// - No credential stored: `Ok(None)`, nothing else happens.
    /// - Stored and not expired: a copy of it.
    /// - Expired with a refresh token: refreshes first and returns the new
    ///   credential. If the refresh fails the session is cleared and
    ///   `SessionExpired` is returned.
    /// - Expired without a refresh token: the session is cleared, `Ok(None)`.
    ///
    /// Concurrent callers share one refresh. A caller that waited for it
    /// gets the refreshed credential, or `Ok(None)` when that refresh failed
    /// and cleared the session.
    ///
    /// # Example
    ///
    /// ```
    /// if let Some(credential) = session.get_valid_credential().await? {
    ///     let me = get_current_user(&client, credential.access_token()).await?;
    ///     println!("{}", me.label());
    /// }
    /// ```
    pub async fn get_valid_credential(&self) -> Res<Option<Credential>> {
        if let Some(credential) = self.current_if_valid().await {
            return Ok(Some(credential));
        }

        let _gate = self.refresh_gate.lock().await;

        // Whoever held the gate before us may already have refreshed.
        let (current, epoch) = {
            let state = self.state.lock().await;
            (state.credential.clone(), state.epoch)
        };
        let Some(current) = current else {
            return Ok(None);
        };
        if !current.is_expired_at(self.clock.now_millis()) {
            return Ok(Some(current.as_ref().clone()));
        }

        let Some(refresh_token) = current.refresh_token() else {
            debug!("credential expired without refresh token");
            self.clear_if_current(epoch).await;
            return Ok(None);
        };

        debug!("refreshing expired credential");
        match self.oauth.refresh(refresh_token).await {
            Ok(response) => {
                let next = Arc::new(current.refreshed(response, self.clock.now_millis()));
                let mut state = self.state.lock().await;
                if state.epoch != epoch {
                    // signed out (or in again) while the refresh was running
                    let now = self.clock.now_millis();
                    return Ok(state
                        .credential
                        .as_ref()
                        .filter(|c| !c.is_expired_at(now))
                        .map(|c| c.as_ref().clone()));
                }
                state.credential = Some(Arc::clone(&next));
                debug!("credential refreshed");
                Ok(Some(next.as_ref().clone()))
            }
            Err(e) => {
                warn!("refresh failed: {}", e);
                self.clear_if_current(epoch).await;
                Err(Error::SessionExpired)
            }
        }
    }

    /// Like [`get_valid_credential`](Self::get_valid_credential) but treats
    /// an absent session as `SignInRequired`.
    pub async fn require_credential(&self) -> Res<Credential> {
        self.get_valid_credential()
            .await?
            .ok_or(Error::SignInRequired)
    }

    /// Clears the credential and the cached profile. Never touches the network.
    ///
    /// An interactive authorization still waiting for the user is cancelled:
    /// its result is discarded when it arrives and the state returns to
    /// [`AuthState::Idle`].
    pub async fn sign_out(&self) {
        let mut state = self.state.lock().await;
        state.drop_credential();
        state.attempt += 1;
        state.auth = AuthState::Idle;
        debug!("signed out");
    }

    pub async fn profile(&self) -> Option<UserProfile> {
        self.state.lock().await.profile.clone()
    }

    pub async fn auth_state(&self) -> AuthState {
        self.state.lock().await.auth
    }

    /// Whether a credential is stored, expired or not.
    pub async fn is_signed_in(&self) -> bool {
        self.state.lock().await.credential.is_some()
    }

    async fn current_if_valid(&self) -> Option<Credential> {
        let now = self.clock.now_millis();
        let state = self.state.lock().await;
        state
            .credential
            .as_ref()
            .filter(|c| !c.is_expired_at(now))
            .map(|c| c.as_ref().clone())
    }

    async fn clear_if_current(&self, epoch: u64) {
        let mut state = self.state.lock().await;
        if state.epoch == epoch {
            state.drop_credential();
        }
    }
}
