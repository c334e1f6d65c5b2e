use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tokio::sync::{Mutex, oneshot};
use tracing::debug;

use crate::{
    Res,
    config::Config,
    error::{Error, Service},
    server,
    session::{AuthorizationRequest, AuthorizationResponse, Authorizer},
    types::TokenResponse,
    utils, warning,
};

/// Client for the provider's OAuth 2.0 endpoints.
///
/// Builds PKCE authorization requests and performs the two token endpoint
/// exchanges: authorization code and refresh token.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: Client,
    config: Arc<Config>,
}

impl OAuthClient {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Builds a fresh authorization-code-with-PKCE request.
    ///
    /// Generates a new code verifier, derives the S256 challenge from it and
    /// picks a random `state`. Fails with `ConfigurationMissing` when no client
    /// id is configured.
    pub fn authorization_request(&self) -> Res<AuthorizationRequest> {
        let client_id = self.config.client_id()?;
        let redirect_uri = self.config.redirect_uri();

        let code_verifier = utils::generate_code_verifier();
        let code_challenge = utils::generate_code_challenge(&code_verifier);
        let state = utils::generate_state();

        let url = Url::parse_with_params(
            &self.config.spotify_auth_url,
            &[
                ("client_id", client_id),
                ("response_type", "code"),
                ("redirect_uri", redirect_uri.as_str()),
                ("code_challenge", code_challenge.as_str()),
                ("code_challenge_method", "S256"),
                ("scope", self.config.scope().as_str()),
                ("state", state.as_str()),
            ],
        )
        .map_err(|e| Error::AuthFailed(format!("invalid authorization URL: {e}")))?;

        Ok(AuthorizationRequest {
            url: url.to_string(),
            redirect_uri,
            state,
            code_verifier,
        })
    }

    /// Exchanges an authorization code for tokens using the PKCE verifier.
    ///
    /// # Arguments
    ///
    /// * `code` - Authorization code from the redirect
    /// * `request` - The request that produced the code; supplies the
    ///   verifier and the redirect URI, which must match the authorize call
    ///
    /// # Errors
    ///
    /// `ConfigurationMissing` without a client id, `Provider` when the token
    /// endpoint rejects the code, `AuthFailed` when it answers without an
    /// access token.
    pub async fn exchange_code(&self, code: &str, request: &AuthorizationRequest) -> Res<TokenResponse> {
        let client_id = self.config.client_id()?;
        self.token_request(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id),
            ("code", code),
            ("code_verifier", request.code_verifier.as_str()),
            ("redirect_uri", request.redirect_uri.as_str()),
        ])
        .await
    }

    /// Exchanges a refresh token for a new access token. The response may or
    /// may not carry a rotated refresh token.
    pub async fn refresh(&self, refresh_token: &str) -> Res<TokenResponse> {
        let client_id = self.config.client_id()?;
        self.token_request(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id),
        ])
        .await
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Res<TokenResponse> {
        let response = self
            .http
            .post(&self.config.spotify_token_url)
            .form(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::provider(Service::Spotify, status, body));
        }

        let token = response.json::<TokenResponse>().await?;
        if token.access_token.is_empty() {
            return Err(Error::AuthFailed(
                "token endpoint returned no access token".to_string(),
            ));
        }

        Ok(token)
    }
}

/// Interactive authorization surface backed by the system browser.
///
/// Starts the loopback callback server, opens the authorization URL in the
/// default browser and waits for the provider to redirect back. If the user
/// never comes back within the configured timeout the attempt counts as
/// dismissed.
#[derive(Debug, Clone)]
pub struct BrowserAuthorizer {
    config: Arc<Config>,
}

impl BrowserAuthorizer {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Authorizer for BrowserAuthorizer {
    async fn authorize(&self, request: &AuthorizationRequest) -> AuthorizationResponse {
        let (result_tx, result_rx) = oneshot::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let slot = Arc::new(Mutex::new(Some(result_tx)));

        let listener = match server::bind(&self.config.server_addr).await {
            Ok(listener) => listener,
            Err(e) => {
                return AuthorizationResponse::Error(format!(
                    "cannot start callback server on {}: {}",
                    self.config.server_addr, e
                ));
            }
        };

        let server_handle = tokio::spawn(server::serve(listener, slot, shutdown_rx));

        // Open the authorization URL in the default browser
        if webbrowser::open(&request.url).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                request.url
            )
        }

        let response = match tokio::time::timeout(self.config.auth_timeout, result_rx).await {
            Ok(Ok(response)) => response,
            Ok(Err(_)) => AuthorizationResponse::Error("callback server stopped".to_string()),
            Err(_) => {
                debug!("authorization timed out");
                AuthorizationResponse::Dismissed
            }
        };

        let _ = shutdown_tx.send(());
        let _ = server_handle.await;

        response
    }
}
