use std::fmt;

use async_trait::async_trait;

/// A prepared authorization-code-with-PKCE request.
#[derive(Clone)]
pub struct AuthorizationRequest {
    /// Fully built authorize URL the user has to visit.
    pub url: String,
    pub redirect_uri: String,
    /// Value the provider must echo back on the redirect.
    pub state: String,
    pub(crate) code_verifier: String,
}

impl fmt::Debug for AuthorizationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizationRequest")
            .field("url", &self.url)
            .field("redirect_uri", &self.redirect_uri)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// What came back from the authorization surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationResponse {
    Success { code: String, state: Option<String> },
    /// The user closed the surface, refused consent, or never returned.
    Dismissed,
    Error(String),
}

/// The external surface (browser, system view) where the user grants access.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn authorize(&self, request: &AuthorizationRequest) -> AuthorizationResponse;
}
