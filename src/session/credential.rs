use std::fmt;

use crate::{config::DEFAULT_TOKEN_LIFETIME_SECS, types::TokenResponse};

/// Safety margin subtracted from the nominal token lifetime so a credential is
/// refreshed before the provider would reject it.
pub const SKEW_MS: i64 = 60_000;

/// An issued access/refresh token pair and its expiry bookkeeping.
///
/// Credentials are immutable. A refresh produces a new value through
/// [`Credential::refreshed`] and the old one is dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    access_token: String,
    refresh_token: Option<String>,
    scope: Option<String>,
    expires_in: u64,
    issued_at: i64,
}

impl Credential {
    /// `expires_in` is in seconds, `issued_at` in milliseconds since the epoch.
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_in: u64,
        issued_at: i64,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
            scope: None,
            expires_in,
            issued_at,
        }
    }

    /// Builds the credential for an accepted code exchange.
    pub fn from_response(response: TokenResponse, issued_at: i64) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token.filter(|t| !t.is_empty()),
            scope: response.scope,
            expires_in: response.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS),
            issued_at,
        }
    }

    /// Builds the replacement for this credential from a refresh response.
    /// The previous refresh token is kept when the provider does not rotate it.
    pub fn refreshed(&self, response: TokenResponse, issued_at: i64) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response
                .refresh_token
                .filter(|t| !t.is_empty())
                .or_else(|| self.refresh_token.clone()),
            scope: response.scope.or_else(|| self.scope.clone()),
            expires_in: response.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS),
            issued_at,
        }
    }

    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms - self.issued_at >= self.lifetime_ms() - SKEW_MS
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }

    pub fn issued_at(&self) -> i64 {
        self.issued_at
    }

    fn lifetime_ms(&self) -> i64 {
        i64::try_from(self.expires_in)
            .unwrap_or(i64::MAX / 1000)
            .saturating_mul(1000)
    }
}

// Token values never show up in logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"[REDACTED]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("scope", &self.scope)
            .field("expires_in", &self.expires_in)
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

