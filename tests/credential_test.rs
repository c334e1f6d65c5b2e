use undergroundcli::session::{Credential, SKEW_MS};
use undergroundcli::types::TokenResponse;

const T: i64 = 1_700_000_000_000;

// Helper function to create a refresh response
fn create_token_response(access_token: &str, refresh_token: Option<&str>, expires_in: Option<u64>) -> TokenResponse {
    TokenResponse {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.map(str::to_string),
        expires_in,
        scope: None,
    }
}

#[test]
fn test_valid_until_skew_margin() {
    let credential = Credential::new("at", Some("rt".to_string()), 3600, T);

    assert!(!credential.is_expired_at(T));
    assert!(!credential.is_expired_at(T + 3_539_999));

    // 60s before nominal expiry the credential already counts as expired
    assert_eq!(SKEW_MS, 60_000);
    assert!(credential.is_expired_at(T + 3_540_000));
    assert!(credential.is_expired_at(T + 3_599_000));
}

#[test]
fn test_short_lifetime_is_expired_immediately() {
    let credential = Credential::new("at", None, 30, T);
    assert!(credential.is_expired_at(T));
}

#[test]
fn test_from_response_defaults() {
    let credential = Credential::from_response(create_token_response("at", Some(""), None), T);

    // empty refresh token counts as absent, missing lifetime is one hour
    assert_eq!(credential.refresh_token(), None);
    assert_eq!(credential.expires_in(), 3600);
    assert_eq!(credential.issued_at(), T);
}

#[test]
fn test_refreshed_keeps_previous_refresh_token() {
    let credential = Credential::new("at", Some("rt_abc".to_string()), 3600, T);

    let next = credential.refreshed(create_token_response("at2", None, Some(1800)), T + 10);

    assert_eq!(next.access_token(), "at2");
    assert_eq!(next.refresh_token(), Some("rt_abc"));
    assert_eq!(next.expires_in(), 1800);
    assert_eq!(next.issued_at(), T + 10);

    // the original value is untouched
    assert_eq!(credential.access_token(), "at");
}

#[test]
fn test_refreshed_adopts_rotated_refresh_token() {
    let credential = Credential::new("at", Some("rt_old".to_string()), 3600, T);
    let next = credential.refreshed(create_token_response("at2", Some("rt_new"), None), T);
    assert_eq!(next.refresh_token(), Some("rt_new"));
}

#[test]
fn test_debug_hides_tokens() {
    let credential = Credential::new("secret-at", Some("secret-rt".to_string()), 3600, T);
    let out = format!("{:?}", credential);

    assert!(!out.contains("secret"));
    assert!(out.contains("[REDACTED]"));
}
