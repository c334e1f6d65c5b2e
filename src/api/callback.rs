use std::sync::Arc;

use axum::{Extension, extract::Query, response::Html};
use serde::Deserialize;
use tokio::sync::{Mutex, oneshot};

use crate::session::AuthorizationResponse;

/// One-shot channel the callback handler uses to hand the redirect result
/// back to the waiting authorizer. Only the first redirect is delivered.
pub type CallbackSlot = Arc<Mutex<Option<oneshot::Sender<AuthorizationResponse>>>>;

/// Query parameters the authorization server appends to the redirect URI.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

impl CallbackParams {
    /// Maps the redirect onto the authorization outcome. A denied consent
    /// screen is a dismissal, not an error.
    pub fn into_response(self) -> AuthorizationResponse {
        match (self.code, self.error) {
            (_, Some(error)) if error == "access_denied" => AuthorizationResponse::Dismissed,
            (_, Some(error)) => AuthorizationResponse::Error(error),
            (Some(code), None) => AuthorizationResponse::Success {
                code,
                state: self.state,
            },
            (None, None) => AuthorizationResponse::Error("missing authorization code".to_string()),
        }
    }
}

pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(slot): Extension<CallbackSlot>,
) -> Html<&'static str> {
    let response = params.into_response();
    let page = match &response {
        AuthorizationResponse::Success { .. } => {
            Html("<h2>Authentication successful.</h2><p>Close this browser window.</p>")
        }
        AuthorizationResponse::Dismissed => Html("<h4>Login cancelled.</h4>"),
        AuthorizationResponse::Error(_) => Html("<h4>Login failed.</h4>"),
    };

    let Some(sender) = slot.lock().await.take() else {
        return Html("<h4>Login already handled.</h4>");
    };
    let _ = sender.send(response);

    page
}
