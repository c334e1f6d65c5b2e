use axum::{Extension, Router, routing::get};
use std::{io, net::SocketAddr, str::FromStr};
use tokio::{net::TcpListener, sync::oneshot};
use tracing::warn;

use crate::api::{self, CallbackSlot};

pub async fn bind(addr: &str) -> io::Result<TcpListener> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    TcpListener::bind(&addr).await
}

pub fn router(slot: CallbackSlot) -> Router {
    Router::new().route("/callback", get(api::callback).layer(Extension(slot)))
}

/// Serves the callback route until `shutdown` fires.
pub async fn serve(listener: TcpListener, slot: CallbackSlot, shutdown: oneshot::Receiver<()>) {
    let result = axum::serve(listener, router(slot))
        .with_graceful_shutdown(async {
            let _ = shutdown.await;
        })
        .await;

    if let Err(e) = result {
        warn!("callback server stopped: {}", e);
    }
}
