use crate::{Res, info, session::AuthorizationOutcome, success, warning};

use super::{App, render};

pub async fn sign_in(app: &App) -> Res<()> {
    info!("Opening Spotify…");
    match app.session.request_interactive_authorization().await? {
        AuthorizationOutcome::Authorized { profile: Some(profile) } => {
            success!("Authentication successful!");
            render::show_profile(&profile);
        }
        AuthorizationOutcome::Authorized { profile: None } => {
            success!("Authentication successful!");
            warning!("Unable to load your profile information.");
        }
        AuthorizationOutcome::AlreadyInProgress => info!("Sign-in already in progress."),
    }
    Ok(())
}

pub async fn sign_out(app: &App) -> Res<()> {
    app.session.sign_out().await;
    success!("Signed out.");
    Ok(())
}

pub async fn whoami(app: &App) -> Res<()> {
    match app.session.profile().await {
        Some(profile) => render::show_profile(&profile),
        None if app.session.is_signed_in().await => info!("Signed in, profile unavailable."),
        None => info!("Not signed in."),
    }
    Ok(())
}
