use crate::{Res, spotify::SpotifyClient, types::UserProfile};

/// Retrieves the profile of the user the token belongs to (`GET /me`).
pub async fn get_current_user(client: &SpotifyClient, token: &str) -> Res<UserProfile> {
    client.fetch::<UserProfile>(token, "/me", &[]).await
}
