//! Recommendation queries end to end, with Spotify and Last.fm served by the
//! same wiremock instance.

use serde_json::{Value, json};
use undergroundcli::{
    discover::{self, MAX_PICKS},
    error::{Error, Service},
    lastfm::LastFmClient,
    spotify::SpotifyClient,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-access-token";

fn artist_json(id: &str, popularity: u32) -> Value {
    json!({
        "id": id,
        "name": format!("Artist {}", id),
        "popularity": popularity,
        "genres": [],
        "images": []
    })
}

fn lastfm_client(server: &MockServer) -> LastFmClient {
    LastFmClient::new(format!("{}/2.0/", server.uri()), Some("lfm-key".to_string()))
}

async fn mount_top_artists(server: &MockServer, names: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/2.0/"))
        .and(query_param("method", "user.gettopartists"))
        .and(query_param("user", "listener"))
        .and(query_param("api_key", "lfm-key"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "topartists": {
                "artist": names
                    .iter()
                    .map(|n| json!({ "name": n, "playcount": "100" }))
                    .collect::<Vec<_>>()
            }
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_search(server: &MockServer, query: &str, hits: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("type", "artist"))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "artists": { "items": hits, "next": null }
        })))
        .mount(server)
        .await;
}

async fn mount_related(server: &MockServer, artist_id: &str, related: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(format!("/artists/{}/related-artists", artist_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "artists": related })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_lastfm_picks_deduplicate_in_order() {
    let server = MockServer::start().await;
    mount_top_artists(&server, &["Alpha", "Unknown", "Beta"]).await;
    mount_search(&server, "Alpha", vec![artist_json("alpha", 70), artist_json("other", 10)]).await;
    mount_search(&server, "Unknown", vec![]).await;
    mount_search(&server, "Beta", vec![artist_json("beta", 50)]).await;
    mount_related(
        &server,
        "alpha",
        vec![artist_json("x1", 10), artist_json("pop", 80), artist_json("x2", 20)],
    )
    .await;
    mount_related(&server, "beta", vec![artist_json("x2", 20), artist_json("x3", 30)]).await;

    let spotify = SpotifyClient::new(server.uri());
    let picks = discover::lastfm_underground_picks(&spotify, &lastfm_client(&server), TOKEN, "listener")
        .await
        .unwrap();

    let ids: Vec<&str> = picks.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["x1", "x2", "x3"]);
}

#[tokio::test]
async fn test_lastfm_picks_are_capped() {
    let server = MockServer::start().await;
    mount_top_artists(&server, &["Alpha", "Beta"]).await;
    mount_search(&server, "Alpha", vec![artist_json("alpha", 70)]).await;
    mount_search(&server, "Beta", vec![artist_json("beta", 70)]).await;
    mount_related(
        &server,
        "alpha",
        (0..15).map(|i| artist_json(&format!("a{}", i), 10)).collect(),
    )
    .await;
    mount_related(
        &server,
        "beta",
        (0..15).map(|i| artist_json(&format!("b{}", i), 10)).collect(),
    )
    .await;

    let spotify = SpotifyClient::new(server.uri());
    let picks = discover::lastfm_underground_picks(&spotify, &lastfm_client(&server), TOKEN, "listener")
        .await
        .unwrap();

    assert_eq!(picks.len(), MAX_PICKS);
    assert_eq!(picks[0].id, "a0");
    assert_eq!(picks[15].id, "b0");
}

#[tokio::test]
async fn test_lastfm_without_api_key_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let spotify = SpotifyClient::new(server.uri());
    let lastfm = LastFmClient::new(format!("{}/2.0/", server.uri()), None);
    let result = discover::lastfm_underground_picks(&spotify, &lastfm, TOKEN, "listener").await;

    assert!(matches!(result, Err(Error::ConfigurationMissing("LASTFM_API_KEY"))));
}

#[tokio::test]
async fn test_lastfm_error_payload_is_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2.0/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": 6,
            "message": "User not found"
        })))
        .mount(&server)
        .await;

    let result = lastfm_client(&server).get_user_top_artists("ghost", 10).await;

    match result {
        Err(Error::Provider { service, body, .. }) => {
            assert_eq!(service, Service::LastFm);
            assert!(body.contains("User not found"));
        }
        other => panic!("expected Last.fm provider error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_blank_username_is_missing_input() {
    let server = MockServer::start().await;
    let spotify = SpotifyClient::new(server.uri());

    let result = discover::lastfm_underground_picks(&spotify, &lastfm_client(&server), TOKEN, "   ").await;

    assert!(matches!(result, Err(Error::MissingInput(_))));
}

#[tokio::test]
async fn test_related_underground_uses_first_match() {
    let server = MockServer::start().await;
    mount_search(&server, "Slowdive", vec![artist_json("sd", 65), artist_json("sd2", 5)]).await;
    mount_related(&server, "sd", vec![artist_json("r1", 25), artist_json("r2", 45)]).await;

    let spotify = SpotifyClient::new(server.uri());
    let related = discover::related_underground_artists(&spotify, TOKEN, "Slowdive")
        .await
        .unwrap();

    assert_eq!(related.len(), 1);
    assert_eq!(related[0].id, "r1");
}

#[tokio::test]
async fn test_related_underground_without_match() {
    let server = MockServer::start().await;
    mount_search(&server, "zzzz", vec![]).await;

    let spotify = SpotifyClient::new(server.uri());
    let result = discover::related_underground_artists(&spotify, TOKEN, "zzzz").await;

    let Err(Error::EmptyResult(message)) = result else {
        panic!("expected an empty result notice");
    };
    assert_eq!(message, "No artists found. Try another search.");
}

#[tokio::test]
async fn test_hidden_gems() {
    let server = MockServer::start().await;
    mount_search(&server, "Radiohead", vec![artist_json("rh", 85)]).await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("type", "track"))
        .and(query_param("q", "artist:\"Artist rh\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": {
                "items": [
                    { "id": "t1", "name": "Hit", "popularity": 88, "artists": [] },
                    { "id": "t2", "name": "B-side", "popularity": 31, "artists": [] }
                ],
                "next": null
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let spotify = SpotifyClient::new(server.uri());
    let gems = discover::hidden_gems(&spotify, TOKEN, "Radiohead").await.unwrap();

    assert_eq!(gems.artist.id, "rh");
    assert_eq!(gems.underground_tracks.len(), 1);
    assert_eq!(gems.underground_tracks[0].name, "B-side");
}

#[tokio::test]
async fn test_hidden_gems_without_artist() {
    let server = MockServer::start().await;
    mount_search(&server, "nobody", vec![]).await;

    let spotify = SpotifyClient::new(server.uri());
    let result = discover::hidden_gems(&spotify, TOKEN, "nobody").await;

    assert!(matches!(result, Err(Error::EmptyResult(_))));
}

#[tokio::test]
async fn test_provider_errors_pass_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let spotify = SpotifyClient::new(server.uri());
    let result = discover::related_underground_artists(&spotify, TOKEN, "anyone").await;

    assert!(matches!(
        result,
        Err(Error::Provider {
            service: Service::Spotify,
            status: 503,
            ..
        })
    ));
}
