//! Catalog tests against mock upstreams.
//!
//! Every upstream is pointed at one `wiremock` server; the adapters are told
//! apart by request path.

use kudo_catalog::{Catalog, CatalogError, LyricsOutcome, UpstreamConfig};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn catalog_for(server: &MockServer) -> Catalog {
    Catalog::new(&UpstreamConfig::with_base_url(&server.uri())).unwrap()
}

fn saavn_track(id: &str, name: &str, artist: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "primaryArtists": artist,
        "duration": "215",
        "image": [{"quality": "150x150", "link": format!("https://c.saavncdn.com/{}-150x150.jpg", id)}],
        "downloadUrl": [
            {"quality": "96kbps", "link": format!("https://aac.saavncdn.com/{}_96.mp4", id)},
            {"quality": "320kbps", "link": format!("https://aac.saavncdn.com/{}_320.mp4", id)}
        ]
    })
}

fn freefy_track(id: u64, name: &str, artist: &str, video: &str) -> Value {
    json!({
        "model_type": "track",
        "id": id,
        "name": name,
        "duration": 200_000,
        "src": format!("https://www.youtube.com/watch?v={}", video),
        "artists": [{"name": artist}]
    })
}

fn discover_channel() -> Value {
    json!({
        "channel": {
            "name": "Discover",
            "content": {"data": [
                freefy_track(1, "Blinding Lights", "The Weeknd", "4NRXx6U8ABQ"),
                freefy_track(2, "Levitating", "Dua Lipa", "TUVcZfQe-Kw"),
                freefy_track(3, "Save Your Tears", "The Weeknd", "XXYlFuWEuKI")
            ]}
        }
    })
}

// =============================================================================
// Songs: search mode
// =============================================================================

mod search {
    use super::*;

    #[tokio::test]
    async fn test_search_uses_saavn_and_dedups() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/songs"))
            .and(query_param("query", "arijit singh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "SUCCESS",
                "data": {"results": [
                    saavn_track("k1", "Kesariya", "Arijit Singh"),
                    saavn_track("t1", "Tum Hi Ho", "Arijit Singh"),
                    saavn_track("k1", "Kesariya", "Arijit Singh")
                ]}
            })))
            .mount(&server)
            .await;

        let page = catalog_for(&server).songs(Some("arijit singh"), None, None).await;

        assert_eq!(page.source, "search");
        assert_eq!(page.songs.len(), 2);
        assert_eq!(page.songs[0].id, "k1");
        assert_eq!(page.songs[0].audio_url.as_deref(), Some("https://aac.saavncdn.com/k1_320.mp4"));
        assert_eq!(page.songs[0].image, "https://c.saavncdn.com/k1-500x500.jpg");
    }

    #[tokio::test]
    async fn test_html_response_falls_back_to_discover_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/songs"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<!DOCTYPE html><html>blocked</html>"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/channel/discover"))
            .respond_with(ResponseTemplate::new(200).set_body_json(discover_channel()))
            .mount(&server)
            .await;

        let page = catalog_for(&server).songs(Some("weeknd"), None, None).await;

        assert_eq!(page.source, "search");
        let titles: Vec<_> = page.songs.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Blinding Lights", "Save Your Tears"]);
        assert!(page.songs.iter().all(|s| s.youtube_id.is_some()));
    }

    #[tokio::test]
    async fn test_unrecognized_shape_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/songs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "quota exceeded"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/channel/discover"))
            .respond_with(ResponseTemplate::new(200).set_body_json(discover_channel()))
            .mount(&server)
            .await;

        let songs = catalog_for(&server).search("dua", 30).await.unwrap();
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].artist, "Dua Lipa");
    }

    #[tokio::test]
    async fn test_all_upstreams_down_yields_empty_page() {
        let server = MockServer::start().await;

        let page = catalog_for(&server).songs(Some("anything"), None, None).await;
        assert!(page.songs.is_empty());
        assert_eq!(page.source, "search");
    }

    #[tokio::test]
    async fn test_limit_is_applied_after_dedup() {
        let server = MockServer::start().await;
        let tracks: Vec<Value> = (0..5)
            .map(|i| saavn_track(&format!("s{}", i), &format!("Song {}", i), "Artist"))
            .collect();
        Mock::given(method("GET"))
            .and(path("/search/songs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": tracks})))
            .mount(&server)
            .await;

        let page = catalog_for(&server).songs(Some("song"), None, Some(3)).await;
        assert_eq!(page.songs.len(), 3);
    }
}

// =============================================================================
// Songs: channel mode
// =============================================================================

mod channels {
    use super::*;

    #[tokio::test]
    async fn test_popular_channel() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/channel/popular-tracks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(discover_channel()))
            .mount(&server)
            .await;

        let page = catalog_for(&server).songs(None, Some("popular"), None).await;
        assert_eq!(page.source, "popular");
        assert_eq!(page.songs.len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_channel_serves_discover() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/channel/discover"))
            .respond_with(ResponseTemplate::new(200).set_body_json(discover_channel()))
            .mount(&server)
            .await;

        let page = catalog_for(&server).songs(None, Some("lofi-beats"), None).await;
        assert_eq!(page.source, "discover");
        assert_eq!(page.songs.len(), 3);
    }

    #[tokio::test]
    async fn test_default_is_trending_sample() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/songs"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"results": [
                    saavn_track("a", "Song A", "Artist"),
                    saavn_track("b", "Song B", "Artist")
                ]}
            })))
            .expect(5)
            .mount(&server)
            .await;

        let page = catalog_for(&server).songs(None, None, None).await;

        assert_eq!(page.source, "trending");
        let mut ids: Vec<_> = page.songs.iter().map(|s| s.id.clone()).collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_blank_query_is_channel_mode() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/channel/new-releases"))
            .respond_with(ResponseTemplate::new(200).set_body_json(discover_channel()))
            .mount(&server)
            .await;

        let page = catalog_for(&server).songs(Some("   "), Some("new-releases"), None).await;
        assert_eq!(page.source, "new-releases");
        assert_eq!(page.songs.len(), 3);
    }
}

// =============================================================================
// Lyrics
// =============================================================================

mod lyrics {
    use super::*;

    #[tokio::test]
    async fn test_exact_synced_lyrics() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/get"))
            .and(query_param("artist_name", "The Weeknd"))
            .and(query_param("track_name", "Starboy"))
            .and(query_param("duration", "230"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "syncedLyrics": "[00:10.50]I'm tryna put you in the worst mood\n[00:05.00]Intro",
                "plainLyrics": "Intro\nI'm tryna put you in the worst mood"
            })))
            .mount(&server)
            .await;

        let outcome = catalog_for(&server).lyrics("Starboy", "The Weeknd", Some(230)).await.unwrap();

        let LyricsOutcome::Synced(lines) = outcome else {
            panic!("Expected synced lyrics");
        };
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Intro");
        assert_eq!(lines[1].time, 10.5);
    }

    #[tokio::test]
    async fn test_exact_miss_falls_back_to_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/get"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"code": 404})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .and(query_param("q", "The Weeknd Starboy"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"plainLyrics": "plain only"},
                {"syncedLyrics": "[00:01.00]synced line", "plainLyrics": "synced line"}
            ])))
            .mount(&server)
            .await;

        let outcome = catalog_for(&server).lyrics("Starboy", "The Weeknd", None).await.unwrap();
        assert!(matches!(outcome, LyricsOutcome::Synced(ref lines) if lines[0].text == "synced line"));
    }

    #[tokio::test]
    async fn test_plain_lyrics() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/get"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "syncedLyrics": null,
                "plainLyrics": "Line one\nLine two"
            })))
            .mount(&server)
            .await;

        let outcome = catalog_for(&server).lyrics("Song", "Artist", None).await.unwrap();
        assert_eq!(outcome, LyricsOutcome::Plain("Line one\nLine two".to_string()));
    }

    #[tokio::test]
    async fn test_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let outcome = catalog_for(&server).lyrics("Unknown", "Nobody", None).await.unwrap();
        assert_eq!(outcome, LyricsOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_transport_failure_is_error() {
        let catalog = Catalog::new(&UpstreamConfig::with_base_url("http://127.0.0.1:1")).unwrap();

        let result = catalog.lyrics("Song", "Artist", None).await;
        assert!(matches!(result, Err(CatalogError::Request(_))));
    }

    #[tokio::test]
    async fn test_missing_title_rejected() {
        let server = MockServer::start().await;
        let result = catalog_for(&server).lyrics("", "Artist", None).await;
        assert!(matches!(result, Err(CatalogError::InvalidInput(_))));
    }
}

// =============================================================================
// YouTube resolution
// =============================================================================

mod youtube {
    use super::*;

    async fn mount_track(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/v1/tracks/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "track": {"id": 42, "name": "Starboy", "artists": [{"name": "The Weeknd"}, {"name": "Daft Punk"}]}
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_resolves_via_piped() {
        let server = MockServer::start().await;
        mount_track(&server).await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "The Weeknd Starboy"))
            .and(query_param("filter", "music_songs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{"url": "/watch?v=34Na4j8AVgA", "title": "Starboy"}]
            })))
            .mount(&server)
            .await;

        let found = catalog_for(&server).resolve_youtube("42").await.unwrap();

        assert_eq!(found.youtube_id.as_deref(), Some("34Na4j8AVgA"));
        assert_eq!(found.search_query, "The Weeknd Starboy");
        assert_eq!(found.track_name, "Starboy");
        assert_eq!(found.artist_name, "The Weeknd");
        assert_eq!(found.freefy_id, "42");
    }

    #[tokio::test]
    async fn test_falls_back_to_results_page() {
        let server = MockServer::start().await;
        mount_track(&server).await;
        Mock::given(method("GET"))
            .and(path("/results"))
            .and(query_param("search_query", "The Weeknd Starboy official audio"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<html><script>var data = {"videoId":"34Na4j8AVgA","title":"Starboy"};</script></html>"#,
            ))
            .mount(&server)
            .await;

        let found = catalog_for(&server).resolve_youtube("42").await.unwrap();
        assert_eq!(found.youtube_id.as_deref(), Some("34Na4j8AVgA"));
    }

    #[tokio::test]
    async fn test_no_match_is_not_an_error() {
        let server = MockServer::start().await;
        mount_track(&server).await;

        let found = catalog_for(&server).resolve_youtube("42").await.unwrap();
        assert_eq!(found.youtube_id, None);
        assert_eq!(found.track_name, "Starboy");
    }

    #[tokio::test]
    async fn test_unknown_track_is_error() {
        let server = MockServer::start().await;

        let result = catalog_for(&server).resolve_youtube("999").await;
        assert!(matches!(result, Err(CatalogError::Upstream { status: 404, .. })));
    }
}

// =============================================================================
// Playlist import
// =============================================================================

mod import {
    use super::*;

    const PLAYLIST_ID: &str = "37i9dQZF1DXcBWIGoYBM5M";

    #[tokio::test]
    async fn test_imports_from_second_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/channel/{}", PLAYLIST_ID)))
            .respond_with(ResponseTemplate::new(200).set_body_string("<!DOCTYPE html><html></html>"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/playlists/{}", PLAYLIST_ID)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "playlist": {
                    "name": "Today's Top Hits",
                    "image": "https://i.scdn.co/image/top.jpg",
                    "tracks": {"data": [
                        freefy_track(1, "Blinding Lights", "The Weeknd", "4NRXx6U8ABQ"),
                        {"id": 9, "name": "No Video", "src": "https://cdn.example.com/a.mp3"}
                    ]}
                }
            })))
            .mount(&server)
            .await;

        let url = format!("https://open.spotify.com/playlist/{}?si=share", PLAYLIST_ID);
        let import = catalog_for(&server).import_playlist(&url).await.unwrap();

        assert_eq!(import.songs.len(), 1);
        assert_eq!(import.songs[0].youtube_id.as_deref(), Some("4NRXx6U8ABQ"));
        assert_eq!(import.playlist.name, "Today's Top Hits");
        assert_eq!(import.playlist.description, "");
        assert_eq!(import.playlist.image.as_deref(), Some("https://i.scdn.co/image/top.jpg"));
        assert!(import.note.is_none());
    }

    #[tokio::test]
    async fn test_falls_back_to_discover() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/channel/discover"))
            .respond_with(ResponseTemplate::new(200).set_body_json(discover_channel()))
            .mount(&server)
            .await;

        let import = catalog_for(&server).import_playlist(PLAYLIST_ID).await.unwrap();

        assert_eq!(import.songs.len(), 3);
        assert_eq!(import.playlist.name, "Imported Playlist");
        assert_eq!(import.playlist.description, "Songs from Kudo");
        assert!(import.note.unwrap().contains("popular songs"));
    }

    #[tokio::test]
    async fn test_caps_at_fifty_songs() {
        let server = MockServer::start().await;
        let tracks: Vec<Value> = (0..60)
            .map(|i| freefy_track(i, &format!("Song {}", i), "Artist", &format!("video{:06}", i)))
            .collect();
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/channel/{}", PLAYLIST_ID)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": tracks})))
            .mount(&server)
            .await;

        let import = catalog_for(&server).import_playlist(PLAYLIST_ID).await.unwrap();
        assert_eq!(import.songs.len(), 50);
    }

    #[tokio::test]
    async fn test_everything_unavailable() {
        let server = MockServer::start().await;

        let result = catalog_for(&server).import_playlist(PLAYLIST_ID).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_empty_id_rejected_without_requests() {
        let server = MockServer::start().await;

        let result = catalog_for(&server).import_playlist("   ").await;
        assert!(matches!(result, Err(CatalogError::InvalidInput(_))));
    }
}
