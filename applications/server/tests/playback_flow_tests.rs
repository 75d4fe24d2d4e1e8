/// End-to-end playback flow tests
/// Songs come out of the HTTP API and are played through the client
/// playback core against a recording media backend
mod common;

use axum::http::StatusCode;
use common::{fixtures, TestApp};
use kudo_catalog::{Catalog, UpstreamConfig};
use kudo_core::{AudioRef, Song};
use kudo_playback::{
    run_continuation, sample_songs, Advance, ContinuationOutcome, MediaBackend, MediaEvent,
    PlaybackSurface, PlayerStore, Result, SurfaceOutcome,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[derive(Debug, Default)]
struct RecordingBackend {
    loaded: Option<AudioRef>,
    playing: bool,
}

impl MediaBackend for RecordingBackend {
    fn load(&mut self, audio: &AudioRef) -> Result<()> {
        self.loaded = Some(audio.clone());
        self.playing = false;
        Ok(())
    }

    fn unload(&mut self) {
        self.loaded = None;
        self.playing = false;
    }

    fn play(&mut self) -> Result<()> {
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.playing = false;
        Ok(())
    }

    fn set_volume(&mut self, _volume: u8) {}

    fn seek(&mut self, _position: f64) -> Result<()> {
        Ok(())
    }

    fn current_time(&self) -> Option<f64> {
        None
    }

    fn duration(&self) -> Option<f64> {
        None
    }
}

async fn mount_arijit_search(app: &TestApp) {
    Mock::given(method("GET"))
        .and(path("/search/songs"))
        .and(query_param("query", "arijit singh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::saavn_results(vec![
            fixtures::saavn_track("k1", "Kesariya", "Arijit Singh"),
            fixtures::saavn_track("t1", "Tum Hi Ho", "Arijit Singh"),
            fixtures::saavn_track("c1", "Channa Mereya", "Arijit Singh"),
        ])))
        .mount(&app.upstream)
        .await;
}

async fn search(app: &TestApp, uri: &str) -> Vec<Song> {
    let (status, body) = app.get(uri).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_value(body["songs"].clone()).unwrap()
}

#[tokio::test]
async fn test_search_then_play_first_result() {
    let app = TestApp::new().await;
    mount_arijit_search(&app).await;

    let songs = search(&app, "/api/songs?q=arijit%20singh&limit=1").await;
    assert_eq!(songs.len(), 1);

    let mut store = PlayerStore::default();
    let mut surface = PlaybackSurface::new(RecordingBackend::default());

    store.set_last_search_query("arijit singh");
    store.play_song(songs[0].clone());
    surface.sync(&mut store);

    assert!(store.is_loading());
    assert_eq!(
        surface.backend().loaded,
        Some(AudioRef::Direct("https://aac.saavncdn.com/k1_320.mp4".to_string()))
    );

    let outcome = surface.handle_event(&mut store, MediaEvent::Ready { duration: 240.0 });

    assert_eq!(outcome, SurfaceOutcome::Ready);
    assert!(store.is_playing());
    assert!(!store.is_loading());
    assert!(surface.backend().playing);
    assert_eq!(store.current_song().unwrap().title, "Kesariya");
}

#[tokio::test]
async fn test_track_end_runs_auto_play_continuation() {
    let app = TestApp::new().await;
    mount_arijit_search(&app).await;

    let songs = search(&app, "/api/songs?q=arijit%20singh&limit=1").await;

    let mut store = PlayerStore::default();
    let mut surface = PlaybackSurface::new(RecordingBackend::default());
    store.set_last_search_query("arijit singh");
    store.play_song(songs[0].clone());
    surface.sync(&mut store);
    surface.handle_event(&mut store, MediaEvent::Ready { duration: 240.0 });

    let outcome = surface.handle_event(&mut store, MediaEvent::Ended);
    assert_eq!(outcome, SurfaceOutcome::Advanced(Advance::Exhausted));
    assert!(!store.is_playing());

    // The client searches the same catalog the API serves
    let catalog = Catalog::new(&UpstreamConfig::with_base_url(&app.upstream.uri())).unwrap();
    let outcome = run_continuation(&mut store, &catalog, &sample_songs()).await;

    // Kesariya was already played and is skipped
    assert_eq!(outcome, Some(ContinuationOutcome::Enqueued(2)));
    assert_eq!(store.current_song().unwrap().id, "t1");
    assert_eq!(store.queue_len(), 1);
    assert!(store.is_playing());

    surface.sync(&mut store);
    assert_eq!(
        surface.backend().loaded,
        Some(AudioRef::Direct("https://aac.saavncdn.com/t1_320.mp4".to_string()))
    );
}

#[tokio::test]
async fn test_channel_song_plays_through_youtube() {
    let app = TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/channel/popular-tracks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "channel": {"content": {"data": [
                fixtures::freefy_track(42, "Starboy", "The Weeknd", "34Na4j8AVgA")
            ]}}
        })))
        .mount(&app.upstream)
        .await;

    let songs = search(&app, "/api/songs?channel=popular").await;
    assert_eq!(songs.len(), 1);
    assert!(songs[0].audio_url.is_none());

    let mut store = PlayerStore::default();
    let mut surface = PlaybackSurface::new(RecordingBackend::default());
    store.play_song(songs[0].clone());
    surface.sync(&mut store);

    assert_eq!(
        surface.backend().loaded,
        Some(AudioRef::YouTube("34Na4j8AVgA".to_string()))
    );

    surface.handle_event(&mut store, MediaEvent::Ready { duration: 230.0 });
    assert!(surface.backend().playing);
}
