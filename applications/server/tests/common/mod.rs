//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use kudo_catalog::{Catalog, UpstreamConfig};
use kudo_server::{create_router, AppState, AuthService, OtpService};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;
use wiremock::MockServer;

pub const TEST_SECRET: &str = "test-secret-key";

/// Router plus everything it depends on; the temp dir and mock server live
/// as long as the app
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub upstream: MockServer,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with(|state| state).await
    }

    /// Build an app, letting the caller adjust the state (mailer, OTP echo)
    pub async fn with(configure: impl FnOnce(AppState) -> AppState) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_url = format!("sqlite://{}", temp_dir.path().join("kudo.db").display());
        let pool = kudo_storage::create_pool(&db_url).await.unwrap();
        kudo_storage::run_migrations(&pool).await.unwrap();

        let upstream = MockServer::start().await;
        let catalog = Catalog::new(&UpstreamConfig::with_base_url(&upstream.uri())).unwrap();

        let auth_service = Arc::new(AuthService::new(
            TEST_SECRET.to_string(),
            1, // 1 hour access
            1, // 1 day refresh
        ));

        let state = configure(AppState::new(
            pool,
            auth_service,
            Arc::new(OtpService::new(10)),
            Arc::new(catalog),
        ));

        Self {
            router: create_router(state.clone()),
            state,
            upstream,
            _temp_dir: temp_dir,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn get_with_token(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap();
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    /// Sign up through the API and log in, returning the login response
    pub async fn signup_and_login(&self, email: &str, password: &str) -> Value {
        let (status, _) = self
            .post_json(
                "/api/auth/signup",
                json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = self
            .post_json(
                "/api/auth/login",
                json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body
    }
}

/// Upstream payload fixtures
pub mod fixtures {
    use serde_json::{json, Value};

    pub const TEST_EMAIL: &str = "asha@example.com";
    pub const TEST_PASSWORD: &str = "TestPassword123!";

    pub fn saavn_track(id: &str, name: &str, artist: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "primaryArtists": artist,
            "duration": "240",
            "image": [{"quality": "150x150", "link": format!("https://c.saavncdn.com/{}-150x150.jpg", id)}],
            "downloadUrl": [
                {"quality": "96kbps", "link": format!("https://aac.saavncdn.com/{}_96.mp4", id)},
                {"quality": "320kbps", "link": format!("https://aac.saavncdn.com/{}_320.mp4", id)}
            ]
        })
    }

    pub fn saavn_results(tracks: Vec<Value>) -> Value {
        json!({ "status": "SUCCESS", "data": { "results": tracks } })
    }

    pub fn freefy_track(id: u64, name: &str, artist: &str, video: &str) -> Value {
        json!({
            "model_type": "track",
            "id": id,
            "name": name,
            "duration": 200_000,
            "src": format!("https://www.youtube.com/watch?v={}", video),
            "artists": [{"name": artist}]
        })
    }
}
