//! Kudo Server Library
//!
//! HTTP API for Kudo: song listings and search over third-party catalogs,
//! lyrics, YouTube resolution, playlist import, and email/password accounts
//! with one-time signup codes.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{AuthService, Mailer, OtpService, ResendMailer};
pub use state::AppState;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the application router, everything mounted under `/api`
pub fn create_router(app_state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        // Catalog
        .route("/songs", get(api::songs::list_songs))
        .route("/lyrics", get(api::lyrics::get_lyrics))
        .route("/youtube/:catalog_id", get(api::youtube::resolve_video))
        .route("/spotify-import", get(api::spotify_import::import_playlist))
        // Accounts
        .route("/auth/signup", post(api::auth::signup))
        .route("/auth/send-otp", post(api::auth::send_otp))
        .route("/auth/verify-otp", post(api::auth::verify_otp))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/refresh", post(api::auth::refresh));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/auth/session", get(api::auth::session))
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&app_state.auth_service),
            middleware::auth_middleware,
        ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
