/// API route modules
pub mod auth;
pub mod health;
pub mod lyrics;
pub mod songs;
pub mod spotify_import;
pub mod youtube;
