//! Kudo - Catalog
//!
//! Adapters for the third-party upstreams behind Kudo's song listings:
//!
//! - JioSaavn mirror for search and the trending channel
//! - Freefy for named channels, track lookup and playlist import
//! - LRCLIB for synced and plain lyrics
//! - Piped and YouTube for resolving tracks to video ids
//!
//! Every upstream's response-shape knowledge stays in its own module; the
//! [`Catalog`] facade merges, deduplicates and truncates.
//!
//! # Example
//!
//! ```rust,no_run
//! use kudo_catalog::{Catalog, UpstreamConfig};
//!
//! # async fn example() -> kudo_catalog::Result<()> {
//! let catalog = Catalog::new(&UpstreamConfig::default())?;
//!
//! let page = catalog.songs(Some("arijit singh"), None, Some(10)).await;
//! println!("{} songs from {}", page.songs.len(), page.source);
//! # Ok(())
//! # }
//! ```

mod catalog;
pub mod channels;
mod client;
mod config;
mod error;
pub mod freefy;
mod import;
pub mod lyrics;
pub mod merge;
pub mod saavn;
pub mod youtube;

pub use catalog::{Catalog, SongsPage, YouTubeMatch};
pub use channels::Channel;
pub use client::{UpstreamClient, APP_USER_AGENT, BROWSER_USER_AGENT};
pub use config::UpstreamConfig;
pub use error::{CatalogError, Result};
pub use import::{parse_playlist_id, PlaylistImport, PlaylistInfo, IMPORT_LIMIT};
pub use lyrics::{parse_lrc, LyricLine, LyricsOutcome};
