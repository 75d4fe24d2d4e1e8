//! Kudo - Playback
//!
//! Client-side playback core for Kudo.
//!
//! This crate provides:
//! - Player store (current song, transport flags, progress, volume)
//! - Play queue (front = next, shuffle picks a random index)
//! - Bounded playback history (20 songs)
//! - Repeat modes (Off, All, One)
//! - Auto-play continuation with stale-result detection
//! - Playback surface binding the store to a media backend
//!
//! # Architecture
//!
//! `kudo-playback` has no UI or HTTP dependency. The media element is
//! provided by the platform through [`MediaBackend`]; catalog lookups go
//! through [`kudo_core::SongSearch`].
//!
//! # Example: Queue and Advance
//!
//! ```rust
//! use kudo_core::Song;
//! use kudo_playback::{Advance, PlayerStore};
//!
//! let mut store = PlayerStore::default();
//! store.enqueue_many(vec![
//!     Song::new("a", "Starboy", "The Weeknd").with_audio_url("https://cdn.example.com/a.mp4"),
//!     Song::new("b", "Blinding Lights", "The Weeknd").with_audio_url("https://cdn.example.com/b.mp4"),
//! ]);
//!
//! assert_eq!(store.advance(), Advance::Promoted);
//! assert_eq!(store.current_song().unwrap().id, "a");
//! assert_eq!(store.queue_len(), 1);
//! ```
//!
//! # Example: Media Binding
//!
//! ```rust,no_run
//! use kudo_core::AudioRef;
//! use kudo_playback::{MediaBackend, MediaEvent, PlaybackSurface, PlayerStore, Result};
//!
//! struct AudioElement;
//!
//! impl MediaBackend for AudioElement {
//!     fn load(&mut self, _audio: &AudioRef) -> Result<()> { Ok(()) }
//!     fn unload(&mut self) {}
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) -> Result<()> { Ok(()) }
//!     fn set_volume(&mut self, _volume: u8) {}
//!     fn seek(&mut self, _position: f64) -> Result<()> { Ok(()) }
//!     fn current_time(&self) -> Option<f64> { None }
//!     fn duration(&self) -> Option<f64> { None }
//! }
//!
//! let mut store = PlayerStore::default();
//! let mut surface = PlaybackSurface::new(AudioElement);
//! surface.sync(&mut store);
//! surface.handle_event(&mut store, MediaEvent::Ready { duration: 180.0 });
//! ```

mod continuation;
mod error;
mod events;
mod history;
mod queue;
mod samples;
mod store;
mod surface;
pub mod types;

// Public exports
pub use continuation::{run_continuation, ContinuationOutcome, ContinuationRequest};
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use samples::sample_songs;
pub use store::PlayerStore;
pub use surface::{MediaBackend, MediaEvent, PlaybackSurface, SurfaceOutcome};
pub use types::{Advance, GoBack, PlayerConfig, RepeatMode};
