//! Playback surface - binds the player store to a media backend
//!
//! The surface is the only code that talks to the media element. It applies
//! store changes as backend commands (`sync`), feeds backend events back into
//! the store (`handle_event`) and samples progress while playing (`tick`).

use crate::{
    error::Result,
    store::PlayerStore,
    types::{Advance, RepeatMode},
};
use kudo_core::AudioRef;
use std::time::Duration;
use tracing::{debug, warn};

/// Platform media backend
///
/// An audio element for direct URLs or an embedded video player for YouTube
/// ids. Positions and durations are in seconds.
pub trait MediaBackend {
    /// Start a new media session for `audio`
    fn load(&mut self, audio: &AudioRef) -> Result<()>;

    /// Tear down the current session
    fn unload(&mut self);

    fn play(&mut self) -> Result<()>;

    fn pause(&mut self) -> Result<()>;

    /// Set volume (0-100)
    fn set_volume(&mut self, volume: u8);

    fn seek(&mut self, position: f64) -> Result<()>;

    /// Current playback position, if a session is active
    fn current_time(&self) -> Option<f64>;

    /// Reported media duration, if known
    fn duration(&self) -> Option<f64>;
}

/// Events reported by the media backend
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Metadata loaded
    Ready { duration: f64 },
    /// Backend-native timing update
    TimeUpdate(f64),
    Playing,
    Paused,
    Buffering,
    Ended,
    Error(String),
}

/// What handling a media event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceOutcome {
    /// Store updated, nothing else to do
    Updated,
    /// Event did not apply to the active session
    Ignored,
    /// Media is ready; playback started if requested
    Ready,
    /// Track ended under repeat=one and restarted
    Restarted,
    /// Track ended and the store advanced
    ///
    /// `Advance::Exhausted` means the caller should run auto-play continuation.
    Advanced(Advance),
    /// Backend failed; loading cleared and playback stopped
    Failed,
}

#[derive(Debug, Clone)]
struct Session {
    generation: u64,
    audio: AudioRef,
    ready: bool,
}

/// Binding between a [`PlayerStore`] and a [`MediaBackend`]
pub struct PlaybackSurface<B: MediaBackend> {
    backend: B,
    session: Option<Session>,
    applied_playing: bool,
    applied_volume: Option<u8>,
    applied_restart: u64,
    poll_interval: Duration,
}

impl<B: MediaBackend> PlaybackSurface<B> {
    pub fn new(backend: B) -> Self {
        Self::with_poll_interval(backend, Duration::from_millis(500))
    }

    pub fn with_poll_interval(backend: B, poll_interval: Duration) -> Self {
        Self {
            backend,
            session: None,
            applied_playing: false,
            applied_volume: None,
            applied_restart: 0,
            poll_interval,
        }
    }

    /// Interval at which the caller should invoke [`tick`](Self::tick)
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Whether a session is loaded for the store's current track
    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }

    /// Apply store changes to the backend
    ///
    /// A new current song (or a newly resolved audio reference) reloads the
    /// session. Restarts seek the loaded media back to the store position.
    /// Play/pause and volume changes are applied in place.
    pub fn sync(&mut self, store: &mut PlayerStore) {
        let generation = store.track_generation();
        let wanted = store.current_song().and_then(|s| s.audio_ref());

        let stale = match (&self.session, &wanted) {
            (Some(session), Some(audio)) => {
                session.generation != generation || &session.audio != audio
            }
            (Some(_), None) => true,
            (None, _) => false,
        };
        if stale {
            debug!("Tearing down media session");
            self.backend.unload();
            self.session = None;
            self.applied_playing = false;
        }

        if self.session.is_none() {
            if let Some(audio) = wanted {
                debug!(audio = ?audio, generation, "Loading media session");
                match self.backend.load(&audio) {
                    Ok(()) => {
                        self.session = Some(Session {
                            generation,
                            audio,
                            ready: false,
                        });
                        // A fresh session already starts at 0
                        self.applied_restart = store.restart_count();
                        store.set_loading(true);
                    }
                    Err(e) => {
                        self.fail(store, &e.to_string());
                        return;
                    }
                }
            }
        }

        if self.session.is_some() && self.applied_restart != store.restart_count() {
            self.applied_restart = store.restart_count();
            debug!(position = store.progress(), "Restarting media session");
            if let Err(e) = self.backend.seek(store.progress()) {
                self.fail(store, &e.to_string());
                return;
            }
        }

        let volume = volume_percent(store.volume());
        if self.session.is_some() && self.applied_volume != Some(volume) {
            self.backend.set_volume(volume);
            self.applied_volume = Some(volume);
        }

        let ready = self.session.as_ref().is_some_and(|s| s.ready);
        if ready && store.is_playing() != self.applied_playing {
            let result = if store.is_playing() {
                self.backend.play()
            } else {
                self.backend.pause()
            };
            match result {
                Ok(()) => self.applied_playing = store.is_playing(),
                Err(e) => self.fail(store, &e.to_string()),
            }
        }
    }

    /// Feed a backend event into the store
    pub fn handle_event(&mut self, store: &mut PlayerStore, event: MediaEvent) -> SurfaceOutcome {
        if self.session.is_none() && !matches!(event, MediaEvent::Error(_)) {
            return SurfaceOutcome::Ignored;
        }

        match event {
            MediaEvent::Ready { duration } => {
                if let Some(session) = self.session.as_mut() {
                    session.ready = true;
                }
                store.set_duration(duration);
                store.set_loading(false);

                let volume = volume_percent(store.volume());
                self.backend.set_volume(volume);
                self.applied_volume = Some(volume);

                if store.is_playing() {
                    if let Err(e) = self.backend.play() {
                        self.fail(store, &e.to_string());
                        return SurfaceOutcome::Failed;
                    }
                    self.applied_playing = true;
                }
                SurfaceOutcome::Ready
            }
            MediaEvent::TimeUpdate(position) => {
                store.set_progress(position);
                SurfaceOutcome::Updated
            }
            MediaEvent::Playing => {
                self.applied_playing = true;
                store.set_playing(true);
                store.set_loading(false);
                SurfaceOutcome::Updated
            }
            MediaEvent::Paused => {
                self.applied_playing = false;
                store.set_playing(false);
                SurfaceOutcome::Updated
            }
            MediaEvent::Buffering => {
                store.set_loading(true);
                SurfaceOutcome::Updated
            }
            MediaEvent::Ended => self.on_ended(store),
            MediaEvent::Error(message) => {
                self.fail(store, &message);
                SurfaceOutcome::Failed
            }
        }
    }

    /// Sample the backend position while playing
    pub fn tick(&mut self, store: &mut PlayerStore) {
        let ready = self.session.as_ref().is_some_and(|s| s.ready);
        if !ready || !store.is_playing() {
            return;
        }

        if let Some(position) = self.backend.current_time() {
            store.set_progress(position);
        }
        if let Some(duration) = self.backend.duration().filter(|d| *d > 0.0) {
            store.set_duration(duration);
        }
    }

    /// User-driven scrub: backend position and store progress change together
    ///
    /// The store is only updated once the backend accepted the seek, so a
    /// rejected scrub leaves progress where it was.
    pub fn seek(&mut self, store: &mut PlayerStore, position: f64) -> Result<()> {
        let target = store.clamp_position(position);
        if self.session.is_some() {
            self.backend.seek(target)?;
        }
        store.seek(target);
        Ok(())
    }

    fn on_ended(&mut self, store: &mut PlayerStore) -> SurfaceOutcome {
        if store.repeat() == RepeatMode::One {
            store.restart();
            self.applied_restart = store.restart_count();
            let restarted = self.backend.seek(0.0).and_then(|()| self.backend.play());
            if let Err(e) = restarted {
                self.fail(store, &e.to_string());
                return SurfaceOutcome::Failed;
            }
            self.applied_playing = true;
            store.set_playing(true);
            return SurfaceOutcome::Restarted;
        }

        let advance = store.advance();
        if advance == Advance::Exhausted {
            store.set_playing(false);
        }
        self.sync(store);
        SurfaceOutcome::Advanced(advance)
    }

    fn fail(&mut self, store: &mut PlayerStore, message: &str) {
        warn!(error = %message, "Media backend error");
        self.applied_playing = false;
        store.set_loading(false);
        store.set_playing(false);
    }
}

fn volume_percent(volume: f32) -> u8 {
    (volume.clamp(0.0, 1.0) * 100.0).round() as u8
}
