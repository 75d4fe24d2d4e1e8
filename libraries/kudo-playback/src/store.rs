//! Player store - the playback/queue state machine
//!
//! Single-owner state container. Every action mutates synchronously and
//! records [`PlayerEvent`]s for the UI layer.

use crate::{
    error::{PlaybackError, Result},
    events::PlayerEvent,
    history::History,
    queue::Queue,
    types::{Advance, GoBack, PlayerConfig, RepeatMode},
};
use kudo_core::Song;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Client playback store
///
/// Holds the current song, transport state, shuffle/repeat modes, the play
/// queue and the bounded history. `track_generation` increases whenever the
/// current song changes, so async work started for one track can detect that
/// it has been superseded.
pub struct PlayerStore {
    config: PlayerConfig,

    current_song: Option<Song>,
    is_playing: bool,
    is_loading: bool,
    progress: f64,
    duration: f64,
    volume: f32,

    shuffle: bool,
    repeat: RepeatMode,
    queue: Queue,
    history: History,

    last_search_query: String,
    auto_play_enabled: bool,
    track_generation: u64,
    restart_count: u64,

    rng: StdRng,
    pending_events: Vec<PlayerEvent>,
}

impl PlayerStore {
    /// Create a store with an entropy-seeded RNG
    pub fn new(config: PlayerConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a store with a deterministic RNG (tests, replays)
    pub fn with_seed(config: PlayerConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: PlayerConfig, rng: StdRng) -> Self {
        Self {
            current_song: None,
            is_playing: false,
            is_loading: false,
            progress: 0.0,
            duration: 0.0,
            volume: config.volume.clamp(0.0, 1.0),
            shuffle: false,
            repeat: RepeatMode::Off,
            queue: Queue::new(),
            history: History::new(config.history_size),
            last_search_query: String::new(),
            auto_play_enabled: config.auto_play,
            track_generation: 0,
            restart_count: 0,
            rng,
            pending_events: Vec::new(),
            config,
        }
    }

    // ===== Track selection =====

    /// Make `song` current
    ///
    /// The previous current song goes to history. Playback does not start
    /// until the media backend reports ready and `is_playing` is set.
    pub fn select(&mut self, song: Song) {
        self.replace_current(song);
        self.set_playing(false);
        self.set_loading(true);
    }

    /// Select `song` and request playback once media is ready
    pub fn play_song(&mut self, song: Song) {
        self.select(song);
        self.set_playing(true);
    }

    /// Attach a late-resolved YouTube id to the current song and start playing
    pub fn resolve_audio(&mut self, youtube_id: impl Into<String>) -> Result<()> {
        let youtube_id = youtube_id.into();
        let song = self
            .current_song
            .as_mut()
            .ok_or(PlaybackError::NoCurrentSong)?;

        song.youtube_id = Some(youtube_id.clone());
        let song_id = song.id.clone();
        self.emit(PlayerEvent::AudioResolved {
            song_id,
            youtube_id,
        });
        self.set_playing(true);
        self.set_loading(false);
        Ok(())
    }

    // ===== Navigation =====

    /// Advance to the next song (Next button or end of track)
    pub fn advance(&mut self) -> Advance {
        if self.repeat == RepeatMode::One && self.current_song.is_some() {
            self.restart();
            self.set_playing(true);
            return Advance::Repeated;
        }

        if self.promote_from_queue() {
            return Advance::Promoted;
        }

        if self.repeat == RepeatMode::All && self.current_song.is_some() {
            if let Some(next) = self.history.pop_oldest() {
                self.replace_current(next);
                self.set_loading(true);
                return Advance::Wrapped;
            }
        }

        self.emit(PlayerEvent::QueueExhausted);
        Advance::Exhausted
    }

    /// Go to the previous song (Previous button)
    ///
    /// More than `restart_threshold` seconds into the track restarts it instead.
    pub fn go_back(&mut self) -> GoBack {
        if self.progress > self.config.restart_threshold {
            self.restart();
            return GoBack::Restarted;
        }

        let Some(previous) = self.history.pop() else {
            self.restart();
            return GoBack::Restarted;
        };

        let previous_song_id = self.current_song.take().map(|current| {
            let id = current.id.clone();
            self.queue.push_front(current);
            id
        });
        if previous_song_id.is_some() {
            self.emit_queue_changed();
        }
        self.set_current(previous, previous_song_id);
        self.set_loading(true);
        GoBack::Previous
    }

    /// Remove the next song from the queue and make it current
    ///
    /// Index 0, or a uniformly random index when shuffle is on.
    pub(crate) fn promote_from_queue(&mut self) -> bool {
        if self.queue.is_empty() {
            return false;
        }

        let index = if self.shuffle {
            self.rng.gen_range(0..self.queue.len())
        } else {
            0
        };

        let Some(next) = self.queue.take(index) else {
            return false;
        };
        self.emit_queue_changed();
        self.replace_current(next);
        self.set_loading(true);
        true
    }

    // ===== Modes =====

    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle = !self.shuffle;
        self.emit(PlayerEvent::ShuffleChanged {
            enabled: self.shuffle,
        });
        self.shuffle
    }

    /// Cycle repeat off → all → one → off
    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.repeat = self.repeat.next();
        self.emit(PlayerEvent::RepeatChanged { mode: self.repeat });
        self.repeat
    }

    pub fn toggle_auto_play(&mut self) -> bool {
        self.auto_play_enabled = !self.auto_play_enabled;
        self.emit(PlayerEvent::AutoPlayChanged {
            enabled: self.auto_play_enabled,
        });
        self.auto_play_enabled
    }

    // ===== Queue =====

    /// Append a song to the queue (duplicates allowed)
    pub fn enqueue(&mut self, song: Song) {
        self.queue.push_back(song);
        self.emit_queue_changed();
    }

    /// Append songs to the queue, preserving order
    pub fn enqueue_many(&mut self, songs: impl IntoIterator<Item = Song>) {
        let before = self.queue.len();
        self.queue.extend(songs);
        if self.queue.len() != before {
            self.emit_queue_changed();
        }
    }

    pub fn clear_queue(&mut self) {
        if !self.queue.is_empty() {
            self.queue.clear();
            self.emit_queue_changed();
        }
    }

    /// Remember the query the user last searched for (seeds auto-play)
    pub fn set_last_search_query(&mut self, query: impl Into<String>) {
        self.last_search_query = query.into();
    }

    // ===== Transport =====

    pub fn toggle_play(&mut self) {
        self.set_playing(!self.is_playing);
    }

    pub fn set_playing(&mut self, playing: bool) {
        if self.is_playing != playing {
            self.is_playing = playing;
            self.emit(PlayerEvent::PlayingChanged {
                is_playing: playing,
            });
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        if self.is_loading != loading {
            self.is_loading = loading;
            self.emit(PlayerEvent::LoadingChanged {
                is_loading: loading,
            });
        }
    }

    /// Set volume, clamped to 0.0-1.0 (NaN is ignored)
    pub fn set_volume(&mut self, volume: f32) {
        if volume.is_nan() {
            return;
        }
        let volume = volume.clamp(0.0, 1.0);
        if (self.volume - volume).abs() > f32::EPSILON {
            self.volume = volume;
            self.emit(PlayerEvent::VolumeChanged { volume });
        }
    }

    /// Set the authoritative duration (seconds)
    pub fn set_duration(&mut self, duration: f64) {
        if !duration.is_finite() || duration < 0.0 {
            return;
        }
        if (self.duration - duration).abs() > f64::EPSILON {
            self.duration = duration;
            self.emit(PlayerEvent::DurationChanged { duration });
        }
    }

    /// Record sampled playback progress
    ///
    /// Values behind the current progress are ignored so the displayed
    /// position never moves backwards within a track. Returns whether the
    /// value was applied.
    pub fn set_progress(&mut self, position: f64) -> bool {
        if !position.is_finite() || position < self.progress {
            return false;
        }
        self.progress = position;
        true
    }

    /// Explicit seek; may move backwards
    ///
    /// Returns the position actually applied (clamped to the known duration).
    pub fn seek(&mut self, position: f64) -> f64 {
        let position = self.clamp_position(position);
        self.progress = position;
        self.emit(PlayerEvent::Seeked { position });
        position
    }

    /// Clamp a seek target to `0..=duration` (non-finite maps to 0)
    pub fn clamp_position(&self, position: f64) -> f64 {
        let position = if position.is_finite() {
            position.max(0.0)
        } else {
            0.0
        };
        if self.duration > 0.0 {
            position.min(self.duration)
        } else {
            position
        }
    }

    /// Restart the current track at 0
    pub fn restart(&mut self) {
        self.reset_progress();
        self.restart_count += 1;
        self.emit(PlayerEvent::Restarted);
    }

    // ===== Accessors =====

    pub fn current_song(&self) -> Option<&Song> {
        self.current_song.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn queue(&self) -> Vec<&Song> {
        self.queue.get_all()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// History songs (oldest first)
    pub fn history(&self) -> Vec<&Song> {
        self.history.get_all()
    }

    pub fn last_search_query(&self) -> &str {
        &self.last_search_query
    }

    pub fn auto_play_enabled(&self) -> bool {
        self.auto_play_enabled
    }

    pub fn track_generation(&self) -> u64 {
        self.track_generation
    }

    /// Number of in-place restarts (Previous past the threshold, Next under
    /// repeat one); the media binding seeks to 0 when this changes
    pub fn restart_count(&self) -> u64 {
        self.restart_count
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub(crate) fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    // ===== Internal =====

    /// Push the current song to history, then make `song` current
    fn replace_current(&mut self, song: Song) {
        let previous_song_id = self.current_song.take().map(|previous| {
            let id = previous.id.clone();
            self.history.push(previous);
            id
        });
        self.set_current(song, previous_song_id);
    }

    fn set_current(&mut self, song: Song, previous_song_id: Option<String>) {
        let song_id = song.id.clone();

        self.current_song = Some(song);
        self.track_generation += 1;
        self.reset_progress();
        self.emit(PlayerEvent::TrackChanged {
            song_id,
            previous_song_id,
        });
    }

    fn reset_progress(&mut self) {
        self.progress = 0.0;
    }

    fn emit(&mut self, event: PlayerEvent) {
        self.pending_events.push(event);
    }

    fn emit_queue_changed(&mut self) {
        let length = self.queue.len();
        self.emit(PlayerEvent::QueueChanged { length });
    }
}

impl Default for PlayerStore {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}

impl std::fmt::Debug for PlayerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerStore")
            .field("current_song", &self.current_song.as_ref().map(|s| &s.id))
            .field("is_playing", &self.is_playing)
            .field("is_loading", &self.is_loading)
            .field("progress", &self.progress)
            .field("duration", &self.duration)
            .field("volume", &self.volume)
            .field("shuffle", &self.shuffle)
            .field("repeat", &self.repeat)
            .field("queue_len", &self.queue.len())
            .field("history_len", &self.history.len())
            .field("track_generation", &self.track_generation)
            .finish_non_exhaustive()
    }
}
