//! Player events
//!
//! Every store action records events describing what changed. The UI layer
//! drains them after each action instead of diffing the whole state.

use crate::types::RepeatMode;
use serde::{Deserialize, Serialize};

/// Events emitted by the player store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Current song changed
    TrackChanged {
        /// ID of the new current song
        song_id: String,
        /// ID of the song it replaced (if any)
        previous_song_id: Option<String>,
    },

    /// A YouTube id was attached to the current song
    AudioResolved {
        song_id: String,
        youtube_id: String,
    },

    /// Play/pause flag changed
    PlayingChanged { is_playing: bool },

    /// Loading indicator changed
    LoadingChanged { is_loading: bool },

    /// Authoritative duration known (seconds)
    DurationChanged { duration: f64 },

    /// Explicit seek (seconds)
    Seeked { position: f64 },

    /// Current track restarted from 0
    Restarted,

    /// Volume changed (0.0-1.0)
    VolumeChanged { volume: f32 },

    ShuffleChanged { enabled: bool },

    RepeatChanged { mode: RepeatMode },

    AutoPlayChanged { enabled: bool },

    /// Queue changed (songs added/removed)
    QueueChanged { length: usize },

    /// Advance found no local continuation
    QueueExhausted,
}
