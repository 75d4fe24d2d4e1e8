//! Core types for the playback store

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when queue ends
    #[default]
    Off,

    /// Loop through history when the queue ends
    All,

    /// Loop current track only
    One,
}

impl RepeatMode {
    /// Next mode in the cycle off → all → one → off
    pub fn next(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

/// Result of an advance (Next) transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// repeat=one: current track replays from 0
    Repeated,

    /// A queued song became current
    Promoted,

    /// repeat=all: the oldest history entry became current
    Wrapped,

    /// No local continuation exists; the caller should run auto-play
    Exhausted,
}

/// Result of a go-back (Previous) transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoBack {
    /// Current track restarted at 0
    Restarted,

    /// Most recent history entry became current
    Previous,
}

/// Configuration for the player store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Maximum history size (default: 20)
    pub history_size: usize,

    /// Initial volume (0.0-1.0, default: 0.7)
    pub volume: f32,

    /// Progress (seconds) beyond which Previous restarts the track (default: 3)
    pub restart_threshold: f64,

    /// Whether auto-play continuation starts enabled (default: true)
    pub auto_play: bool,

    /// Number of songs requested from the catalog for continuation (default: 30)
    pub continuation_limit: usize,

    /// Progress sampling interval while playing (default: 500ms)
    pub poll_interval: Duration,
}

impl PlayerConfig {
    pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(200);
    pub const MAX_POLL_INTERVAL: Duration = Duration::from_millis(500);

    /// Poll interval clamped to the supported 200-500ms window
    pub fn effective_poll_interval(&self) -> Duration {
        self.poll_interval
            .clamp(Self::MIN_POLL_INTERVAL, Self::MAX_POLL_INTERVAL)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            history_size: 20,
            volume: 0.7,
            restart_threshold: 3.0,
            auto_play: true,
            continuation_limit: 30,
            poll_interval: Duration::from_millis(500),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.history_size, 20);
        assert_eq!(config.volume, 0.7);
        assert_eq!(config.restart_threshold, 3.0);
        assert!(config.auto_play);
        assert_eq!(config.poll_interval, Duration::from_millis(500));
    }

    #[test]
    fn repeat_cycles_through_three_states() {
        assert_eq!(RepeatMode::Off.next(), RepeatMode::All);
        assert_eq!(RepeatMode::All.next(), RepeatMode::One);
        assert_eq!(RepeatMode::One.next(), RepeatMode::Off);
    }

    #[test]
    fn poll_interval_is_clamped() {
        let mut config = PlayerConfig {
            poll_interval: Duration::from_millis(50),
            ..Default::default()
        };
        assert_eq!(config.effective_poll_interval(), Duration::from_millis(200));

        config.poll_interval = Duration::from_secs(2);
        assert_eq!(config.effective_poll_interval(), Duration::from_millis(500));
    }

    #[test]
    fn repeat_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RepeatMode::All).unwrap(), "\"all\"");
    }
}
