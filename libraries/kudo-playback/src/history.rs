//! Playback history tracking
//!
//! Maintains a bounded history of played songs for "previous" and repeat-all

use kudo_core::Song;
use std::collections::VecDeque;

/// Playback history with bounded size
///
/// Most recent entry is at the back. Pushing onto a full history discards
/// the oldest entry.
#[derive(Debug, Clone)]
pub struct History {
    songs: VecDeque<Song>,
    max_size: usize,
}

impl History {
    /// Create new history with specified maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            songs: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Add song to history
    ///
    /// If history is full, oldest song is discarded
    pub fn push(&mut self, song: Song) {
        if self.max_size == 0 {
            return;
        }
        while self.songs.len() >= self.max_size {
            self.songs.pop_front();
        }
        self.songs.push_back(song);
    }

    /// Pop most recent song
    pub fn pop(&mut self) -> Option<Song> {
        self.songs.pop_back()
    }

    /// Pop oldest song (repeat-all wrap-around)
    pub fn pop_oldest(&mut self) -> Option<Song> {
        self.songs.pop_front()
    }

    /// All history songs (oldest first)
    pub fn get_all(&self) -> Vec<&Song> {
        self.songs.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(20)
    }
}
