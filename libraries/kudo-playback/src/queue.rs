//! Play queue
//!
//! Front of the queue plays next. Songs may appear more than once.

use kudo_core::Song;
use std::collections::VecDeque;

/// Ordered queue of songs slated to play next
#[derive(Debug, Clone, Default)]
pub struct Queue {
    songs: VecDeque<Song>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append song to the end of the queue
    pub fn push_back(&mut self, song: Song) {
        self.songs.push_back(song);
    }

    /// Insert song at the front (plays next)
    pub fn push_front(&mut self, song: Song) {
        self.songs.push_front(song);
    }

    /// Append many songs, preserving their order
    pub fn extend(&mut self, songs: impl IntoIterator<Item = Song>) {
        self.songs.extend(songs);
    }

    /// Remove and return the song at `index`
    pub fn take(&mut self, index: usize) -> Option<Song> {
        self.songs.remove(index)
    }

    /// All songs in play order
    pub fn get_all(&self) -> Vec<&Song> {
        self.songs.iter().collect()
    }

    pub fn clear(&mut self) {
        self.songs.clear();
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: &str) -> Song {
        Song::new(id, format!("Track {}", id), "Test Artist")
    }

    fn ids(queue: &Queue) -> Vec<String> {
        queue.get_all().iter().map(|s| s.id.clone()).collect()
    }

    #[test]
    fn push_back_and_take_front() {
        let mut queue = Queue::new();
        queue.push_back(song("a"));
        queue.push_back(song("b"));

        assert_eq!(queue.take(0).unwrap().id, "a");
        assert_eq!(ids(&queue), vec!["b"]);
    }

    #[test]
    fn take_from_middle() {
        let mut queue = Queue::new();
        queue.extend(vec![song("a"), song("b"), song("c")]);

        assert_eq!(queue.take(1).unwrap().id, "b");
        assert_eq!(ids(&queue), vec!["a", "c"]);
        assert!(queue.take(5).is_none());
    }

    #[test]
    fn push_front_plays_next() {
        let mut queue = Queue::new();
        queue.push_back(song("a"));
        queue.push_front(song("z"));
        assert_eq!(ids(&queue), vec!["z", "a"]);
    }

    #[test]
    fn duplicates_are_allowed() {
        let mut queue = Queue::new();
        queue.push_back(song("a"));
        queue.push_back(song("a"));
        assert_eq!(queue.len(), 2);

        queue.clear();
        assert!(queue.is_empty());
    }
}
