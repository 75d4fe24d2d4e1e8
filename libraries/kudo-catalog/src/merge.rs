//! Merging, deduplication and truncation of song lists

use kudo_core::Song;
use std::collections::HashSet;

/// Default number of songs returned
pub const DEFAULT_LIMIT: usize = 30;

/// Upper bound on any requested limit
pub const MAX_LIMIT: usize = 100;

/// Resolve a requested limit: missing or zero means the default
pub fn clamp_limit(requested: Option<usize>) -> usize {
    match requested {
        Some(0) | None => DEFAULT_LIMIT,
        Some(n) => n.min(MAX_LIMIT),
    }
}

/// Drop later songs whose id was already seen, keeping order
pub fn dedup_by_id(songs: Vec<Song>) -> Vec<Song> {
    let mut seen = HashSet::new();
    songs
        .into_iter()
        .filter(|song| seen.insert(song.id.clone()))
        .collect()
}

/// Dedup, then truncate to `limit`
pub fn finalize(songs: Vec<Song>, limit: usize) -> Vec<Song> {
    let mut songs = dedup_by_id(songs);
    songs.truncate(limit);
    songs
}

/// Keep songs whose title or artist contains `needle` (case-insensitive)
pub fn filter_matching(songs: Vec<Song>, needle: &str) -> Vec<Song> {
    songs.into_iter().filter(|song| song.matches(needle)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: &str, title: &str) -> Song {
        Song::new(id, title, "Artist")
    }

    #[test]
    fn limits() {
        assert_eq!(clamp_limit(None), 30);
        assert_eq!(clamp_limit(Some(0)), 30);
        assert_eq!(clamp_limit(Some(5)), 5);
        assert_eq!(clamp_limit(Some(1000)), 100);
    }

    #[test]
    fn first_occurrence_wins() {
        let songs = dedup_by_id(vec![song("a", "One"), song("b", "Two"), song("a", "Three")]);
        let titles: Vec<_> = songs.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two"]);
    }

    #[test]
    fn dedup_happens_before_truncation() {
        let songs = finalize(vec![song("a", "1"), song("a", "2"), song("b", "3"), song("c", "4")], 2);
        let ids: Vec<_> = songs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn filters_case_insensitively() {
        let songs = filter_matching(vec![song("a", "Starboy"), song("b", "Levitating")], "STAR");
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].id, "a");
    }
}
