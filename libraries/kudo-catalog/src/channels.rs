//! Channel registry

use serde::{Deserialize, Serialize};
use std::fmt;

/// Queries sampled for the trending channel
pub const TRENDING_QUERIES: [&str; 5] = [
    "arijit singh",
    "ap dhillon",
    "diljit dosanjh",
    "taylor swift",
    "weekend",
];

/// Results requested per trending query
pub const TRENDING_PER_QUERY: usize = 10;

/// Named song sources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    Discover,
    NewReleases,
    Popular,
    #[default]
    Trending,
}

impl Channel {
    /// Resolve a channel name; unknown names fall back to `Discover`
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "new-releases" => Self::NewReleases,
            "popular" => Self::Popular,
            "trending" => Self::Trending,
            _ => Self::Discover,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Discover => "discover",
            Self::NewReleases => "new-releases",
            Self::Popular => "popular",
            Self::Trending => "trending",
        }
    }

    /// Freefy channel slug, `None` for channels served elsewhere
    pub fn freefy_slug(self) -> Option<&'static str> {
        match self {
            Self::Discover => Some("discover"),
            Self::NewReleases => Some("new-releases"),
            Self::Popular => Some("popular-tracks"),
            Self::Trending => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_and_unknown() {
        assert_eq!(Channel::parse("trending"), Channel::Trending);
        assert_eq!(Channel::parse("New-Releases"), Channel::NewReleases);
        assert_eq!(Channel::parse("popular"), Channel::Popular);
        assert_eq!(Channel::parse("lofi-beats"), Channel::Discover);
        assert_eq!(Channel::parse(""), Channel::Discover);
    }

    #[test]
    fn slugs() {
        assert_eq!(Channel::Popular.freefy_slug(), Some("popular-tracks"));
        assert_eq!(Channel::Trending.freefy_slug(), None);
        assert_eq!(Channel::default().to_string(), "trending");
    }
}
