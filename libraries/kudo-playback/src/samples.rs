//! Built-in sample songs
//!
//! Last-resort continuation when the catalog search fails or returns nothing.

use kudo_core::Song;

struct Sample {
    id: &'static str,
    title: &'static str,
    artist: &'static str,
    album: &'static str,
    image: &'static str,
    audio_url: &'static str,
    duration: u32,
}

const SAMPLES: &[Sample] = &[
    Sample {
        id: "Paem2Kf1",
        title: "Starboy",
        artist: "The Weeknd, Daft Punk",
        album: "Starboy",
        image: "https://c.saavncdn.com/372/Starboy-English-2016-500x500.jpg",
        audio_url: "https://aac.saavncdn.com/372/38de816bee7a6df4607f1f0e6822c5bc_320.mp4",
        duration: 230,
    },
    Sample {
        id: "pW-kkdqr",
        title: "Blinding Lights",
        artist: "The Weeknd",
        album: "Blinding Lights",
        image: "https://c.saavncdn.com/820/Blinding-Lights-English-2020-20200912094411-500x500.jpg",
        audio_url: "https://aac.saavncdn.com/820/5ddb9a79a5218f85ca9bef170f3a461d_320.mp4",
        duration: 204,
    },
    Sample {
        id: "-rq378sI",
        title: "São Paulo",
        artist: "The Weeknd, Anitta",
        album: "Hurry Up Tomorrow",
        image: "https://c.saavncdn.com/627/Hurry-Up-Tomorrow-English-2025-20250322054944-500x500.jpg",
        audio_url: "https://aac.saavncdn.com/627/430684e3c6fe623aa399e89f3d8d74c5_320.mp4",
        duration: 302,
    },
    Sample {
        id: "m63pgFGa",
        title: "Cry For Me",
        artist: "The Weeknd",
        album: "Hurry Up Tomorrow",
        image: "https://c.saavncdn.com/627/Hurry-Up-Tomorrow-English-2025-20250322054944-500x500.jpg",
        audio_url: "https://aac.saavncdn.com/627/74292fed7a20d05465b90282c88af2f5_320.mp4",
        duration: 224,
    },
    Sample {
        id: "lvyoa4FM",
        title: "One Of The Girls",
        artist: "The Weeknd, Jennie, Lily Rose Depp",
        album: "The Idol Episode 4",
        image: "https://c.saavncdn.com/262/The-Idol-Episode-4-Music-from-the-HBO-Original-Series-English-2023-20231208141835-500x500.jpg",
        audio_url: "https://aac.saavncdn.com/262/29c4e8a97c366de2dafed13b42b4370a_320.mp4",
        duration: 245,
    },
];

/// The fixed local sample set
pub fn sample_songs() -> Vec<Song> {
    SAMPLES
        .iter()
        .map(|s| {
            Song::new(s.id, s.title, s.artist)
                .with_album(s.album)
                .with_image(s.image)
                .with_audio_url(s.audio_url)
                .with_duration(s.duration)
        })
        .collect()
}
