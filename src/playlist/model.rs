use serde::Deserialize;

/// Name shown for tracks whose descriptor carries no usable `songName`.
pub const UNKNOWN_SONG_NAME: &str = "Unknown Song Name";
/// Poster shown for tracks whose descriptor carries no usable `poster`.
pub const DEFAULT_POSTER: &str = "path/to/default-image.jpg";

/// One playlist entry, exactly as it appears in the descriptor file.
///
/// `audio` is resolved against the playlist's directory at load time; the
/// display fields are kept raw so fallbacks are applied where they are shown.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    #[serde(default)]
    pub song_name: Option<String>,
    pub audio: String,
    #[serde(default)]
    pub poster: Option<String>,
}

impl Track {
    /// Song name for display, falling back to [`UNKNOWN_SONG_NAME`].
    pub fn display_name(&self) -> &str {
        non_blank(self.song_name.as_deref()).unwrap_or(UNKNOWN_SONG_NAME)
    }

    /// Poster reference for display, falling back to `default_poster`.
    pub fn poster_or<'a>(&'a self, default_poster: &'a str) -> &'a str {
        non_blank(self.poster.as_deref()).unwrap_or(default_poster)
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

/// Ordered, index-addressed list of tracks. Insertion order is play order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Index after `current`, wrapping to the first track.
    pub fn next_index(&self, current: usize) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        if current + 1 < self.tracks.len() {
            Some(current + 1)
        } else {
            Some(0)
        }
    }

    /// Index before `current`, wrapping to the last track.
    pub fn previous_index(&self, current: usize) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        if current > 0 && current < self.tracks.len() {
            Some(current - 1)
        } else {
            Some(self.tracks.len() - 1)
        }
    }
}
