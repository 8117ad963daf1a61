use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{Playlist, Track};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read playlist {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse playlist {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and parse the playlist descriptor at `path`. Single attempt, no retry.
///
/// Relative `audio` references are resolved against the descriptor's
/// directory, so a playlist can be moved together with its media.
pub fn load_playlist(path: &Path) -> Result<Playlist, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut tracks: Vec<Track> =
        serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    for track in &mut tracks {
        track.audio = resolve_media(base, &track.audio);
    }

    log::debug!("parsed {} track(s) from {:?}", tracks.len(), path);
    Ok(Playlist::new(tracks))
}

fn resolve_media(base: &Path, reference: &str) -> String {
    if reference.contains("://") || Path::new(reference).is_absolute() {
        return reference.to_string();
    }
    base.join(reference).to_string_lossy().into_owned()
}
