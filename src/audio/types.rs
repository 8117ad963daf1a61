//! Audio-related small types and the output-handle abstraction.
//!
//! This module defines the commands sent to the audio thread, the events it
//! reports back, and the `OutputHandle` trait the playback controller drives.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Identifies one play request; echoed back in its `PlayResolved` event.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayTicket(pub u64);

#[derive(Debug)]
pub enum AudioCmd {
    /// Replace the current source. Playback is not started. Events about the
    /// new source carry `generation`.
    SetSource { path: PathBuf, generation: u64 },
    /// Start or resume the current source.
    Play(PlayTicket),
    /// Pause in place.
    Pause,
    /// Rewind the current source to the beginning.
    SeekToZero,
    /// Set the output volume, `0.0..=1.0`.
    SetVolume(f32),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no source has been assigned")]
    NoSource,
    #[error("no audio output device available")]
    NoDevice,
    #[error("could not open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

/// Notifications emitted by an output handle.
///
/// `MetadataReady` and `TimeProgress` may arrive in any order once a source
/// is set. `Ended` fires at most once per play-through.
#[derive(Debug)]
pub enum MediaEvent {
    MetadataReady(Duration),
    TimeProgress(Duration),
    Ended,
    PlayResolved {
        ticket: PlayTicket,
        result: Result<(), PlaybackError>,
    },
}

/// An event tagged with the source generation it was emitted under.
pub(super) type Stamped = (u64, MediaEvent);

/// The single media output the controller drives.
pub trait OutputHandle {
    fn set_source(&mut self, source: &Path);
    /// Request playback. The outcome arrives later as `MediaEvent::PlayResolved`.
    fn play(&mut self) -> PlayTicket;
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    fn has_source(&self) -> bool;
    fn seek_to_zero(&mut self);
    fn set_volume(&mut self, volume: f32);
    /// Drain pending notifications.
    fn poll_events(&mut self) -> Vec<MediaEvent>;
}
