use std::collections::HashMap;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::app::PlaybackState;
use crate::audio::{MediaEvent, OutputHandle, PlayTicket, PlaybackError};
use crate::playlist::Playlist;
use crate::view::{Buttons, FooterView, Region, format_time};

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("the playlist is empty")]
    EmptyPlaylist,
    #[error("track {index} does not exist (playlist has {len})")]
    InvalidSelection { index: usize, len: usize },
    #[error("nothing is loaded")]
    NothingLoaded,
    #[error("playback did not start: {0}")]
    PlaybackRejected(#[from] PlaybackError),
}

/// What an unresolved play request was for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Pending {
    /// A fresh start of the track at this index.
    Track(usize),
    /// Resume or restart of whatever source is loaded.
    Resume,
}

/// Owns the current track index and drives the output handle and the footer.
pub struct Controller<O, V> {
    playlist: Playlist,
    current_index: usize,
    output: O,
    view: V,
    pending: HashMap<PlayTicket, Pending>,
    rng: StdRng,
    default_poster: String,
}

impl<O: OutputHandle, V: FooterView> Controller<O, V> {
    pub fn new(playlist: Playlist, output: O, view: V, default_poster: impl Into<String>) -> Self {
        Self::with_rng(playlist, output, view, default_poster, StdRng::from_entropy())
    }

    pub fn with_rng(
        playlist: Playlist,
        output: O,
        view: V,
        default_poster: impl Into<String>,
        rng: StdRng,
    ) -> Self {
        Self {
            playlist,
            current_index: 0,
            output,
            view,
            pending: HashMap::new(),
            rng,
            default_poster: default_poster.into(),
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Coarse state for external observers (e.g. MPRIS), read from the output.
    pub fn playback_state(&self) -> PlaybackState {
        if !self.output.has_source() {
            PlaybackState::Stopped
        } else if self.output.is_paused() {
            PlaybackState::Paused
        } else {
            PlaybackState::Playing
        }
    }

    /// Show the first track's metadata without starting playback.
    pub fn show_initial(&mut self) -> Result<(), PlayerError> {
        if self.playlist.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }
        self.update_footer(0);
        Ok(())
    }

    /// Make track `index` current, load it and request playback.
    pub fn select_track(&mut self, index: usize) -> Result<(), PlayerError> {
        let len = self.playlist.len();
        let track = self
            .playlist
            .get(index)
            .ok_or(PlayerError::InvalidSelection { index, len })?;
        let audio = track.audio.clone();
        log::info!("playing #{index}: {}", track.display_name());

        self.current_index = index;
        self.render(Region::Elapsed, &format_time(std::time::Duration::ZERO));
        self.output.set_source(Path::new(&audio));
        let ticket = self.output.play();
        self.pending.insert(ticket, Pending::Track(index));
        Ok(())
    }

    /// Resume when paused; when already playing, restart the current track.
    pub fn toggle_play_pause(&mut self) -> Result<(), PlayerError> {
        self.ensure_tracks()?;
        if self.output.has_source() && self.output.is_paused() {
            let ticket = self.output.play();
            self.pending.insert(ticket, Pending::Resume);
            Ok(())
        } else {
            self.select_track(self.current_index)
        }
    }

    pub fn pause(&mut self) -> Result<(), PlayerError> {
        self.ensure_tracks()?;
        if !self.output.is_paused() {
            self.output.pause();
            self.view.set_buttons(Buttons::PlayVisible);
        }
        Ok(())
    }

    pub fn next(&mut self) -> Result<(), PlayerError> {
        let index = self
            .playlist
            .next_index(self.current_index)
            .ok_or(PlayerError::EmptyPlaylist)?;
        self.select_track(index)
    }

    pub fn previous(&mut self) -> Result<(), PlayerError> {
        let index = self
            .playlist
            .previous_index(self.current_index)
            .ok_or(PlayerError::EmptyPlaylist)?;
        self.select_track(index)
    }

    /// Rewind the loaded source and play it again. Footer metadata is kept.
    pub fn repeat_current(&mut self) -> Result<(), PlayerError> {
        self.ensure_tracks()?;
        if !self.output.has_source() {
            return Err(PlayerError::NothingLoaded);
        }
        self.output.seek_to_zero();
        let ticket = self.output.play();
        self.pending.insert(ticket, Pending::Resume);
        Ok(())
    }

    /// Jump to a uniformly random track. The current one may be picked again.
    pub fn shuffle(&mut self) -> Result<(), PlayerError> {
        self.ensure_tracks()?;
        let index = self.rng.gen_range(0..self.playlist.len());
        self.select_track(index)
    }

    /// Apply a slider value as-is; the slider keeps it within `[0, 1]`.
    pub fn set_volume(&mut self, volume: f32) {
        self.output.set_volume(volume);
    }

    /// Dispatch every pending output notification, logging failures.
    pub fn pump(&mut self) {
        for event in self.output.poll_events() {
            if let Err(e) = self.handle_event(event) {
                log::error!("{e}");
            }
        }
    }

    pub fn handle_event(&mut self, event: MediaEvent) -> Result<(), PlayerError> {
        match event {
            MediaEvent::MetadataReady(total) => {
                self.render(Region::Total, &format_time(total));
                Ok(())
            }
            MediaEvent::TimeProgress(elapsed) => {
                self.render(Region::Elapsed, &format_time(elapsed));
                Ok(())
            }
            MediaEvent::Ended => {
                self.view.set_buttons(Buttons::PlayVisible);
                self.next()
            }
            MediaEvent::PlayResolved { ticket, result } => {
                let Some(pending) = self.pending.remove(&ticket) else {
                    log::debug!("ignoring resolution of unknown request {ticket:?}");
                    return Ok(());
                };
                if let Err(e) = result {
                    // An earlier request may have flipped the buttons already.
                    if self.output.is_paused() {
                        self.view.set_buttons(Buttons::PlayVisible);
                    }
                    return Err(e.into());
                }
                if let Pending::Track(index) = pending {
                    self.update_footer(index);
                }
                // A pause issued after this request wins over its late resolution.
                if !self.output.is_paused() {
                    self.view.set_buttons(Buttons::PauseVisible);
                }
                Ok(())
            }
        }
    }

    fn ensure_tracks(&self) -> Result<(), PlayerError> {
        if self.playlist.is_empty() {
            Err(PlayerError::EmptyPlaylist)
        } else {
            Ok(())
        }
    }

    fn update_footer(&mut self, index: usize) {
        let Some(track) = self.playlist.get(index) else {
            log::error!("track {index} is undefined");
            return;
        };
        let name = track.display_name().to_string();
        let poster = track.poster_or(&self.default_poster).to_string();

        self.render(Region::SongName, &name);
        self.render(Region::Poster, &poster);
        self.render(Region::Elapsed, &format_time(std::time::Duration::ZERO));
    }

    fn render(&mut self, region: Region, text: &str) {
        if let Err(e) = self.view.write(region, text) {
            log::warn!("skipping footer update: {e}");
        }
    }
}
