//! Application model types: `App` and `PlaybackState`.
//!
//! The `App` struct holds the state owned by the terminal UI itself: the
//! cursor over the track entries and the volume slider.

/// The playback state of the application.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// The main application model.
pub struct App {
    /// Cursor position over the track entries.
    pub selected: usize,
    pub track_count: usize,
    /// Volume slider position, always within `[0, 1]`.
    pub volume: f32,
    pub volume_step: f32,
    pub playlist_path: Option<String>,
}

impl App {
    /// Create a new `App` over `track_count` entries.
    pub fn new(track_count: usize, volume: f32, volume_step: f32) -> Self {
        Self {
            selected: 0,
            track_count,
            volume: volume.clamp(0.0, 1.0),
            volume_step,
            playlist_path: None,
        }
    }

    /// Record the playlist file in the app state.
    pub fn set_playlist_path(&mut self, path: String) {
        self.playlist_path = Some(path);
    }

    /// Return true if there are any track entries.
    pub fn has_tracks(&self) -> bool {
        self.track_count > 0
    }

    /// Move the cursor to the next entry, wrapping to the first.
    pub fn next(&mut self) {
        if self.has_tracks() {
            self.selected = (self.selected + 1) % self.track_count;
        }
    }

    /// Move the cursor to the previous entry, wrapping to the last.
    pub fn prev(&mut self) {
        if self.has_tracks() {
            self.selected = match self.selected {
                0 => self.track_count - 1,
                n => n - 1,
            };
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.track_count.saturating_sub(1);
    }

    /// Slide the volume up one step and return the new slider value.
    pub fn volume_up(&mut self) -> f32 {
        self.volume = (self.volume + self.volume_step).min(1.0);
        self.volume
    }

    /// Slide the volume down one step and return the new slider value.
    pub fn volume_down(&mut self) -> f32 {
        self.volume = (self.volume - self.volume_step).max(0.0);
        self.volume
    }
}
