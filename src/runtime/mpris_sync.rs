use crate::app::PlaybackState;
use crate::audio::OutputHandle;
use crate::mpris::MprisHandle;
use crate::runtime::startup::SongbarController;

/// What MPRIS last saw: the loaded track index and the coarse playback state.
pub type MprisSnapshot = (Option<usize>, PlaybackState);

pub fn snapshot(controller: &SongbarController) -> MprisSnapshot {
    let now_playing = controller
        .output()
        .has_source()
        .then(|| controller.current_index());
    (now_playing, controller.playback_state())
}

pub fn update_mpris(mpris: &MprisHandle, controller: &SongbarController, default_poster: &str) {
    let (now_playing, playback) = snapshot(controller);
    let track = now_playing.and_then(|i| controller.playlist().get(i).map(|t| (i, t)));
    mpris.set_track_metadata(track, default_poster);
    mpris.set_playback(playback);
    mpris.set_has_tracks(!controller.playlist().is_empty());
}
