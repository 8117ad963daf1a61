use std::path::Path;

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::config;
use crate::player::Controller;
use crate::playlist::{Playlist, load_playlist};
use crate::view::Footer;

pub type SongbarController = Controller<AudioPlayer, Footer>;

/// Load the playlist and wire the controller to the audio thread and footer.
///
/// A playlist that cannot be loaded leaves the player empty; every transport
/// operation then reports an empty playlist instead of failing startup.
pub fn build(playlist_path: &str, settings: &config::Settings) -> (App, SongbarController) {
    let playlist = match load_playlist(Path::new(playlist_path)) {
        Ok(p) => p,
        Err(e) => {
            log::error!("{e}");
            Playlist::default()
        }
    };
    if playlist.is_empty() {
        log::warn!("playlist {playlist_path} has no tracks");
    } else {
        log::info!("loaded {} tracks from {playlist_path}", playlist.len());
    }

    let mut app = App::new(
        playlist.len(),
        settings.audio.initial_volume,
        settings.controls.volume_step,
    );
    app.set_playlist_path(playlist_path.to_string());

    let footer = Footer::bind(&settings.ui.footer_regions);
    let output = AudioPlayer::new(app.volume);
    let mut controller =
        Controller::new(playlist, output, footer, settings.ui.default_poster.clone());

    if let Err(e) = controller.show_initial() {
        log::warn!("nothing to show: {e}");
    }

    (app, controller)
}
