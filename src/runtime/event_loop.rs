use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::PlayerError;
use crate::runtime::mpris_sync::{MprisSnapshot, snapshot, update_mpris};
use crate::runtime::startup::SongbarController;
use crate::ui;
use crate::view::{Buttons, FooterView};

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Last state published to MPRIS.
    pub last_mpris: Option<MprisSnapshot>,
}

/// Main terminal event loop: handles input, UI drawing, output events and
/// MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut SongbarController,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        controller.pump();

        // Keep MPRIS in sync even when playback changes come from media keys or auto-advance.
        let current = snapshot(controller);
        if state.last_mpris != Some(current) {
            update_mpris(mpris, controller, &settings.ui.default_poster);
            state.last_mpris = Some(current);
        }

        let now_playing = current.0;
        terminal.draw(|f| {
            ui::draw(
                f,
                app,
                controller.playlist(),
                now_playing,
                controller.view(),
                &settings.ui,
            )
        })?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, settings, controller) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, controller, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn report(result: Result<(), PlayerError>) {
    if let Err(e) = result {
        log::warn!("{e}");
    }
}

fn quit(settings: &config::Settings, controller: &SongbarController) {
    log::info!("shutting down");
    controller
        .output()
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
}

/// Press whichever of the play/pause buttons is currently visible.
fn press_visible_button(controller: &mut SongbarController) -> Result<(), PlayerError> {
    match controller.view().buttons() {
        Buttons::PauseVisible => controller.pause(),
        Buttons::PlayVisible => controller.toggle_play_pause(),
    }
}

fn handle_control_cmd(
    cmd: ControlCmd,
    settings: &config::Settings,
    controller: &mut SongbarController,
) -> bool {
    log::debug!("MPRIS command {cmd:?}");
    let result = match cmd {
        ControlCmd::Quit => {
            quit(settings, controller);
            return true;
        }
        ControlCmd::Play => {
            if controller.view().buttons() == Buttons::PlayVisible {
                controller.toggle_play_pause()
            } else {
                Ok(())
            }
        }
        ControlCmd::Pause | ControlCmd::Stop => controller.pause(),
        ControlCmd::PlayPause => press_visible_button(controller),
        ControlCmd::Next => controller.next(),
        ControlCmd::Prev => controller.previous(),
    };
    report(result);
    false
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut SongbarController,
    state: &mut EventLoopState,
) -> bool {
    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    match key.code {
        KeyCode::Char('q') => {
            quit(settings, controller);
            return true;
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.last(),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Enter => report(controller.select_track(app.selected)),
        KeyCode::Char(' ') => report(press_visible_button(controller)),
        KeyCode::Char('p') => report(controller.toggle_play_pause()),
        KeyCode::Char('x') => report(controller.pause()),
        KeyCode::Char('l') => report(controller.next()),
        KeyCode::Char('h') => report(controller.previous()),
        KeyCode::Char('r') => report(controller.repeat_current()),
        KeyCode::Char('s') => report(controller.shuffle()),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let volume = app.volume_up();
            controller.set_volume(volume);
        }
        KeyCode::Char('-') => {
            let volume = app.volume_down();
            controller.set_volume(volume);
        }
        _ => {}
    }

    false
}
