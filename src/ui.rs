//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::App;
use crate::config::UiSettings;
use crate::playlist::Playlist;
use crate::view::{Buttons, Footer, FooterView, Region};

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("gg/G", "top/bottom");
    map.insert("enter", "play entry");
    map.insert("space", "play/pause");
    map.insert("p/x", "play/pause");
    map.insert("h/l", "backward/forward");
    map.insert("r", "repeat");
    map.insert("s", "shuffle");
    map.insert("+/-", "volume");
    map.insert("q", "quit");
    map
});

/// Render the controls help text.
fn controls_text() -> String {
    // Keep the rendered order stable and human-friendly.
    let order = [
        "j/k", "gg/G", "enter", "space", "p/x", "h/l", "r", "s", "+/-", "q",
    ];
    order
        .iter()
        .filter_map(|k| CONTROLS_MAP.get(k).map(|v| format!("[{}] {}", k, v)))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Render a textual slider for `volume` in `[0, 1]`.
fn volume_bar(volume: f32, width: usize) -> String {
    let filled = ((volume.clamp(0.0, 1.0) * width as f32).round() as usize).min(width);
    format!(
        "{}{} {:>3}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        (volume * 100.0).round() as u32
    )
}

/// Build the footer lines. Unbound regions are left out.
fn footer_lines(footer: &Footer, volume: f32) -> Vec<Line<'static>> {
    let button = match footer.buttons() {
        Buttons::PlayVisible => "[ ▶ play ]",
        Buttons::PauseVisible => "[ ⏸ pause ]",
    };

    let mut first = button.to_string();
    if let Some(name) = footer.text(Region::SongName) {
        first.push_str("  ");
        first.push_str(name);
    }

    let mut lines = vec![Line::from(first)];

    if let Some(poster) = footer.text(Region::Poster) {
        lines.push(Line::from(format!("Poster: {poster}")));
    }

    let time = match (footer.text(Region::Elapsed), footer.text(Region::Total)) {
        (Some(e), Some(t)) => Some(format!("{} / {}", or_blank(e), or_blank(t))),
        (Some(e), None) => Some(or_blank(e).to_string()),
        (None, Some(t)) => Some(format!("/ {}", or_blank(t))),
        (None, None) => None,
    };
    let vol = format!("Vol: {}", volume_bar(volume, 10));
    lines.push(Line::from(match time {
        Some(t) => format!("{t}   {vol}"),
        None => vol,
    }));

    lines
}

fn or_blank(s: &str) -> &str {
    if s.is_empty() { "-:--" } else { s }
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    playlist: &Playlist,
    now_playing: Option<usize>,
    footer: &Footer,
    ui_settings: &UiSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let title = match &app.playlist_path {
        Some(p) => format!(" songbar: {p} "),
        None => " songbar ".to_string(),
    };
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Track entries
    {
        let total = playlist.len();
        let list_height = chunks[1].height.saturating_sub(2) as usize;

        // Only build ListItems for the visible window, centered on the cursor.
        let (start, end) = if total <= list_height || list_height == 0 {
            (0, total)
        } else {
            let half = list_height / 2;
            let mut start = app.selected.saturating_sub(half);
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height)
        };

        let items: Vec<ListItem> = playlist.tracks()[start..end]
            .iter()
            .enumerate()
            .map(|(offset, track)| {
                let i = start + offset;
                let marker = if now_playing == Some(i) { "♪ " } else { "  " };
                ListItem::new(format!("{marker}{:>3}. {}", i + 1, track.display_name()))
            })
            .collect();

        let list_title = if total == 0 {
            " tracks (none loaded) ".to_string()
        } else {
            format!(" tracks ({total}) ")
        };
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(list_title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if total > 0 {
            state.select(Some(app.selected.saturating_sub(start)));
        }
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    let footer_par = Paragraph::new(footer_lines(footer, app.volume))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" now playing "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer_par, chunks[2]);

    let controls = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(controls, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::FooterView;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn volume_bar_fills_proportionally() {
        assert_eq!(volume_bar(0.0, 4), "░░░░   0%");
        assert_eq!(volume_bar(0.5, 4), "██░░  50%");
        assert_eq!(volume_bar(1.0, 4), "████ 100%");
    }

    #[test]
    fn footer_lines_show_button_and_bound_regions() {
        let mut footer = Footer::bind(&[Region::SongName, Region::Elapsed, Region::Total]);
        footer.write(Region::SongName, "Alpha").unwrap();
        footer.write(Region::Elapsed, "0:07").unwrap();
        footer.set_buttons(Buttons::PauseVisible);

        let lines: Vec<String> = footer_lines(&footer, 1.0).iter().map(line_text).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("pause"));
        assert!(lines[0].ends_with("Alpha"));
        assert!(lines[1].starts_with("0:07 / -:--"));
    }

    #[test]
    fn controls_text_lists_every_binding() {
        let text = controls_text();
        for key in CONTROLS_MAP.keys() {
            assert!(text.contains(&format!("[{key}]")), "missing {key}");
        }
    }
}
