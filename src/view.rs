//! The footer the playback controller writes into.
//!
//! Regions are bound once when the footer is built; the controller only sees
//! the `FooterView` capability and never looks regions up itself.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// A named text region of the footer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    SongName,
    Poster,
    Elapsed,
    Total,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::SongName => "song-name",
            Region::Poster => "poster",
            Region::Elapsed => "elapsed",
            Region::Total => "total",
        };
        f.write_str(name)
    }
}

/// Which of the two transport buttons is shown. They are never both visible.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Buttons {
    #[default]
    PlayVisible,
    PauseVisible,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("footer region `{0}` is not bound")]
    MissingRegion(Region),
}

pub trait FooterView {
    /// Replace the text of `region`.
    fn write(&mut self, region: Region, text: &str) -> Result<(), ViewError>;
    fn set_buttons(&mut self, buttons: Buttons);
    fn buttons(&self) -> Buttons;
}

/// Footer state rendered by the UI.
#[derive(Debug, Clone, Default)]
pub struct Footer {
    regions: BTreeMap<Region, String>,
    buttons: Buttons,
}

impl Footer {
    /// Bind the given regions, all initially blank, with the play button showing.
    pub fn bind(regions: &[Region]) -> Self {
        let regions = regions.iter().map(|r| (*r, String::new())).collect();
        Self {
            regions,
            buttons: Buttons::PlayVisible,
        }
    }

    /// Text of `region`, or `None` when it was not bound.
    pub fn text(&self, region: Region) -> Option<&str> {
        self.regions.get(&region).map(String::as_str)
    }
}

impl FooterView for Footer {
    fn write(&mut self, region: Region, text: &str) -> Result<(), ViewError> {
        let slot = self
            .regions
            .get_mut(&region)
            .ok_or(ViewError::MissingRegion(region))?;
        slot.clear();
        slot.push_str(text);
        Ok(())
    }

    fn set_buttons(&mut self, buttons: Buttons) {
        self.buttons = buttons;
    }

    fn buttons(&self) -> Buttons {
        self.buttons
    }
}

/// Format a duration as `m:ss`. Minutes are not padded; partial seconds are dropped.
pub fn format_time(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_pads_seconds_only() {
        let cases = [(0, "0:00"), (59, "0:59"), (60, "1:00"), (125, "2:05"), (600, "10:00")];
        for (secs, expected) in cases {
            assert_eq!(format_time(Duration::from_secs(secs)), expected);
        }
        assert_eq!(format_time(Duration::from_millis(61_999)), "1:01");
    }

    #[test]
    fn bound_footer_starts_blank_with_play_visible() {
        let footer = Footer::bind(&[Region::SongName, Region::Total]);
        assert_eq!(footer.text(Region::SongName), Some(""));
        assert_eq!(footer.text(Region::Poster), None);
        assert_eq!(footer.buttons(), Buttons::PlayVisible);
    }

    #[test]
    fn write_to_unbound_region_is_rejected() {
        let mut footer = Footer::bind(&[Region::Elapsed]);
        assert_eq!(footer.write(Region::Elapsed, "0:42"), Ok(()));
        assert_eq!(footer.text(Region::Elapsed), Some("0:42"));
        assert_eq!(
            footer.write(Region::Poster, "x.jpg"),
            Err(ViewError::MissingRegion(Region::Poster))
        );
    }
}
