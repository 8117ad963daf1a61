//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the list cursor and the
//! volume slider.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
