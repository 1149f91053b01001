//! The components module contains the live playback view.

mod live_view;

pub use live_view::*;
