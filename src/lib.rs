//! RustyLive - keeps a live FLV stream playing in a browser video element.
//! Reconciles engine errors, media element events and user play intent into
//! one session state, rebuilding the player until the stream comes back.

pub mod config;
pub mod error;
pub mod platform;
pub mod session;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{EngineConfig, MediaDataSource, PlayerConfig, Timing};
pub use error::PlayerError;
pub use platform::{Feedback, Platform, Player};
pub use session::{
    Disposition, EngineErrorKind, EventBus, EventSink, InputEvent, PlayReason,
    PlaybackSessionController, SessionId, SessionState, StatusText,
};
