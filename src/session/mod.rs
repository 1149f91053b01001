//! Playback readiness and reconnection.
//!
//! Engine errors, media element events, timers and user play intent all flow
//! through [`EventBus`] into one [`PlaybackSessionController`], which runs the
//! pure [`transition`] function and carries out the resulting effects.

mod bus;
mod controller;
mod event;
mod release;
mod state;
mod transition;

#[cfg(test)]
mod scenarios;

pub use bus::{EventBus, EventSink};
pub use controller::PlaybackSessionController;
pub use event::{Disposition, EngineErrorKind, InputEvent, PlayReason, StatusText};
pub use release::{try_release, ReleaseStep, ReleaseWarning};
pub use state::{Lifecycle, Phase, SessionId, SessionState};
pub use transition::{transition, Effect, Environment, Step};
