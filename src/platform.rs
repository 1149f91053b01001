//! Seams between the controller and the outside world.
//!
//! The browser build implements these over mpegts.js, `HtmlVideoElement` and
//! gloo timers; tests implement them with a recording fake.

use std::time::Duration;

use crate::config::{EngineConfig, MediaDataSource};
use crate::error::Result;
use crate::session::{EventSink, InputEvent, PlayReason, SessionId, StatusText};

/// One streaming engine player instance.
pub trait Player {
    fn attach_media_element(&mut self) -> Result<()>;
    /// Deliver engine errors for `session` to `sink` until destroyed.
    fn subscribe_errors(&mut self, session: SessionId, sink: EventSink) -> Result<()>;
    fn load(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn unload(&mut self) -> Result<()>;
    fn detach_media_element(&mut self) -> Result<()>;
    fn destroy(&mut self) -> Result<()>;
}

/// Overlay and status line.
pub trait Feedback {
    fn set_overlay_visible(&mut self, visible: bool);
    fn set_status(&mut self, status: StatusText);
}

pub trait Platform: Feedback {
    type Player: Player;
    /// Media element listeners for one session. Dropping removes them.
    type Listeners;
    /// Scheduled timer. Dropping cancels it.
    type Timer;

    fn engine_supported(&self) -> bool;

    fn create_player(
        &mut self,
        source: &MediaDataSource,
        config: &EngineConfig,
    ) -> Result<Self::Player>;

    /// Register `loadedmetadata` and `canplay` (one-shot), `play` and `error`.
    fn watch_element(&mut self, session: SessionId, sink: EventSink) -> Self::Listeners;

    /// Call the element's `play()`; a rejection comes back as `PlayRejected`.
    fn play_element(&mut self, session: SessionId, reason: PlayReason, sink: EventSink);

    fn pause_element(&mut self);

    fn schedule_interval(&mut self, period: Duration, sink: EventSink, event: InputEvent)
        -> Self::Timer;

    fn schedule_timeout(&mut self, delay: Duration, sink: EventSink, event: InputEvent)
        -> Self::Timer;
}
