//! Browser implementation of the platform seams.

mod element;
mod mpegts;
mod timers;

use std::time::Duration;

use wasm_bindgen::JsCast;
use web_sys::{window, HtmlMediaElement, HtmlVideoElement};

use crate::config::{EngineConfig, MediaDataSource};
use crate::error::{PlayerError, Result};
use crate::platform::{Feedback, Platform};
use crate::session::{EventSink, InputEvent, PlayReason, SessionId, StatusText};

pub use element::ElementListeners;
pub use mpegts::MpegtsStreamPlayer;
pub use timers::WebTimer;

/// Drives mpegts.js and a `<video>` element, reporting to `F`.
pub struct WebPlatform<F: Feedback> {
    element: HtmlMediaElement,
    feedback: F,
}

impl<F: Feedback> WebPlatform<F> {
    pub fn new(element: HtmlVideoElement, feedback: F) -> Self {
        Self {
            element: element.into(),
            feedback,
        }
    }

    /// Looks the video element up by id.
    pub fn from_document(element_id: &'static str, feedback: F) -> Result<Self> {
        let element = window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.get_element_by_id(element_id))
            .and_then(|el| el.dyn_into::<HtmlVideoElement>().ok())
            .ok_or(PlayerError::ElementMissing(element_id))?;
        Ok(Self::new(element, feedback))
    }
}

impl<F: Feedback> Feedback for WebPlatform<F> {
    fn set_overlay_visible(&mut self, visible: bool) {
        self.feedback.set_overlay_visible(visible);
    }

    fn set_status(&mut self, status: StatusText) {
        self.feedback.set_status(status);
    }
}

impl<F: Feedback> Platform for WebPlatform<F> {
    type Player = MpegtsStreamPlayer;
    type Listeners = ElementListeners;
    type Timer = WebTimer;

    fn engine_supported(&self) -> bool {
        mpegts::is_supported()
    }

    fn create_player(
        &mut self,
        source: &MediaDataSource,
        config: &EngineConfig,
    ) -> Result<MpegtsStreamPlayer> {
        MpegtsStreamPlayer::create(source, config, self.element.clone())
    }

    fn watch_element(&mut self, session: SessionId, sink: EventSink) -> ElementListeners {
        ElementListeners::register(&self.element, session, sink)
    }

    fn play_element(&mut self, session: SessionId, reason: PlayReason, sink: EventSink) {
        match self.element.play() {
            Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
                    sink.send(InputEvent::PlayRejected {
                        session,
                        reason,
                        message: mpegts::describe(&err),
                    });
                }
            }),
            Err(err) => {
                sink.send(InputEvent::PlayRejected {
                    session,
                    reason,
                    message: mpegts::describe(&err),
                });
            }
        }
    }

    fn pause_element(&mut self) {
        if let Err(err) = self.element.pause() {
            tracing::warn!(error = %mpegts::describe(&err), "failed to pause media element");
        }
    }

    fn schedule_interval(&mut self, period: Duration, sink: EventSink, event: InputEvent) -> WebTimer {
        timers::interval(period, sink, event)
    }

    fn schedule_timeout(&mut self, delay: Duration, sink: EventSink, event: InputEvent) -> WebTimer {
        timers::timeout(delay, sink, event)
    }
}
