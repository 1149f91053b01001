//! Live stream view: the video element, its loading overlay, and the glue
//! that boots the session controller once the element is mounted.
use dioxus::prelude::*;
use rustylive::config::VIDEO_ELEMENT_ID;

#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};
#[cfg(target_arch = "wasm32")]
use rustylive::web::WebPlatform;
#[cfg(target_arch = "wasm32")]
use rustylive::{EventBus, Feedback, InputEvent, PlayerConfig, StatusText};
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

/// Overlay state the controller reports into.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy)]
struct LiveFeedback {
    overlay_visible: Signal<bool>,
    status: Signal<Option<&'static str>>,
}

/// Writes controller feedback into the view's signals. Callbacks arrive from
/// browser timers and media events, outside the Dioxus scheduler.
#[cfg(target_arch = "wasm32")]
struct SignalFeedback {
    signals: LiveFeedback,
    runtime: Rc<Runtime>,
}

#[cfg(target_arch = "wasm32")]
impl Feedback for SignalFeedback {
    fn set_overlay_visible(&mut self, visible: bool) {
        let _guard = RuntimeGuard::new(self.runtime.clone());
        if *self.signals.overlay_visible.peek() != visible {
            self.signals.overlay_visible.set(visible);
        }
    }

    fn set_status(&mut self, status: StatusText) {
        let _guard = RuntimeGuard::new(self.runtime.clone());
        self.signals.status.set(Some(status.as_str()));
    }
}

#[cfg(target_arch = "wasm32")]
type LiveBus = EventBus<WebPlatform<SignalFeedback>>;

#[cfg(target_arch = "wasm32")]
thread_local! {
    static LIVE_SESSION: RefCell<Option<Rc<LiveBus>>> = const { RefCell::new(None) };
}

#[cfg(target_arch = "wasm32")]
fn start_live_session(signals: LiveFeedback) {
    if LIVE_SESSION.with(|slot| slot.borrow().is_some()) {
        return;
    }

    let feedback = SignalFeedback {
        signals,
        runtime: Runtime::current(),
    };
    let platform = match WebPlatform::from_document(VIDEO_ELEMENT_ID, feedback) {
        Ok(platform) => platform,
        Err(err) => {
            tracing::warn!(error = %err, "live view not mounted; playback not started");
            return;
        }
    };

    let bus = EventBus::new(platform, PlayerConfig::default());
    LIVE_SESSION.with(|slot| *slot.borrow_mut() = Some(bus.clone()));
    bus.dispatch(InputEvent::Initialize);
}

#[component]
pub fn LiveView() -> Element {
    let overlay_visible = use_signal(|| true);
    let status = use_signal(|| None::<&'static str>);

    #[cfg(target_arch = "wasm32")]
    {
        let signals = LiveFeedback {
            overlay_visible,
            status,
        };
        use_effect(move || start_live_session(signals));
        use_drop(|| {
            // controller teardown releases the player, listeners and timers
            let _ = LIVE_SESSION.with(|slot| slot.borrow_mut().take());
        });
    }

    rsx! {
        div { class: "live-stage",
            video {
                id: VIDEO_ELEMENT_ID,
                class: "live-video",
                controls: true,
                "playsinline": "true",
            }
            if overlay_visible() {
                div { class: "loading-overlay",
                    div { class: "spinner" }
                    {status().map(|text| rsx! {
                        p { class: "status-text", "{text}" }
                    })}
                }
            }
        }
    }
}
