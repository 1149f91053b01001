//! `<video>` lifecycle listeners for a single session.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Event, HtmlMediaElement};

use crate::session::{Disposition, EventSink, InputEvent, SessionId};

type Listener = Closure<dyn FnMut(Event)>;

/// Listeners registered for one session. Dropping removes them all.
pub struct ElementListeners {
    element: HtmlMediaElement,
    registered: Vec<(&'static str, Listener)>,
}

impl ElementListeners {
    pub fn register(element: &HtmlMediaElement, session: SessionId, sink: EventSink) -> Self {
        let mut listeners = Self {
            element: element.clone(),
            registered: Vec::with_capacity(4),
        };

        let metadata_sink = sink.clone();
        listeners.add(
            "loadedmetadata",
            true,
            Box::new(move |_event: Event| {
                metadata_sink.send(InputEvent::MetadataLoaded { session });
            }),
        );

        let canplay_sink = sink.clone();
        listeners.add(
            "canplay",
            true,
            Box::new(move |_event: Event| {
                canplay_sink.send(InputEvent::CanPlay { session });
            }),
        );

        let play_sink = sink.clone();
        listeners.add(
            "play",
            false,
            Box::new(move |event: Event| {
                if play_sink.send(InputEvent::PlayAttempted { session }) == Disposition::Vetoed {
                    event.prevent_default();
                }
            }),
        );

        let error_element = element.clone();
        listeners.add(
            "error",
            false,
            Box::new(move |_event: Event| {
                let code = error_element.error().map(|error| error.code());
                sink.send(InputEvent::ElementError { session, code });
            }),
        );

        listeners
    }

    fn add(&mut self, name: &'static str, once: bool, handler: Box<dyn FnMut(Event)>) {
        let listener = Closure::wrap(handler);
        let callback = listener.as_ref().unchecked_ref();
        let added = if once {
            let options = AddEventListenerOptions::new();
            options.set_once(true);
            self.element
                .add_event_listener_with_callback_and_add_event_listener_options(
                    name, callback, &options,
                )
        } else {
            self.element.add_event_listener_with_callback(name, callback)
        };
        if let Err(err) = added {
            tracing::warn!(event = name, error = %super::mpegts::describe(&err), "failed to add media listener");
            return;
        }
        self.registered.push((name, listener));
    }
}

impl Drop for ElementListeners {
    fn drop(&mut self) {
        for (name, listener) in self.registered.drain(..) {
            let _ = self
                .element
                .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
        }
    }
}
