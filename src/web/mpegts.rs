//! Bindings to the global `mpegts` object provided by mpegts.js.

use js_sys::{Function, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlMediaElement;

use crate::config::{EngineConfig, MediaDataSource};
use crate::error::{PlayerError, Result};
use crate::platform::Player;
use crate::session::{EngineErrorKind, EventSink, InputEvent, SessionId};

/// `mpegts.Events.ERROR`
const ERROR_EVENT: &str = "error";

mod ffi {
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlMediaElement;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(catch, js_namespace = mpegts, js_name = isSupported)]
        pub fn is_supported() -> Result<bool, JsValue>;

        #[wasm_bindgen(catch, js_namespace = mpegts, js_name = createPlayer)]
        pub fn create_player(
            media_data_source: &JsValue,
            config: &JsValue,
        ) -> Result<MpegtsPlayer, JsValue>;

        pub type MpegtsPlayer;

        #[wasm_bindgen(catch, method, js_name = attachMediaElement)]
        pub fn attach_media_element(
            this: &MpegtsPlayer,
            element: &HtmlMediaElement,
        ) -> Result<(), JsValue>;

        #[wasm_bindgen(catch, method, js_name = detachMediaElement)]
        pub fn detach_media_element(this: &MpegtsPlayer) -> Result<(), JsValue>;

        #[wasm_bindgen(catch, method)]
        pub fn load(this: &MpegtsPlayer) -> Result<(), JsValue>;

        #[wasm_bindgen(catch, method)]
        pub fn unload(this: &MpegtsPlayer) -> Result<(), JsValue>;

        #[wasm_bindgen(catch, method)]
        pub fn pause(this: &MpegtsPlayer) -> Result<(), JsValue>;

        #[wasm_bindgen(catch, method)]
        pub fn destroy(this: &MpegtsPlayer) -> Result<(), JsValue>;

        #[wasm_bindgen(catch, method)]
        pub fn on(this: &MpegtsPlayer, event: &str, listener: &js_sys::Function)
            -> Result<(), JsValue>;

        #[wasm_bindgen(catch, method)]
        pub fn off(this: &MpegtsPlayer, event: &str, listener: &js_sys::Function)
            -> Result<(), JsValue>;
    }
}

/// True when mpegts.js is loaded and reports MSE support.
pub fn is_supported() -> bool {
    let loaded = Reflect::get(&js_sys::global(), &JsValue::from_str("mpegts"))
        .map(|value| !value.is_undefined() && !value.is_null())
        .unwrap_or(false);
    loaded && ffi::is_supported().unwrap_or(false)
}

/// Readable message out of whatever a JS call threw.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn js_call(op: &'static str, result: std::result::Result<(), JsValue>) -> Result<()> {
    result.map_err(|err| PlayerError::js(op, describe(&err)))
}

/// Serializes through JSON so field renames stay in one place.
fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue> {
    let json = serde_json::to_string(value)?;
    js_sys::JSON::parse(&json).map_err(|err| PlayerError::js("JSON.parse", describe(&err)))
}

type ErrorCallback = Closure<dyn FnMut(JsValue, JsValue, JsValue)>;

pub struct MpegtsStreamPlayer {
    inner: ffi::MpegtsPlayer,
    element: HtmlMediaElement,
    on_error: Option<ErrorCallback>,
}

impl MpegtsStreamPlayer {
    pub fn create(
        source: &MediaDataSource,
        config: &EngineConfig,
        element: HtmlMediaElement,
    ) -> Result<Self> {
        let inner = ffi::create_player(&to_js(source)?, &to_js(config)?)
            .map_err(|err| PlayerError::js("createPlayer", describe(&err)))?;
        Ok(Self {
            inner,
            element,
            on_error: None,
        })
    }

    fn unsubscribe(&mut self) -> Result<()> {
        let Some(callback) = self.on_error.as_ref() else {
            return Ok(());
        };
        let listener: &Function = callback.as_ref().unchecked_ref();
        js_call("off", self.inner.off(ERROR_EVENT, listener))
    }
}

impl Player for MpegtsStreamPlayer {
    fn attach_media_element(&mut self) -> Result<()> {
        js_call(
            "attachMediaElement",
            self.inner.attach_media_element(&self.element),
        )
    }

    fn subscribe_errors(&mut self, session: SessionId, sink: EventSink) -> Result<()> {
        let callback: ErrorCallback = Closure::wrap(Box::new(
            move |error_type: JsValue, error_detail: JsValue, _info: JsValue| {
                let kind = error_type
                    .as_string()
                    .map(|value| EngineErrorKind::from_error_type(&value))
                    .unwrap_or(EngineErrorKind::Other);
                sink.send(InputEvent::EngineError {
                    session,
                    kind,
                    detail: error_detail.as_string().unwrap_or_default(),
                });
            },
        ) as Box<dyn FnMut(JsValue, JsValue, JsValue)>);

        self.unsubscribe()?;
        js_call(
            "on",
            self.inner
                .on(ERROR_EVENT, callback.as_ref().unchecked_ref()),
        )?;
        self.on_error = Some(callback);
        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        js_call("load", self.inner.load())
    }

    fn pause(&mut self) -> Result<()> {
        js_call("pause", self.inner.pause())
    }

    fn unload(&mut self) -> Result<()> {
        js_call("unload", self.inner.unload())
    }

    fn detach_media_element(&mut self) -> Result<()> {
        js_call("detachMediaElement", self.inner.detach_media_element())
    }

    fn destroy(&mut self) -> Result<()> {
        // keep the closure alive until the engine can no longer call it
        let unsubscribed = self.unsubscribe();
        let destroyed = js_call("destroy", self.inner.destroy());
        self.on_error = None;
        destroyed.and(unsubscribed)
    }
}
