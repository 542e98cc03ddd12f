//! Native host bridges reachable from the embedded web view.
//!
//! Android injects a `window.Android` object whose methods take the payload
//! directly. iOS exposes `window.webkit.messageHandlers.<name>` handlers
//! that take it through `postMessage`.

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use crate::host::event::{HostEvent, HostSink};

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

fn property(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn payload(event: &HostEvent) -> JsValue {
    match event {
        HostEvent::LoadingProgress(p) => JsValue::from_f64(f64::from(*p)),
        HostEvent::Ready | HostEvent::Loaded => JsValue::NULL,
        HostEvent::SelectionChanged(Some(i)) => JsValue::from_f64(*i as f64),
        HostEvent::SelectionChanged(None) => JsValue::NULL,
        HostEvent::SnapshotReady(b64) => JsValue::from_str(&format!("{DATA_URL_PREFIX}{b64}")),
        HostEvent::Log(message) => JsValue::from_str(message),
    }
}

/// `window.Android.<method>(payload)`.
pub struct AndroidBridgeSink {
    bridge: JsValue,
}

impl AndroidBridgeSink {
    #[must_use]
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        property(&window, "Android").map(|bridge| Self { bridge })
    }
}

impl HostSink for AndroidBridgeSink {
    fn notify(&self, event: HostEvent) {
        let func = property(&self.bridge, event.method())
            .and_then(|f| f.dyn_into::<Function>().ok());
        let Some(func) = func else {
            log::warn!("Android bridge has no '{}' method", event.method());
            return;
        };
        let result = match &event {
            HostEvent::Ready | HostEvent::Loaded => func.call0(&self.bridge),
            other => func.call1(&self.bridge, &payload(other)),
        };
        if let Err(err) = result {
            log::warn!("Android bridge '{}' threw: {err:?}", event.method());
        }
    }
}

/// `window.webkit.messageHandlers.<method>.postMessage(payload)`.
pub struct WebKitSink {
    handlers: JsValue,
}

impl WebKitSink {
    #[must_use]
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let webkit = property(&window, "webkit")?;
        property(&webkit, "messageHandlers").map(|handlers| Self { handlers })
    }
}

impl HostSink for WebKitSink {
    fn notify(&self, event: HostEvent) {
        let Some(handler) = property(&self.handlers, event.method()) else {
            log::debug!("No WebKit handler for '{}'", event.method());
            return;
        };
        let post = property(&handler, "postMessage").and_then(|f| f.dyn_into::<Function>().ok());
        let Some(post) = post else {
            return;
        };
        if let Err(err) = post.call1(&handler, &payload(&event)) {
            log::warn!("WebKit handler '{}' threw: {err:?}", event.method());
        }
    }
}
