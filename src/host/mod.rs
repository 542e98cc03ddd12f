//! Host Bridge
//!
//! Everything that crosses the boundary to the embedding native app.
//!
//! - [`HostEvent`] / [`HostSink`]: outbound notifications
//! - [`HostCommand`]: inbound JSON requests
//! - [`detect_sink`]: picks the sink for the current environment once at
//!   startup

pub mod command;
pub mod event;

#[cfg(target_arch = "wasm32")]
pub mod bridge;

pub use command::{HostCommand, JointRef};
pub use event::{HostEvent, HostSink, LogSink, RecordingSink};

/// The sink for the current environment.
///
/// On `wasm32` an Android bridge wins over WebKit handlers; without either
/// (and on every other target) events go to the log.
#[must_use]
pub fn detect_sink() -> Box<dyn HostSink> {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(sink) = bridge::AndroidBridgeSink::detect() {
            log::info!("Host bridge: Android");
            return Box::new(sink);
        }
        if let Some(sink) = bridge::WebKitSink::detect() {
            log::info!("Host bridge: WebKit");
            return Box::new(sink);
        }
    }
    log::info!("Host bridge: console");
    Box::new(LogSink)
}
