use std::cell::RefCell;
use std::rc::Rc;

/// Outbound notification to the embedding application.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// Share of settled asset loads, `0.0..=100.0`.
    LoadingProgress(f32),
    /// Every asset load has settled.
    Ready,
    /// The first frame after the first pose was presented. Sent once.
    Loaded,
    /// Pose index of the newly selected joint, `None` after a deselect.
    SelectionChanged(Option<usize>),
    /// Base64 PNG without a data URL prefix.
    SnapshotReady(String),
    Log(String),
}

impl HostEvent {
    /// Bridge method name used by the native hosts.
    #[must_use]
    pub fn method(&self) -> &'static str {
        match self {
            HostEvent::LoadingProgress(_) => "loading",
            HostEvent::Ready => "webStart",
            HostEvent::Loaded => "loaded",
            HostEvent::SelectionChanged(_) => "sendData",
            HostEvent::SnapshotReady(_) => "getBlob",
            HostEvent::Log(_) => "log",
        }
    }
}

/// Receives host events. Delivery is fire-and-forget.
pub trait HostSink {
    fn notify(&self, event: HostEvent);
}

impl<S: HostSink + ?Sized> HostSink for Box<S> {
    fn notify(&self, event: HostEvent) {
        (**self).notify(event);
    }
}

impl<S: HostSink + ?Sized> HostSink for Rc<S> {
    fn notify(&self, event: HostEvent) {
        (**self).notify(event);
    }
}

/// Writes events to the `log` facade. Used when no native bridge exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl HostSink for LogSink {
    fn notify(&self, event: HostEvent) {
        match &event {
            HostEvent::SnapshotReady(data) => {
                log::info!("[Platform] {}: {} bytes of base64", event.method(), data.len());
            }
            HostEvent::Log(message) => log::warn!("[Platform] {}: {message}", event.method()),
            other => log::info!("[Platform] {}: {other:?}", other.method()),
        }
    }
}

/// Collects events in a shared buffer.
///
/// Clones share the buffer, so one clone can be handed to the viewer while
/// another is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Rc<RefCell<Vec<HostEvent>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<HostEvent> {
        self.events.borrow().clone()
    }

    /// Drains the buffer.
    pub fn take(&self) -> Vec<HostEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    #[must_use]
    pub fn count(&self, pred: impl Fn(&HostEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }
}

impl HostSink for RecordingSink {
    fn notify(&self, event: HostEvent) {
        self.events.borrow_mut().push(event);
    }
}
