use std::task::{Context, Poll};

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::task::noop_waker_ref;

use crate::assets::loader::LoadFuture;
use crate::assets::model::ModelAsset;
use crate::errors::Result;

/// A set of in-flight asset loads, each tagged with a key.
///
/// Loads are joined into a single `FuturesUnordered` and polled
/// cooperatively from the owner's frame callback with a no-op waker, so
/// nothing here needs to be `Send` or to run on an executor. The set is
/// *settled* once every load has produced a result, success or failure.
pub struct PendingLoads<K> {
    in_flight: FuturesUnordered<LocalBoxFuture<'static, (K, Result<ModelAsset>)>>,
    total: usize,
    settled: usize,
}

impl<K: 'static> PendingLoads<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            in_flight: FuturesUnordered::new(),
            total: 0,
            settled: 0,
        }
    }

    pub fn push(&mut self, key: K, load: LoadFuture) {
        self.total += 1;
        self.in_flight
            .push(load.map(move |result| (key, result)).boxed_local());
    }

    /// Drains every load that is ready right now.
    pub fn poll_ready(&mut self) -> Vec<(K, Result<ModelAsset>)> {
        let mut cx = Context::from_waker(noop_waker_ref());
        let mut ready = Vec::new();
        while let Poll::Ready(Some(item)) = self.in_flight.poll_next_unpin(&mut cx) {
            self.settled += 1;
            ready.push(item);
        }
        ready
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn settled(&self) -> usize {
        self.settled
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.in_flight.is_empty()
    }
}

impl<K: 'static> Default for PendingLoads<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::model::ModelNode;
    use futures::channel::oneshot;

    #[test]
    fn settles_only_after_every_load_resolves() {
        let mut pending: PendingLoads<u8> = PendingLoads::new();
        let (tx, rx) = oneshot::channel::<()>();

        let ready = ModelAsset::new("a", ModelNode::group("a"));
        pending.push(1, futures::future::ready(Ok(ready)).boxed_local());
        pending.push(
            2,
            async move {
                let _ = rx.await;
                Ok(ModelAsset::new("b", ModelNode::group("b")))
            }
            .boxed_local(),
        );

        let first = pending.poll_ready();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].0, 1);
        assert!(!pending.is_settled());
        assert_eq!(pending.settled(), 1);

        tx.send(()).unwrap();
        let second = pending.poll_ready();
        assert_eq!(second.len(), 1);
        assert!(pending.is_settled());
        assert_eq!(pending.settled(), 2);
    }
}
