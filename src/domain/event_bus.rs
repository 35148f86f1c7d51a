//! Fan-out bus for plug events.
//!
//! [`EventBus`] keeps a registry of subscribers, each owning a bounded
//! [`tokio::sync::mpsc`] queue. [`EventBus::publish`] offers the event to
//! every queue without waiting, so a stalled subscriber never holds up the
//! producer or the other subscribers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

use super::{PlugEvent, SubscriberId};

type Registry = HashMap<SubscriberId, mpsc::Sender<PlugEvent>>;

/// Broadcast bus for [`PlugEvent`]s.
///
/// Cloning is cheap; all clones share one registry. Events published while
/// nobody is subscribed are dropped, there is no backlog.
///
/// # Overflow
///
/// Every subscriber gets a queue of `capacity` events. When a queue is full
/// at publish time the subscriber is evicted: its sender is dropped, so the
/// session drains what is already queued, sees end-of-stream and closes.
#[derive(Debug, Clone)]
pub struct EventBus {
    subscribers: Arc<Mutex<Registry>>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new `EventBus` with the given per-subscriber queue capacity.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    /// Registers a new subscriber that will receive all future events.
    ///
    /// Each WebSocket session calls this once after the upgrade completes.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        let id = SubscriberId::new();
        let (sender, receiver) = mpsc::channel(self.capacity);
        let count = {
            let mut registry = self.registry();
            registry.insert(id, sender);
            registry.len()
        };
        tracing::debug!(subscriber = %id, subscribers = count, "subscriber registered");

        Subscription {
            id,
            receiver,
            bus: Some(self.clone()),
        }
    }

    /// Publishes an event to every registered subscriber.
    ///
    /// The registry lock is held for the whole fan-out, so concurrent
    /// publishes are totally ordered and each subscriber sees events in
    /// publish order. Subscribers whose queue is full or closed are removed.
    ///
    /// Returns the number of subscribers the event was queued for.
    pub fn publish(&self, event: PlugEvent) -> usize {
        let mut delivered = 0;
        self.registry()
            .retain(|id, sender| match sender.try_send(event) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::warn!(subscriber = %id, "subscriber queue full, evicting");
                    false
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    tracing::debug!(subscriber = %id, "pruning closed subscriber");
                    false
                }
            });
        delivered
    }

    /// Removes a subscriber from the registry.
    ///
    /// Idempotent: returns `false` if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let removed = self.registry().remove(&id).is_some();
        if removed {
            tracing::debug!(subscriber = %id, "subscriber removed");
        }
        removed
    }

    /// Returns the current number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.registry().len()
    }

    // A panic while holding the lock cannot leave the map half-updated,
    // so a poisoned registry is still usable.
    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle returned by [`EventBus::subscribe`].
///
/// Receives events published after registration. Dropping the handle
/// unsubscribes it.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriberId,
    receiver: mpsc::Receiver<PlugEvent>,
    bus: Option<EventBus>,
}

impl Subscription {
    /// Identifier of this registration.
    #[must_use]
    pub const fn id(&self) -> SubscriberId {
        self.id
    }

    /// Waits for the next event.
    ///
    /// Returns `None` once the subscription is closed, either locally or
    /// because the bus evicted it, and the queue has been drained.
    pub async fn recv(&mut self) -> Option<PlugEvent> {
        self.receiver.recv().await
    }

    /// Unsubscribes from the bus and discards anything still queued.
    ///
    /// Only the first call touches the bus. Returns `true` if this call
    /// removed the registration.
    pub fn close(&mut self) -> bool {
        self.receiver.close();
        while self.receiver.try_recv().is_ok() {}
        self.bus
            .take()
            .is_some_and(|bus| bus.unsubscribe(self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use tokio_test::{assert_pending, task};

    fn make_event(plug: i64, state: bool) -> PlugEvent {
        let Ok(event) = PlugEvent::new(plug, state) else {
            panic!("valid event");
        };
        event
    }

    #[test]
    fn publish_without_subscribers_returns_zero() {
        let bus = EventBus::new(8);
        let count = bus.publish(make_event(2, true));
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn subscriber_receives_event() {
        let bus = EventBus::new(8);
        let mut sub = bus.subscribe();

        bus.publish(make_event(3, true));

        let Some(event) = sub.recv().await else {
            panic!("expected to receive event");
        };
        assert_eq!(event, make_event(3, true));
    }

    #[tokio::test]
    async fn every_subscriber_gets_exactly_one_copy() {
        let bus = EventBus::new(8);
        let mut subs: Vec<Subscription> = (0..4).map(|_| bus.subscribe()).collect();

        let count = bus.publish(make_event(1, false));
        assert_eq!(count, 4);

        for sub in &mut subs {
            let Some(event) = sub.recv().await else {
                panic!("subscriber {} missed the event", sub.id());
            };
            assert_eq!(event, make_event(1, false));

            let mut next = task::spawn(sub.recv());
            assert_pending!(next.poll());
        }
    }

    #[tokio::test]
    async fn events_arrive_in_publish_order() {
        let bus = EventBus::new(8);
        let mut sub = bus.subscribe();

        bus.publish(make_event(0, true));
        bus.publish(make_event(0, false));
        bus.publish(make_event(4, true));

        assert_eq!(sub.recv().await, Some(make_event(0, true)));
        assert_eq!(sub.recv().await, Some(make_event(0, false)));
        assert_eq!(sub.recv().await, Some(make_event(4, true)));
    }

    #[tokio::test]
    async fn subscriber_only_sees_events_after_registration() {
        let bus = EventBus::new(8);
        bus.publish(make_event(2, true));

        let mut sub = bus.subscribe();
        let mut next = task::spawn(sub.recv());
        assert_pending!(next.poll());
    }

    #[test]
    fn subscriber_count_tracks_registrations() {
        let bus = EventBus::new(8);
        assert_eq!(bus.subscriber_count(), 0);

        let sub1 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        let _sub2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        drop(sub1);
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let bus = EventBus::new(8);
        let mut sub = bus.subscribe();
        let id = sub.id();

        assert!(sub.close());
        assert!(!sub.close());
        assert!(!bus.unsubscribe(id));
        assert!(!bus.unsubscribe(SubscriberId::new()));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn closed_subscription_gets_no_late_deliveries() {
        let bus = EventBus::new(8);
        let mut sub = bus.subscribe();
        bus.publish(make_event(1, true));

        sub.close();
        assert_eq!(bus.publish(make_event(2, true)), 0);
        assert_eq!(sub.recv().await, None);
    }

    #[tokio::test]
    async fn full_subscriber_is_evicted_without_blocking_others() {
        let bus = EventBus::new(2);
        let mut slow = bus.subscribe();
        let mut fast = bus.subscribe();

        for state in [true, false] {
            bus.publish(make_event(0, state));
            assert_eq!(fast.recv().await, Some(make_event(0, state)));
        }

        // `slow` never drained its two queued events.
        let count = bus.publish(make_event(1, true));
        assert_eq!(count, 1);
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(fast.recv().await, Some(make_event(1, true)));

        assert_eq!(slow.recv().await, Some(make_event(0, true)));
        assert_eq!(slow.recv().await, Some(make_event(0, false)));
        assert_eq!(slow.recv().await, None);
    }

    #[tokio::test]
    async fn concurrent_publishers_keep_a_single_order() {
        let bus = EventBus::new(256);
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        let producers: Vec<_> = (0..4)
            .map(|plug| {
                let bus = bus.clone();
                tokio::spawn(async move {
                    for i in 0..25 {
                        bus.publish(make_event(plug, i % 2 == 0));
                    }
                })
            })
            .collect();
        for producer in producers {
            let _ = producer.await;
        }

        let mut seen_first = Vec::new();
        let mut seen_second = Vec::new();
        for _ in 0..100 {
            seen_first.extend(first.recv().await);
            seen_second.extend(second.recv().await);
        }
        assert_eq!(seen_first.len(), 100);
        assert_eq!(seen_first, seen_second);
    }
}
