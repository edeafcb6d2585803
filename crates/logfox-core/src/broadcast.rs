//! Fan-out of formatted lines to in-process subscribers.
//!
//! Delivery is synchronous and ordered: each published line reaches every
//! subscriber registered before the publish, in registration order. Nothing
//! is delivered while broadcasting is disabled.

use logfox_types::SubscriptionId;
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Callback invoked with each broadcast line.
pub type Callback = Arc<dyn Fn(&str) + Send + Sync>;

/// The subscriber registry and publish point.
pub struct Broadcaster {
    subscribers: RwLock<Vec<(SubscriptionId, Callback)>>,
    next_id: AtomicU64,
    enabled: AtomicBool,
}

impl Broadcaster {
    /// Create a broadcaster; `enabled` is the debug/interactive flag.
    pub fn new(enabled: bool) -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(0),
            enabled: AtomicBool::new(enabled),
        }
    }

    /// Register a callback for all future publishes.
    ///
    /// Subscriptions last for the broadcaster's lifetime.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.write().push((id, Arc::new(callback)));
        tracing::debug!(subscription = %id, "subscriber registered");
        id
    }

    /// Deliver `line` to every subscriber; returns how many received it.
    ///
    /// A panicking subscriber is not isolated from the others.
    pub fn publish(&self, line: &str) -> usize {
        if !self.is_enabled() {
            return 0;
        }

        // Snapshot so callbacks may subscribe without deadlocking.
        let subscribers: Vec<Callback> = self
            .subscribers
            .read()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in &subscribers {
            callback(line);
        }
        subscribers.len()
    }

    /// Whether publishes are delivered.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Turn delivery on or off.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new(false)
    }
}

impl fmt::Debug for Broadcaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Broadcaster")
            .field("subscribers", &self.subscriber_count())
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use proptest::prelude::*;

    fn recorder(
        log: &Arc<Mutex<Vec<(usize, String)>>>,
        index: usize,
    ) -> impl Fn(&str) + Send + Sync {
        let log = Arc::clone(log);
        move |line: &str| log.lock().push((index, line.to_string()))
    }

    #[test]
    fn test_delivery_in_registration_order() {
        let broadcaster = Broadcaster::new(true);
        let log = Arc::new(Mutex::new(Vec::new()));
        for i in 0..3 {
            broadcaster.subscribe(recorder(&log, i));
        }

        assert_eq!(broadcaster.publish("hello"), 3);
        let received = log.lock().clone();
        assert_eq!(
            received,
            vec![(0, "hello".to_string()), (1, "hello".to_string()), (2, "hello".to_string())]
        );
    }

    #[test]
    fn test_disabled_delivers_nothing() {
        let broadcaster = Broadcaster::new(false);
        let log = Arc::new(Mutex::new(Vec::new()));
        broadcaster.subscribe(recorder(&log, 0));

        for _ in 0..100 {
            assert_eq!(broadcaster.publish("quiet"), 0);
        }
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_late_subscriber_misses_earlier_lines() {
        let broadcaster = Broadcaster::new(true);
        let log = Arc::new(Mutex::new(Vec::new()));
        broadcaster.publish("before");
        broadcaster.subscribe(recorder(&log, 0));
        broadcaster.publish("after");

        assert_eq!(log.lock().clone(), vec![(0, "after".to_string())]);
    }

    #[test]
    fn test_subscription_ids_are_distinct() {
        let broadcaster = Broadcaster::default();
        let a = broadcaster.subscribe(|_| {});
        let b = broadcaster.subscribe(|_| {});
        assert_ne!(a, b);
        assert_eq!(broadcaster.subscriber_count(), 2);
    }

    #[test]
    fn test_subscribe_from_inside_callback() {
        let broadcaster = Arc::new(Broadcaster::new(true));
        let inner = Arc::clone(&broadcaster);
        broadcaster.subscribe(move |_| {
            inner.subscribe(|_| {});
        });

        assert_eq!(broadcaster.publish("grow"), 1);
        assert_eq!(broadcaster.subscriber_count(), 2);
    }

    proptest! {
        #[test]
        fn prop_each_subscriber_gets_line_exactly_once(n in 0usize..16, line in ".*") {
            let broadcaster = Broadcaster::new(true);
            let log = Arc::new(Mutex::new(Vec::new()));
            for i in 0..n {
                broadcaster.subscribe(recorder(&log, i));
            }

            prop_assert_eq!(broadcaster.publish(&line), n);
            let received = log.lock().clone();
            let expected: Vec<(usize, String)> = (0..n).map(|i| (i, line.clone())).collect();
            prop_assert_eq!(received, expected);
        }
    }
}
