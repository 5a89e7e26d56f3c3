// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Change notification types for the Courtbook booking system.
//!
//! Write operations publish a `ChangeEvent` describing what changed, and
//! read-side consumers (caches, admin views, realtime pushes) subscribe to
//! refresh themselves. The bus is an explicit seam between the repository
//! and its observers; the scheduling core itself never depends on it.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use courtbook_domain::ReservationStatus;

/// A notification that shared booking state changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// A reservation was created.
    ReservationCreated {
        /// The new reservation's id.
        reservation_id: String,
        /// The booked court.
        court_id: i64,
        /// The booked date, ISO 8601.
        date: String,
    },
    /// A reservation's status changed.
    ReservationStatusChanged {
        /// The reservation's id.
        reservation_id: String,
        /// The status before the change.
        from: ReservationStatus,
        /// The status after the change.
        to: ReservationStatus,
    },
    /// A reservation's fields were updated.
    ReservationUpdated {
        /// The reservation's id.
        reservation_id: String,
    },
    /// A court was created, updated, or deleted.
    CourtsChanged,
    /// The facility configuration was updated.
    ConfigurationChanged,
}

/// A subscriber callback. Must be `Send` so the bus can live behind the
/// server's shared state.
pub type Subscriber = Box<dyn Fn(&ChangeEvent) + Send>;

/// Fan-out bus for change events.
///
/// Subscribers are invoked synchronously and in subscription order on the
/// publishing thread. A subscriber must not publish from its callback.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
}

impl EventBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber for all subsequent events.
    pub fn subscribe(&mut self, subscriber: Subscriber) {
        self.subscribers.push(subscriber);
    }

    /// Publishes an event to every subscriber.
    pub fn publish(&self, event: &ChangeEvent) {
        for subscriber in &self.subscribers {
            subscriber(event);
        }
    }

    /// The number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn create_test_event() -> ChangeEvent {
        ChangeEvent::ReservationCreated {
            reservation_id: String::from("res-1"),
            court_id: 1,
            date: String::from("2024-06-10"),
        }
    }

    #[test]
    fn test_publish_reaches_every_subscriber() {
        let calls: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
        let mut bus: EventBus = EventBus::new();
        for _ in 0..3 {
            let counter: Arc<AtomicUsize> = Arc::clone(&calls);
            bus.subscribe(Box::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }));
        }

        bus.publish(&create_test_event());

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(bus.subscriber_count(), 3);
    }

    #[test]
    fn test_publish_with_no_subscribers_is_a_no_op() {
        let bus: EventBus = EventBus::new();
        bus.publish(&create_test_event());
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_subscriber_sees_the_event_payload() {
        let seen: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
        let counter: Arc<AtomicUsize> = Arc::clone(&seen);
        let mut bus: EventBus = EventBus::new();
        bus.subscribe(Box::new(move |event| {
            if matches!(event, ChangeEvent::ReservationCreated { court_id: 1, .. }) {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        }));

        bus.publish(&create_test_event());
        bus.publish(&ChangeEvent::ConfigurationChanged);

        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
