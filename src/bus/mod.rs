//! In-process selection bus.
//!
//! Replaces the platform-managed message channel the original page relied
//! on: an ordered set of registered callbacks with synchronous fan-out.
//!
//! Delivery rules:
//! - Subscribers are notified in registration order.
//! - `publish` returns once every callback has run; a panicking subscriber
//!   is isolated and the rest still receive the event.
//! - A publish issued from inside a callback is queued and dispatched after
//!   the current fan-out completes (FIFO, no unbounded recursion).
//! - No buffering: a subscriber registered after a publish never sees that
//!   event.
//!
//! # Example
//!
//! ```
//! use related_records::{SelectionBus, SelectionEvent};
//! use std::sync::Arc;
//!
//! let bus = Arc::new(SelectionBus::new());
//! let sub = bus.subscribe(|event| {
//!     println!("selected {} ({})", event.record_id, event.object_api_name);
//! });
//!
//! bus.publish(SelectionEvent::new("r1", "Contact"));
//! bus.unsubscribe(sub);
//! ```

mod manager;

pub use manager::{SelectionBus, Subscription, SubscriptionId};
