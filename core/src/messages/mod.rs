//! Throttled outgoing chat messages
//!
//! Messages are queued with a delay in ticks and delivered one at a time from
//! the head of the queue, so scripted chat output stays under the server's
//! rate limits.
//!
//! # Delivery modes
//!
//! ```text
//! SharedCounter (default)
//!   one counter for the whole queue, +1 per tick, reset to 0 on delivery
//!   head fires when counter % head.delay == 0
//!
//! PerEntry
//!   every entry counts down its own delay from the moment it is queued
//!   head fires once its countdown reaches 0
//! ```
//!
//! In both modes only the head is ever delivered and at most one message
//! leaves the queue per tick.

mod entry;
mod queue;

#[cfg(test)]
mod queue_tests;

pub use entry::{DEFAULT_DELAY_TICKS, QueueEntry};
pub use queue::{ChatSender, DeliveryMode, DeliveryOutcome, MessageQueue, MessageQueueHandle};
