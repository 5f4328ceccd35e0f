use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::events::{ClientEvent, EventHandler};

use super::{DEFAULT_DELAY_TICKS, QueueEntry};

/// Sends a chat message on behalf of the local player.
///
/// Returns `false` when no live player session can take the message.
pub trait ChatSender {
    fn try_send(&self, message: &str) -> bool;
}

impl<F> ChatSender for F
where
    F: Fn(&str) -> bool,
{
    fn try_send(&self, message: &str) -> bool {
        self(message)
    }
}

/// How the queue decides that its head is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    /// One counter for the whole queue, reset on every delivery. The head is
    /// due when the counter is a multiple of its delay.
    #[default]
    SharedCounter,
    /// Every entry counts down its own delay from the moment it is queued.
    PerEntry,
}

/// What happened to the entry that left the queue on a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Accepted by the chat sender
    Sent(String),
    /// Chat was unavailable; the message is gone
    Dropped(String),
    /// The entry had no message and was discarded
    Empty,
}

type SharedEntries = Arc<Mutex<VecDeque<QueueEntry>>>;

/// Cloneable handle that appends to a [`MessageQueue`] from any thread.
#[derive(Clone)]
pub struct MessageQueueHandle {
    entries: SharedEntries,
}

impl MessageQueueHandle {
    pub fn enqueue(&self, message: impl Into<String>, delay_ticks: u32) {
        lock_entries(&self.entries).push_back(QueueEntry::new(message, delay_ticks));
    }

    pub fn enqueue_default(&self, message: impl Into<String>) {
        self.enqueue(message, DEFAULT_DELAY_TICKS);
    }

    pub fn len(&self) -> usize {
        lock_entries(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        lock_entries(&self.entries).is_empty()
    }
}

impl fmt::Debug for MessageQueueHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageQueueHandle")
            .field("pending", &self.len())
            .finish()
    }
}

/// Tick-driven FIFO of outgoing chat messages.
pub struct MessageQueue {
    entries: SharedEntries,
    tick_counter: u64,
    mode: DeliveryMode,
    sender: Box<dyn ChatSender + Send>,
}

impl MessageQueue {
    pub fn new(sender: impl ChatSender + Send + 'static) -> Self {
        Self::with_mode(sender, DeliveryMode::default())
    }

    pub fn with_mode(sender: impl ChatSender + Send + 'static, mode: DeliveryMode) -> Self {
        Self {
            entries: SharedEntries::default(),
            tick_counter: 0,
            mode,
            sender: Box::new(sender),
        }
    }

    /// Handle for queueing from other threads
    pub fn handle(&self) -> MessageQueueHandle {
        MessageQueueHandle {
            entries: Arc::clone(&self.entries),
        }
    }

    pub fn enqueue(&self, message: impl Into<String>, delay_ticks: u32) {
        lock_entries(&self.entries).push_back(QueueEntry::new(message, delay_ticks));
    }

    pub fn enqueue_default(&self, message: impl Into<String>) {
        self.enqueue(message, DEFAULT_DELAY_TICKS);
    }

    pub fn mode(&self) -> DeliveryMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DeliveryMode) {
        self.mode = mode;
    }

    /// Ticks since the last delivery (or since creation)
    pub fn tick_counter(&self) -> u64 {
        self.tick_counter
    }

    pub fn len(&self) -> usize {
        lock_entries(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        lock_entries(&self.entries).is_empty()
    }

    /// Snapshot of the pending entries, head first
    pub fn pending(&self) -> Vec<QueueEntry> {
        lock_entries(&self.entries).iter().cloned().collect()
    }

    /// Discard every pending entry, returning how many were removed.
    pub fn clear(&self) -> usize {
        let mut entries = lock_entries(&self.entries);
        let count = entries.len();
        entries.clear();
        count
    }

    /// Advance one tick and deliver the head if it is due.
    pub fn on_tick(&mut self) -> Option<DeliveryOutcome> {
        self.tick_counter += 1;

        let due = {
            let mut entries = lock_entries(&self.entries);
            let is_due = match self.mode {
                DeliveryMode::SharedCounter => entries
                    .front()
                    .is_some_and(|head| self.tick_counter % u64::from(head.delay_ticks()) == 0),
                DeliveryMode::PerEntry => {
                    entries.iter_mut().for_each(QueueEntry::count_down);
                    entries.front().is_some_and(|head| head.ticks_remaining() == 0)
                }
            };
            if is_due { entries.pop_front() } else { None }
        };

        let entry = due?;
        self.tick_counter = 0;
        Some(self.deliver(entry))
    }

    fn deliver(&self, entry: QueueEntry) -> DeliveryOutcome {
        if entry.is_empty() {
            tracing::debug!("Discarding empty queued message");
            return DeliveryOutcome::Empty;
        }

        let message = entry.into_message();
        if self.sender.try_send(&message) {
            tracing::debug!(%message, "Delivered queued message");
            DeliveryOutcome::Sent(message)
        } else {
            tracing::debug!(%message, "Chat unavailable, dropping queued message");
            DeliveryOutcome::Dropped(message)
        }
    }
}

impl fmt::Debug for MessageQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageQueue")
            .field("pending", &self.len())
            .field("tick_counter", &self.tick_counter)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl EventHandler for MessageQueue {
    fn handle_event(&mut self, event: &ClientEvent) {
        if matches!(event, ClientEvent::Tick) {
            self.on_tick();
        }
    }
}

/// Lock the pending entries. Poisoning is recovered: the deque stays valid
/// even if a producer panicked mid-push.
fn lock_entries(entries: &Mutex<VecDeque<QueueEntry>>) -> MutexGuard<'_, VecDeque<QueueEntry>> {
    entries.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("Message queue lock poisoned, recovering");
        poisoned.into_inner()
    })
}
