/// Delay used when a message is queued without one (one second at 20 TPS).
pub const DEFAULT_DELAY_TICKS: u32 = 20;

/// A pending outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    message: String,
    delay_ticks: u32,
    ticks_remaining: u32,
}

impl QueueEntry {
    /// A zero delay is raised to one tick.
    pub fn new(message: impl Into<String>, delay_ticks: u32) -> Self {
        let message = message.into();
        if delay_ticks == 0 {
            tracing::warn!(%message, "Queued message with zero delay, using one tick");
        }
        let delay_ticks = delay_ticks.max(1);
        Self {
            message,
            delay_ticks,
            ticks_remaining: delay_ticks,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn delay_ticks(&self) -> u32 {
        self.delay_ticks
    }

    /// Ticks left before this entry is due (per-entry delivery only).
    pub fn ticks_remaining(&self) -> u32 {
        self.ticks_remaining
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_empty()
    }

    pub(crate) fn count_down(&mut self) {
        self.ticks_remaining = self.ticks_remaining.saturating_sub(1);
    }

    pub(crate) fn into_message(self) -> String {
        self.message
    }
}
