//! Tests for the message queue
//!
//! Verifies head-only delivery, the shared counter timing and the per-entry
//! countdown mode.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use proptest::prelude::*;

use super::{DeliveryMode, DeliveryOutcome, MessageQueue, QueueEntry};
use crate::events::{ClientEvent, EventHandler};

#[derive(Clone, Default)]
struct RecordingChat {
    sent: Arc<Mutex<Vec<String>>>,
    offline: Arc<AtomicBool>,
}

impl RecordingChat {
    fn sender(&self) -> impl Fn(&str) -> bool + Send + 'static {
        let sent = self.sent.clone();
        let offline = self.offline.clone();
        move |message: &str| {
            if offline.load(Ordering::SeqCst) {
                return false;
            }
            sent.lock().unwrap().push(message.to_string());
            true
        }
    }

    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

fn make_queue(mode: DeliveryMode) -> (RecordingChat, MessageQueue) {
    let chat = RecordingChat::default();
    let queue = MessageQueue::with_mode(chat.sender(), mode);
    (chat, queue)
}

/// Tick until something leaves the queue, returning the tick count and outcome.
fn ticks_until_delivery(queue: &mut MessageQueue, limit: u32) -> Option<(u32, DeliveryOutcome)> {
    (1..=limit).find_map(|tick| queue.on_tick().map(|outcome| (tick, outcome)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared counter
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn head_waits_for_counter_to_reach_delay() {
    let (chat, mut queue) = make_queue(DeliveryMode::SharedCounter);

    // A: delay 5. Three ticks pass before B is queued.
    queue.enqueue("A", 5);
    for _ in 0..3 {
        assert_eq!(queue.on_tick(), None);
    }
    queue.enqueue("B", 10);
    assert_eq!(queue.tick_counter(), 3);

    assert_eq!(queue.on_tick(), None);
    assert_eq!(queue.on_tick(), Some(DeliveryOutcome::Sent("A".to_string())));
    assert_eq!(queue.tick_counter(), 0);

    // B's wait starts from A's delivery, not from B's enqueue.
    for _ in 0..9 {
        assert_eq!(queue.on_tick(), None);
    }
    assert_eq!(queue.on_tick(), Some(DeliveryOutcome::Sent("B".to_string())));
    assert_eq!(chat.sent(), vec!["A", "B"]);
    assert!(queue.is_empty());
}

#[test]
fn idle_ticks_shorten_first_wait() {
    let (_chat, mut queue) = make_queue(DeliveryMode::SharedCounter);

    for _ in 0..7 {
        queue.on_tick();
    }
    assert_eq!(queue.tick_counter(), 7);

    queue.enqueue("late", 5);
    // Counter goes 8, 9, 10: due on the third tick.
    let (tick, outcome) = ticks_until_delivery(&mut queue, 20).unwrap();
    assert_eq!(tick, 3);
    assert_eq!(outcome, DeliveryOutcome::Sent("late".to_string()));
}

#[test]
fn later_entry_with_shorter_delay_never_overtakes() {
    let (chat, mut queue) = make_queue(DeliveryMode::SharedCounter);
    queue.enqueue("slow", 6);
    queue.enqueue("fast", 1);

    let (tick, _) = ticks_until_delivery(&mut queue, 20).unwrap();
    assert_eq!(tick, 6);
    let (tick, _) = ticks_until_delivery(&mut queue, 20).unwrap();
    assert_eq!(tick, 1);
    assert_eq!(chat.sent(), vec!["slow", "fast"]);
}

#[test]
fn default_delay_is_twenty_ticks() {
    let (_chat, mut queue) = make_queue(DeliveryMode::SharedCounter);
    queue.enqueue_default("hello");
    assert_eq!(queue.pending()[0].delay_ticks(), 20);

    let (tick, _) = ticks_until_delivery(&mut queue, 100).unwrap();
    assert_eq!(tick, 20);
}

// ─────────────────────────────────────────────────────────────────────────────
// Failure handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn unavailable_chat_drops_without_retry() {
    let (chat, mut queue) = make_queue(DeliveryMode::SharedCounter);
    chat.offline.store(true, Ordering::SeqCst);

    queue.enqueue("lost", 2);
    queue.enqueue("kept", 2);

    let (_, outcome) = ticks_until_delivery(&mut queue, 10).unwrap();
    assert_eq!(outcome, DeliveryOutcome::Dropped("lost".to_string()));
    assert_eq!(queue.len(), 1);

    chat.offline.store(false, Ordering::SeqCst);
    let (_, outcome) = ticks_until_delivery(&mut queue, 10).unwrap();
    assert_eq!(outcome, DeliveryOutcome::Sent("kept".to_string()));
    assert_eq!(chat.sent(), vec!["kept"]);
}

#[test]
fn empty_message_is_removed_without_sending() {
    let (chat, mut queue) = make_queue(DeliveryMode::SharedCounter);
    queue.enqueue("", 2);
    queue.enqueue("after", 2);

    let (tick, outcome) = ticks_until_delivery(&mut queue, 10).unwrap();
    assert_eq!((tick, outcome), (2, DeliveryOutcome::Empty));
    assert_eq!(queue.tick_counter(), 0);

    let (tick, outcome) = ticks_until_delivery(&mut queue, 10).unwrap();
    assert_eq!((tick, outcome), (2, DeliveryOutcome::Sent("after".to_string())));
    assert_eq!(chat.sent(), vec!["after"]);
}

#[test]
fn zero_delay_is_raised_to_one_tick() {
    let entry = QueueEntry::new("now", 0);
    assert_eq!(entry.delay_ticks(), 1);

    let (_chat, mut queue) = make_queue(DeliveryMode::SharedCounter);
    queue.enqueue("now", 0);
    assert_eq!(queue.on_tick(), Some(DeliveryOutcome::Sent("now".to_string())));
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-entry countdown
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn per_entry_wait_starts_at_enqueue() {
    let (_chat, mut queue) = make_queue(DeliveryMode::PerEntry);

    for _ in 0..7 {
        queue.on_tick();
    }
    queue.enqueue("late", 5);

    let (tick, _) = ticks_until_delivery(&mut queue, 20).unwrap();
    assert_eq!(tick, 5);
}

#[test]
fn per_entry_elapsed_follower_fires_right_after_head() {
    let (chat, mut queue) = make_queue(DeliveryMode::PerEntry);
    queue.enqueue("A", 10);
    queue.enqueue("B", 1);

    let (tick, _) = ticks_until_delivery(&mut queue, 20).unwrap();
    assert_eq!(tick, 10);
    assert_eq!(queue.pending()[0].ticks_remaining(), 0);

    // At most one delivery per tick, so B goes out on the next one.
    let (tick, _) = ticks_until_delivery(&mut queue, 20).unwrap();
    assert_eq!(tick, 1);
    assert_eq!(chat.sent(), vec!["A", "B"]);
}

#[test]
fn per_entry_mode_repeats_quirk_scenario_from_enqueue_time() {
    let (_chat, mut queue) = make_queue(DeliveryMode::PerEntry);
    queue.enqueue("A", 5);
    for _ in 0..3 {
        queue.on_tick();
    }
    queue.enqueue("B", 10);

    let (tick, _) = ticks_until_delivery(&mut queue, 20).unwrap();
    assert_eq!(tick, 2);
    // B was queued 2 ticks ago; 8 remain.
    let (tick, _) = ticks_until_delivery(&mut queue, 20).unwrap();
    assert_eq!(tick, 8);
}

// ─────────────────────────────────────────────────────────────────────────────
// Handles and events
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn handle_enqueues_from_other_thread() {
    let (chat, mut queue) = make_queue(DeliveryMode::SharedCounter);
    let handle = queue.handle();

    std::thread::spawn(move || {
        handle.enqueue("from worker", 1);
    })
    .join()
    .unwrap();

    assert_eq!(queue.len(), 1);
    queue.handle_event(&ClientEvent::Tick);
    assert_eq!(chat.sent(), vec!["from worker"]);
}

#[test]
fn non_tick_events_do_not_advance() {
    let (_chat, mut queue) = make_queue(DeliveryMode::SharedCounter);
    queue.handle_event(&ClientEvent::RenderHud { partial_ticks: 0.5 });
    assert_eq!(queue.tick_counter(), 0);
}

#[test]
fn clear_discards_pending() {
    let (_chat, queue) = make_queue(DeliveryMode::SharedCounter);
    queue.enqueue("a", 1);
    queue.enqueue("b", 1);
    assert_eq!(queue.clear(), 2);
    assert!(queue.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// FIFO property
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Enqueue(u32),
    Tick,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![(1u32..6).prop_map(Op::Enqueue), Just(Op::Tick), Just(Op::Tick)]
}

proptest! {
    #[test]
    fn shared_counter_delivers_head_and_resets(ops in prop::collection::vec(op_strategy(), 0..120)) {
        let (_chat, mut queue) = make_queue(DeliveryMode::SharedCounter);
        let mut model: VecDeque<(String, u32)> = VecDeque::new();
        let mut next_id = 0;

        for op in ops {
            match op {
                Op::Enqueue(delay) => {
                    let message = format!("m{}", next_id);
                    next_id += 1;
                    queue.enqueue(message.clone(), delay);
                    model.push_back((message, delay));
                }
                Op::Tick => {
                    let before = queue.tick_counter();
                    let head = model.front().cloned();
                    match queue.on_tick() {
                        Some(DeliveryOutcome::Sent(message)) => {
                            let (expected, delay) = head.expect("delivery from empty queue");
                            prop_assert_eq!(message, expected);
                            prop_assert_eq!((before + 1) % u64::from(delay), 0);
                            prop_assert_eq!(queue.tick_counter(), 0);
                            model.pop_front();
                        }
                        Some(other) => prop_assert!(false, "unexpected outcome {:?}", other),
                        None => {
                            prop_assert_eq!(queue.tick_counter(), before + 1);
                            if let Some((_, delay)) = head {
                                prop_assert_ne!((before + 1) % u64::from(delay), 0);
                            }
                        }
                    }
                }
            }
            prop_assert_eq!(queue.len(), model.len());
        }
    }
}
