//! Simulated counterpart replies.
//!
//! Every user text-send schedules one reply. Each scheduled reply is its own
//! tokio task that sleeps until its deadline and then hands the reply to the
//! [`ReplyReceiver`] drained by the event loop. Replies are never coalesced
//! and arrive in the order they were scheduled.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::Instant;

use super::error::ChatError;
use super::message::{Message, Sender};

/// Fixed text of every simulated reply.
pub const REPLY_TEXT: &str = "Thank you for reaching out. How can I help further?";

/// Delay between a user send and its simulated reply.
pub const REPLY_DELAY: Duration = Duration::from_millis(1000);

/// Identifies one scheduled reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReplyId(u64);

impl ReplyId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A reply whose delay has elapsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledReply {
    pub id: ReplyId,
    pub message: Message,
}

/// Schedules deferred bot replies.
///
/// The delay is fixed per simulator, so deadlines never decrease. Each reply
/// also waits for the one scheduled before it, which keeps delivery in
/// schedule order even when two deadlines are equal.
///
/// Dropping the simulator cancels every reply still in flight.
pub struct ReplySimulator {
    tx: mpsc::UnboundedSender<ScheduledReply>,
    cancel_tx: watch::Sender<bool>,
    delay: Duration,
    reply: Message,
    next_id: u64,
    pending: Arc<AtomicUsize>,
    /// Resolves once the most recently scheduled reply is sent or cancelled
    last_done: Option<oneshot::Receiver<()>>,
}

impl ReplySimulator {
    /// Create a simulator and the receiver its replies arrive on.
    pub fn new(
        delay: Duration,
        reply_text: impl Into<String>,
    ) -> Result<(Self, ReplyReceiver), ChatError> {
        let reply = Message::new(reply_text, Sender::Bot)?;
        let (tx, rx) = mpsc::unbounded_channel();
        let (cancel_tx, _) = watch::channel(false);

        let simulator = Self {
            tx,
            cancel_tx,
            delay,
            reply,
            next_id: 0,
            pending: Arc::new(AtomicUsize::new(0)),
            last_done: None,
        };
        Ok((simulator, ReplyReceiver { rx }))
    }

    /// Schedule one reply, due `delay` from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self) -> ReplyId {
        let id = ReplyId(self.next_id);
        self.next_id += 1;

        let deadline = Instant::now() + self.delay;
        let reply = ScheduledReply {
            id,
            message: self.reply.clone(),
        };
        let tx = self.tx.clone();
        let mut cancel_rx = self.cancel_tx.subscribe();
        let pending = self.pending.clone();
        let (done_tx, done_rx) = oneshot::channel();
        let previous = self.last_done.replace(done_rx);
        let in_flight = pending.fetch_add(1, Ordering::Relaxed) + 1;

        tracing::debug!(
            reply_id = id.0,
            delay_ms = self.delay.as_millis() as u64,
            in_flight,
            "Scheduled simulated reply"
        );

        tokio::spawn(async move {
            let due = async {
                tokio::time::sleep_until(deadline).await;
                if let Some(previous) = previous {
                    // Err means the previous reply was cancelled
                    let _ = previous.await;
                }
            };
            tokio::select! {
                _ = due => {
                    if tx.send(reply).is_err() {
                        tracing::debug!(reply_id = id.0, "Reply receiver gone, dropping reply");
                    }
                }
                _ = cancel_rx.changed() => {
                    tracing::debug!(reply_id = id.0, "Simulated reply cancelled");
                }
            }
            pending.fetch_sub(1, Ordering::Relaxed);
            let _ = done_tx.send(());
        });

        id
    }

    /// Cancel every reply that has not fired yet.
    pub fn cancel_pending(&self) {
        let _ = self.cancel_tx.send(true);
    }

    /// Number of replies scheduled but not yet fired or cancelled.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::Relaxed)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Receiving half for fired replies.
pub struct ReplyReceiver {
    rx: mpsc::UnboundedReceiver<ScheduledReply>,
}

impl ReplyReceiver {
    /// Wait for the next fired reply.
    ///
    /// Returns `None` once the simulator is gone and nothing is left.
    pub async fn recv(&mut self) -> Option<ScheduledReply> {
        self.rx.recv().await
    }

    /// Take a fired reply without waiting.
    pub fn try_recv(&mut self) -> Result<Option<ScheduledReply>, ReplyError> {
        match self.rx.try_recv() {
            Ok(reply) => Ok(Some(reply)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => Err(ReplyError::Closed),
        }
    }
}

/// Reply channel errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReplyError {
    #[error("Reply channel closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulator() -> (ReplySimulator, ReplyReceiver) {
        ReplySimulator::new(REPLY_DELAY, REPLY_TEXT).unwrap()
    }

    #[test]
    fn test_rejects_empty_reply_text() {
        assert!(matches!(
            ReplySimulator::new(REPLY_DELAY, ""),
            Err(ChatError::EmptyText)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_fires_after_delay() {
        let (mut sim, mut rx) = simulator();
        let id = sim.schedule();
        assert_eq!(sim.pending(), 1);

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(rx.try_recv(), Ok(None));

        tokio::time::sleep(Duration::from_millis(2)).await;
        let reply = rx.try_recv().unwrap().expect("reply should have fired");
        assert_eq!(reply.id, id);
        assert_eq!(reply.message.text(), REPLY_TEXT);
        assert_eq!(reply.message.sender(), Sender::Bot);
        assert_eq!(sim.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_replies_are_not_coalesced() {
        let (mut sim, mut rx) = simulator();
        let first = sim.schedule();
        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = sim.schedule();
        assert_eq!(sim.pending(), 2);

        tokio::time::sleep(Duration::from_millis(901)).await;
        assert_eq!(rx.try_recv().unwrap().map(|r| r.id), Some(first));
        assert_eq!(rx.try_recv(), Ok(None));

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(rx.try_recv().unwrap().map(|r| r.id), Some(second));
        assert_eq!(sim.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_equal_deadlines_arrive_in_schedule_order() {
        let (mut sim, mut rx) = simulator();
        let ids: Vec<ReplyId> = (0..5).map(|_| sim.schedule()).collect();

        tokio::time::sleep(Duration::from_millis(1001)).await;
        let mut delivered = Vec::new();
        while let Some(reply) = rx.try_recv().unwrap() {
            delivered.push(reply.id);
        }
        assert_eq!(delivered, ids);
        assert_eq!(sim.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_pending() {
        let (mut sim, mut rx) = simulator();
        sim.schedule();
        sim.schedule();
        tokio::task::yield_now().await;

        sim.cancel_pending();
        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(rx.try_recv(), Ok(None));
        assert_eq!(sim.pending(), 0);

        // Replies scheduled after a cancel still fire.
        sim.schedule();
        tokio::time::sleep(Duration::from_millis(1001)).await;
        assert!(rx.try_recv().unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_and_closes() {
        let (mut sim, mut rx) = simulator();
        sim.schedule();
        tokio::task::yield_now().await;
        drop(sim);

        assert_eq!(rx.recv().await, None);
        assert_eq!(rx.try_recv(), Err(ReplyError::Closed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ids_increase() {
        let (mut sim, _rx) = simulator();
        let a = sim.schedule();
        let b = sim.schedule();
        assert!(a < b);
        assert_eq!(b.get(), a.get() + 1);
    }
}
