// ── Payment status poller ──
//
// One spawned task per watched order. The task checks the order status
// immediately and then on a fixed cadence until the order is paid, the
// ceiling elapses, or the handle is torn down. Exactly one of the paid and
// failed callbacks runs, and none runs once teardown has returned.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::PaymentStatusSource;
use crate::config::PollSettings;
use crate::error::CoreError;
use crate::model::PaymentStatus;

/// Observable state of a watched order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentState {
    Pending,
    Paid,
    /// Not confirmed before the ceiling.
    Failed,
    /// Torn down before either outcome.
    Cancelled,
}

impl PaymentState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

enum Outcome {
    Paid,
    TimedOut,
    Cancelled,
}

struct Callbacks {
    on_paid: Box<dyn FnOnce() + Send>,
    on_failed: Box<dyn FnOnce() + Send>,
}

/// Callbacks are taken out under this lock, so teardown (which empties it)
/// cannot return while a callback is still running.
type CallbackSlot = Arc<Mutex<Option<Callbacks>>>;

// ── PaymentPoller ────────────────────────────────────────────────────

/// Spawns status pollers against a [`PaymentStatusSource`].
pub struct PaymentPoller<S> {
    source: Arc<S>,
    settings: PollSettings,
}

impl<S> Clone for PaymentPoller<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            settings: self.settings,
        }
    }
}

impl<S: PaymentStatusSource> PaymentPoller<S> {
    pub fn new(source: Arc<S>, settings: PollSettings) -> Self {
        Self { source, settings }
    }

    pub fn settings(&self) -> PollSettings {
        self.settings
    }

    /// Start watching `order_id` on the current tokio runtime.
    ///
    /// Callbacks run on the poller task while teardown is locked out, so a
    /// callback must not stop or drop its own [`PollerHandle`] (or clear
    /// the [`PaymentTracker`](super::PaymentTracker) holding it). Doing so
    /// deadlocks. Signal another task instead.
    pub fn spawn(
        &self,
        order_id: impl Into<String>,
        on_paid: impl FnOnce() + Send + 'static,
        on_failed: impl FnOnce() + Send + 'static,
    ) -> PollerHandle {
        let order_id = order_id.into();
        let cancel = CancellationToken::new();
        let slot: CallbackSlot = Arc::new(Mutex::new(Some(Callbacks {
            on_paid: Box::new(on_paid),
            on_failed: Box::new(on_failed),
        })));
        let (state_tx, state_rx) = watch::channel(PaymentState::Pending);

        let source = Arc::clone(&self.source);
        let settings = self.settings;
        let task_cancel = cancel.clone();
        let task_slot = Arc::clone(&slot);
        let task = tokio::spawn(async move {
            let outcome = poll_order(source.as_ref(), &order_id, settings, &task_cancel).await;
            deliver(&task_slot, &state_tx, outcome);
        });

        PollerHandle {
            cancel,
            slot,
            state: state_rx,
            task: Some(task),
        }
    }
}

enum Step {
    Cancelled,
    Deadline,
    Fetched(Result<PaymentStatus, CoreError>),
}

async fn poll_order<S: PaymentStatusSource>(
    source: &S,
    order_id: &str,
    settings: PollSettings,
    cancel: &CancellationToken,
) -> Outcome {
    let started = Instant::now();
    let deadline = tokio::time::sleep_until(started + settings.timeout);
    tokio::pin!(deadline);

    let mut interval = tokio::time::interval(settings.interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(order_id, "watching payment");
    loop {
        // Ticks and in-flight requests both lose to the deadline.
        let step = tokio::select! {
            biased;
            () = cancel.cancelled() => Step::Cancelled,
            () = &mut deadline => Step::Deadline,
            _ = interval.tick() => {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => Step::Cancelled,
                    () = &mut deadline => Step::Deadline,
                    result = source.fetch_status(order_id) => Step::Fetched(result),
                }
            }
        };

        match step {
            Step::Cancelled => {
                debug!(order_id, "payment watch cancelled");
                return Outcome::Cancelled;
            }
            Step::Deadline => {
                info!(order_id, elapsed = ?started.elapsed(), "payment not confirmed in time");
                return Outcome::TimedOut;
            }
            Step::Fetched(Ok(PaymentStatus::Paid)) => {
                info!(order_id, elapsed = ?started.elapsed(), "payment confirmed");
                return Outcome::Paid;
            }
            Step::Fetched(Ok(status)) => debug!(order_id, %status, "payment not yet confirmed"),
            Step::Fetched(Err(e)) => warn!(order_id, error = %e, "payment status check failed"),
        }
    }
}

fn deliver(slot: &CallbackSlot, state: &watch::Sender<PaymentState>, outcome: Outcome) {
    let mut guard = slot.lock().expect("callback lock poisoned");
    let Some(callbacks) = guard.take() else {
        state.send_replace(PaymentState::Cancelled);
        return;
    };
    match outcome {
        Outcome::Paid => {
            state.send_replace(PaymentState::Paid);
            (callbacks.on_paid)();
        }
        Outcome::TimedOut => {
            state.send_replace(PaymentState::Failed);
            (callbacks.on_failed)();
        }
        Outcome::Cancelled => {
            state.send_replace(PaymentState::Cancelled);
        }
    }
}

// ── PollerHandle ─────────────────────────────────────────────────────

/// Owner of one running poller. Dropping it tears the poller down.
pub struct PollerHandle {
    cancel: CancellationToken,
    slot: CallbackSlot,
    state: watch::Receiver<PaymentState>,
    task: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for PollerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollerHandle")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl PollerHandle {
    pub fn state(&self) -> PaymentState {
        *self.state.borrow()
    }

    /// Wait until the poller reaches a terminal state.
    pub async fn wait(&self) -> PaymentState {
        let mut rx = self.state.clone();
        let waited = rx.wait_for(|s| s.is_terminal()).await.map(|s| *s);
        waited.unwrap_or_else(|_| *rx.borrow())
    }

    /// Stop polling and wait for the task to exit.
    pub async fn stop(mut self) {
        self.teardown();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    fn teardown(&self) {
        self.cancel.cancel();
        self.slot.lock().expect("callback lock poisoned").take();
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}
