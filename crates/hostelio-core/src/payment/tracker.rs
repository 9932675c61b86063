// ── Payment tracker ──
//
// Holds at most one in-flight order. Tracking a new order, or clearing the
// tracker, tears the previous poller down before returning.

use tracing::debug;

use super::PaymentStatusSource;
use super::poller::{PaymentPoller, PaymentState, PollerHandle};
use crate::model::PaymentOrder;

struct Tracked {
    order: PaymentOrder,
    handle: PollerHandle,
}

/// Workflow-scoped holder of the current [`PaymentOrder`].
pub struct PaymentTracker<S> {
    poller: PaymentPoller<S>,
    current: Option<Tracked>,
}

impl<S: PaymentStatusSource> PaymentTracker<S> {
    pub fn new(poller: PaymentPoller<S>) -> Self {
        Self {
            poller,
            current: None,
        }
    }

    /// Start watching `order`, replacing whatever was tracked before.
    pub async fn track(
        &mut self,
        order: PaymentOrder,
        on_paid: impl FnOnce() + Send + 'static,
        on_failed: impl FnOnce() + Send + 'static,
    ) {
        self.clear().await;
        debug!(order_id = %order.razorpay_order_id, "tracking payment order");
        let handle = self
            .poller
            .spawn(order.razorpay_order_id.clone(), on_paid, on_failed);
        self.current = Some(Tracked { order, handle });
    }

    /// Stop watching and forget the current order.
    pub async fn clear(&mut self) {
        if let Some(prev) = self.current.take() {
            debug!(order_id = %prev.order.razorpay_order_id, "releasing payment order");
            prev.handle.stop().await;
        }
    }

    /// The order still awaiting confirmation. Paid or timed-out orders are
    /// not handed out again.
    pub fn pending_order(&self) -> Option<&PaymentOrder> {
        self.current
            .as_ref()
            .filter(|t| !t.handle.state().is_terminal())
            .map(|t| &t.order)
    }

    pub fn state(&self) -> Option<PaymentState> {
        self.current.as_ref().map(|t| t.handle.state())
    }

    /// Wait for the tracked order to resolve.
    pub async fn wait(&self) -> Option<PaymentState> {
        match &self.current {
            Some(t) => Some(t.handle.wait().await),
            None => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::config::PollSettings;
    use crate::error::CoreError;
    use crate::model::PaymentStatus;

    /// Reports "paid" only for `order_b`.
    struct PaysSecondOrder {
        calls_a: AtomicUsize,
    }

    impl PaymentStatusSource for PaysSecondOrder {
        async fn fetch_status(&self, order_id: &str) -> Result<PaymentStatus, CoreError> {
            if order_id == "order_a" {
                self.calls_a.fetch_add(1, Ordering::SeqCst);
                return Ok(PaymentStatus::Pending);
            }
            Ok(PaymentStatus::Paid)
        }
    }

    fn order(id: &str) -> PaymentOrder {
        PaymentOrder {
            razorpay_order_id: id.into(),
            payment_url: "https://rzp.io/i/abc123".parse().unwrap(),
            amount: "2500".parse().unwrap(),
            booking_id: "bk-1".into(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn tracking_new_order_tears_down_previous() {
        let source = Arc::new(PaysSecondOrder {
            calls_a: AtomicUsize::new(0),
        });
        let poller = PaymentPoller::new(Arc::clone(&source), PollSettings::default());
        let mut tracker = PaymentTracker::new(poller);
        let fired_a = Arc::new(AtomicUsize::new(0));
        let paid_b = Arc::new(AtomicUsize::new(0));

        let (fa, fb) = (Arc::clone(&fired_a), Arc::clone(&fired_a));
        tracker
            .track(
                order("order_a"),
                move || {
                    fa.fetch_add(1, Ordering::SeqCst);
                },
                move || {
                    fb.fetch_add(1, Ordering::SeqCst);
                },
            )
            .await;
        tokio::time::sleep(Duration::from_secs(12)).await;
        let calls_a = source.calls_a.load(Ordering::SeqCst);

        let pb = Arc::clone(&paid_b);
        tracker
            .track(
                order("order_b"),
                move || {
                    pb.fetch_add(1, Ordering::SeqCst);
                },
                || {},
            )
            .await;
        assert_eq!(tracker.wait().await, Some(PaymentState::Paid));
        assert!(tracker.pending_order().is_none());

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(source.calls_a.load(Ordering::SeqCst), calls_a);
        assert_eq!(fired_a.load(Ordering::SeqCst), 0);
        assert_eq!(paid_b.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_forgets_order() {
        let source = Arc::new(PaysSecondOrder {
            calls_a: AtomicUsize::new(0),
        });
        let mut tracker = PaymentTracker::new(PaymentPoller::new(source, PollSettings::default()));
        tracker.track(order("order_a"), || {}, || {}).await;
        assert_eq!(
            tracker.pending_order().map(|o| o.razorpay_order_id.as_str()),
            Some("order_a")
        );
        tracker.clear().await;
        assert!(tracker.pending_order().is_none());
        assert_eq!(tracker.state(), None);
    }
}
