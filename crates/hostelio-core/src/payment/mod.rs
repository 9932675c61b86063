// ── Payment confirmation ──
//
// After a seeker opens the hosted payment page, completion is observed by
// polling the gateway order status until it reads "paid" or the poller
// gives up.

pub mod poller;
pub mod tracker;

use std::future::Future;
use std::sync::Arc;

use hostelio_api::ApiClient;

use crate::error::CoreError;
use crate::model::PaymentStatus;

pub use poller::{PaymentPoller, PaymentState, PollerHandle};
pub use tracker::PaymentTracker;

/// Anything that can report the status of a gateway order.
pub trait PaymentStatusSource: Send + Sync + 'static {
    fn fetch_status(
        &self,
        order_id: &str,
    ) -> impl Future<Output = Result<PaymentStatus, CoreError>> + Send;
}

impl PaymentStatusSource for ApiClient {
    async fn fetch_status(&self, order_id: &str) -> Result<PaymentStatus, CoreError> {
        let resp = self.payment_status(order_id).await?;
        Ok(PaymentStatus::from(resp.status.as_str()))
    }
}

impl<S: PaymentStatusSource> PaymentStatusSource for Arc<S> {
    fn fetch_status(
        &self,
        order_id: &str,
    ) -> impl Future<Output = Result<PaymentStatus, CoreError>> + Send {
        S::fetch_status(self, order_id)
    }
}
