// Payment endpoints
//
// The backend creates a gateway order plus a hosted payment link in one
// call. Completion is observed by polling the order status.

use tracing::{debug, trace};

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{PaymentLinkRequest, PaymentLinkResponse, PaymentStatusResponse, UserPayments};

impl ApiClient {
    /// Create a gateway order and hosted payment link for a booking.
    ///
    /// `POST payment/url/` with `{user_id, apartment_id, amount, booking_id}`
    pub async fn create_payment_link(
        &self,
        request: &PaymentLinkRequest,
    ) -> Result<PaymentLinkResponse, Error> {
        let url = self.endpoint(&["payment", "url"], true)?;
        debug!(booking_id = %request.booking_id, amount = %request.amount, "requesting payment link");
        self.post(url, request).await
    }

    /// Current status of a gateway order (`"paid"`, `"pending"`, ...).
    ///
    /// `GET payment/status/{order_id}`
    pub async fn payment_status(&self, order_id: &str) -> Result<PaymentStatusResponse, Error> {
        let url = self.endpoint(&["payment", "status", order_id], false)?;
        trace!(order_id, "checking payment status");
        self.get(url).await
    }

    /// Payments made by a user, each with booking, apartment, and guest expanded.
    ///
    /// `GET payments/user/{user_id}`
    pub async fn list_user_payments(&self, user_id: &str) -> Result<UserPayments, Error> {
        let url = self.endpoint(&["payments", "user", user_id], false)?;
        self.get(url).await
    }
}
