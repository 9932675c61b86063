// ── Checkout workflow ──
//
// Booking creation followed by payment-link creation. Watching the
// resulting order is left to the payment poller so callers can choose
// between blocking and callback-driven confirmation.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use url::Url;

use hostelio_api::ApiClient;
use hostelio_api::models::{CreateBookingRequest, PaymentLinkRequest};

use crate::error::CoreError;
use crate::model::{EntityId, PaymentOrder};
use crate::pricing::{DateSelection, Quote};

/// Everything needed to book one apartment.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub user_id: EntityId,
    pub apartment_id: EntityId,
    /// Nightly rent of the apartment.
    pub rent: Decimal,
    pub selection: DateSelection,
}

/// A created booking with its gateway order.
#[derive(Debug, Clone, Serialize)]
pub struct Checkout {
    pub booking_id: EntityId,
    pub quote: Quote,
    pub order: PaymentOrder,
}

impl CheckoutRequest {
    /// Price the selection, rejecting empty ones.
    pub fn quote(&self) -> Result<Quote, CoreError> {
        let quote = self.selection.quote(self.rent);
        if quote.nights == 0 {
            return Err(CoreError::validation(
                "choose a check-in and a check-out date (check-out on or after check-in)",
            ));
        }
        if self.rent <= Decimal::ZERO {
            return Err(CoreError::validation("apartment has no rent configured"));
        }
        Ok(quote)
    }
}

/// Create the booking, then a payment link for its total.
pub async fn start_checkout(
    client: &ApiClient,
    request: &CheckoutRequest,
) -> Result<Checkout, CoreError> {
    let quote = request.quote()?;

    let created = client
        .create_booking(&CreateBookingRequest {
            user: request.user_id.to_string(),
            apartment: request.apartment_id.to_string(),
            checkout_date: quote.end,
        })
        .await?;
    let booking_id = EntityId::from(created.booking_id);
    info!(%booking_id, nights = quote.nights, amount = %quote.amount, "booking created");

    let link = client
        .create_payment_link(&PaymentLinkRequest {
            user_id: request.user_id.to_string(),
            apartment_id: request.apartment_id.to_string(),
            amount: quote.amount,
            booking_id: booking_id.to_string(),
        })
        .await?;
    let payment_url = Url::parse(&link.payment_url).map_err(|e| CoreError::Api {
        message: format!("backend returned an invalid payment URL: {e}"),
        status: None,
    })?;
    info!(order_id = %link.razorpay_order_id, "payment link created");

    Ok(Checkout {
        order: PaymentOrder {
            razorpay_order_id: link.razorpay_order_id,
            payment_url,
            amount: quote.amount,
            booking_id: booking_id.clone(),
        },
        booking_id,
        quote,
    })
}
