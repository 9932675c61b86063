// Booking endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{BookingRecord, CreateBookingRequest, CreateBookingResponse};

impl ApiClient {
    /// Create a booking for a seeker.
    ///
    /// `POST booking/create/` with `{user, apartment[, checkout_date]}`
    pub async fn create_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> Result<CreateBookingResponse, Error> {
        let url = self.endpoint(&["booking", "create"], true)?;
        debug!(user = %request.user, apartment = %request.apartment, "creating booking");
        self.post(url, request).await
    }

    /// Bookings made by one user.
    ///
    /// `GET bookings/user/{user_id}/`
    pub async fn list_user_bookings(&self, user_id: &str) -> Result<Vec<BookingRecord>, Error> {
        let url = self.endpoint(&["bookings", "user", user_id], true)?;
        self.get(url).await
    }

    /// Bookings against one apartment (owner view).
    ///
    /// `GET bookings/apartment/{apartment_id}/`
    pub async fn list_apartment_bookings(
        &self,
        apartment_id: &str,
    ) -> Result<Vec<BookingRecord>, Error> {
        let url = self.endpoint(&["bookings", "apartment", apartment_id], true)?;
        self.get(url).await
    }
}
