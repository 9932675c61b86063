// Owner dashboard endpoints
//
// These are scoped by the bearer token rather than a path id: the backend
// answers for whichever owner is signed in.

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ApartmentRecord, BookingRecord, UserRecord};

impl ApiClient {
    /// Bookings made against any of the signed-in owner's listings.
    ///
    /// `GET get-all-received-booking`
    pub async fn list_received_bookings(&self) -> Result<Vec<BookingRecord>, Error> {
        let url = self.endpoint(&["get-all-received-booking"], false)?;
        self.get(url).await
    }

    /// Listings still waiting for admin approval, as seen by owners.
    ///
    /// `GET pending_apartments_for_owner/`. The backend may include other
    /// owners' listings; filtering by owner is left to the caller.
    pub async fn list_owner_pending_apartments(&self) -> Result<Vec<ApartmentRecord>, Error> {
        let url = self.endpoint(&["pending_apartments_for_owner"], true)?;
        self.get(url).await
    }

    /// Accounts that have booked with the signed-in owner.
    ///
    /// `GET get-all-tenants/`
    pub async fn list_tenants(&self) -> Result<Vec<UserRecord>, Error> {
        let url = self.endpoint(&["get-all-tenants"], true)?;
        self.get(url).await
    }
}
