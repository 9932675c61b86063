// Admin endpoints: listing approval and user management.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ApartmentRecord, HostelApprovalRecord, UserRecord};

impl ApiClient {
    /// Listings waiting for admin approval.
    ///
    /// `GET get-pending-apartments/`
    pub async fn list_pending_apartments(&self) -> Result<Vec<ApartmentRecord>, Error> {
        let url = self.endpoint(&["get-pending-apartments"], true)?;
        self.get(url).await
    }

    /// Approve a pending listing so it shows up for seekers.
    ///
    /// `POST approve-hostel/{apartment_id}`
    ///
    /// The approval record is returned when the backend echoes one back,
    /// either bare or under `data`.
    pub async fn approve_apartment(
        &self,
        apartment_id: &str,
    ) -> Result<Option<HostelApprovalRecord>, Error> {
        let url = self.endpoint(&["approve-hostel", apartment_id], false)?;
        debug!(apartment_id, "approving listing");
        let body: serde_json::Value = self.post(url, &serde_json::json!({})).await?;
        let record = body.get("data").unwrap_or(&body);
        Ok(serde_json::from_value(record.clone()).ok())
    }

    /// Every registered user.
    ///
    /// `GET get-users/`
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, Error> {
        let url = self.endpoint(&["get-users"], true)?;
        self.get(url).await
    }
}
