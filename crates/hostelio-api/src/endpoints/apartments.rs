// Apartment listing endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ApartmentRecord, OwnerApartments};

impl ApiClient {
    /// Every listing, approved or not.
    ///
    /// `GET apartments`
    pub async fn list_apartments(&self) -> Result<Vec<ApartmentRecord>, Error> {
        let url = self.endpoint(&["apartments"], false)?;
        self.get(url).await
    }

    /// Listings an admin has approved; this is what seekers browse.
    ///
    /// `GET apartments/approved/`
    pub async fn list_approved_apartments(&self) -> Result<Vec<ApartmentRecord>, Error> {
        let url = self.endpoint(&["apartments", "approved"], true)?;
        self.get(url).await
    }

    /// A single listing.
    ///
    /// `GET apartments/{id}/`
    pub async fn get_apartment(&self, apartment_id: &str) -> Result<ApartmentRecord, Error> {
        let url = self.endpoint(&["apartments", apartment_id], true)?;
        debug!(apartment_id, "fetching apartment");
        self.get(url).await
    }

    /// Listings owned by one owner.
    ///
    /// `GET apartment/by-owner/{owner_id}/`
    pub async fn list_owner_apartments(&self, owner_id: &str) -> Result<Vec<ApartmentRecord>, Error> {
        let url = self.endpoint(&["apartment", "by-owner", owner_id], true)?;
        let resp: OwnerApartments = self.get(url).await?;
        Ok(resp.apartments)
    }
}
