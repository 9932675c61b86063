// Wishlist endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::WishlistRecord;

impl ApiClient {
    /// The authenticated user's wishlist.
    ///
    /// `GET wishlist/get-item`
    pub async fn list_wishlist(&self) -> Result<Vec<WishlistRecord>, Error> {
        let url = self.endpoint(&["wishlist", "get-item"], false)?;
        match self.get(url).await {
            Err(Error::NotFound { .. }) => Ok(Vec::new()),
            other => other,
        }
    }

    /// Save an apartment to the wishlist.
    ///
    /// `POST wishlist/add-item/{apartment_id}`
    pub async fn add_to_wishlist(&self, apartment_id: &str) -> Result<(), Error> {
        let url = self.endpoint(&["wishlist", "add-item", apartment_id], false)?;
        debug!(apartment_id, "adding to wishlist");
        let _: serde_json::Value = self.post(url, &serde_json::json!({})).await?;
        Ok(())
    }

    /// Remove an apartment from the wishlist.
    ///
    /// `DELETE wishlist/delete-item/apartment-id/{apartment_id}`
    pub async fn remove_from_wishlist(&self, apartment_id: &str) -> Result<(), Error> {
        let url = self.endpoint(&["wishlist", "delete-item", "apartment-id", apartment_id], false)?;
        debug!(apartment_id, "removing from wishlist");
        let _: serde_json::Value = self.delete(url).await?;
        Ok(())
    }
}
