use async_trait::async_trait;
use reqwest::StatusCode;

use crate::domain::listing::{Listing, NewListing};
use crate::domain::types::ListingId;
use crate::models::listing::{Listing as RowListing, NewListing as RowNewListing};
use crate::repository::{
    ListingListQuery, ListingReader, ListingWriter, RepositoryResult, RestRepository,
    ensure_success,
};

#[async_trait]
impl ListingReader for RestRepository {
    async fn list_listings(&self, query: ListingListQuery) -> RepositoryResult<Vec<Listing>> {
        let request = self
            .client
            .get(self.table_url(&self.config.listings_table))
            .query(&query.to_params());

        let response = ensure_success(self.authorized(request).send().await?).await?;
        let rows: Vec<RowListing> = response.json().await?;

        let listings = rows
            .into_iter()
            .filter_map(|row| match Listing::try_from(row) {
                Ok(listing) => Some(listing),
                Err(e) => {
                    log::warn!("Skipping malformed listing row: {e}");
                    None
                }
            })
            .collect();

        // The store's pattern matching treats `*` as a wildcard, so re-check
        // the predicates locally.
        Ok(query.apply(listings))
    }

    async fn get_listing_by_id(&self, id: &ListingId) -> RepositoryResult<Option<Listing>> {
        let request = self
            .client
            .get(self.table_url(&self.config.listings_table))
            .query(&[
                ("select", "*".to_string()),
                ("id", format!("eq.{id}")),
                ("limit", "1".to_string()),
            ]);

        let response = self.authorized(request).send().await?;
        // The store rejects ids that do not fit the column type; no row can match them.
        if response.status() == StatusCode::BAD_REQUEST {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Store rejected listing id {id}: {body}");
            return Ok(None);
        }
        let response = ensure_success(response).await?;
        let rows: Vec<RowListing> = response.json().await?;

        let listing = rows.into_iter().next().map(Listing::try_from).transpose()?;
        Ok(listing)
    }
}

#[async_trait]
impl ListingWriter for RestRepository {
    async fn create_listing(&self, listing: &NewListing) -> RepositoryResult<()> {
        let row: RowNewListing = listing.clone().into();

        let request = self
            .client
            .post(self.table_url(&self.config.listings_table))
            .header("Prefer", "return=minimal")
            .json(&[row]);

        ensure_success(self.authorized(request).send().await?).await?;
        Ok(())
    }
}
