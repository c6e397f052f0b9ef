use crate::models::Listing;
use crate::sources::types::ListingQuery;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for stores that can evaluate a filter formula
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch the listings matching the query's formula
    async fn fetch(&self, query: &ListingQuery) -> Result<Vec<Listing>>;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;
}
