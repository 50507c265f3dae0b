//! Market-data providers
//!
//! [`MarketDataProvider`] is the seam between the chart generator and the
//! vendor that supplies price history. [`yahoo::YahooClient`] is the only
//! production implementation; tests substitute in-memory providers.

pub mod yahoo;

use async_trait::async_trait;

use crate::models::{HistoryRequest, PriceFrame};
use yahoo::ApiError;

#[async_trait]
pub trait MarketDataProvider {
    /// Fetch price history. `Ok(None)` means the vendor has no data for the request.
    async fn download(&self, request: &HistoryRequest) -> Result<Option<PriceFrame>, ApiError>;
}
