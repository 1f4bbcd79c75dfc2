use crate::error::PriceWatchError;
use crate::model::{AlertRequest, PriceHistory};
use async_trait::async_trait;

/// The price-history service the tracker talks to.
#[async_trait]
pub trait PriceBackend: Send + Sync {
    async fn fetch_history(&self, url: &str) -> Result<PriceHistory, PriceWatchError>;

    async fn create_alert(&self, request: &AlertRequest) -> Result<(), PriceWatchError>;
}
