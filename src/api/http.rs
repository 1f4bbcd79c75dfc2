use crate::api::backend::PriceBackend;
use crate::config::Config;
use crate::error::PriceWatchError;
use crate::model::{AlertRequest, ErrorBody, HistoryRequest, PriceHistory};
use async_trait::async_trait;
use log::{debug, info, warn};

const HISTORY_PATH: &str = "/api/history";
const ALERTS_PATH: &str = "/api/alerts";

const HISTORY_FALLBACK: &str = "Failed to fetch price history";
const ALERT_FALLBACK: &str = "Failed to create price alert";

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self, PriceWatchError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self::with_client(client, &config.api_base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Maps a non-success response body to a backend error, using `fallback`
/// when the body carries no usable detail.
pub fn backend_error(status: u16, body: &[u8], fallback: &str) -> PriceWatchError {
    let detail = match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => parsed.message(),
        Err(e) => {
            debug!("Unparseable error body (status {}): {}", status, e);
            None
        }
    };

    PriceWatchError::BackendError {
        status,
        detail: detail.unwrap_or_else(|| fallback.to_string()),
    }
}

#[async_trait]
impl PriceBackend for HttpBackend {
    async fn fetch_history(&self, url: &str) -> Result<PriceHistory, PriceWatchError> {
        let endpoint = self.endpoint(HISTORY_PATH);
        info!("Requesting price history for {}", url);

        let response = self
            .client
            .post(&endpoint)
            .json(&HistoryRequest { url })
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let err = backend_error(status.as_u16(), &body, HISTORY_FALLBACK);
            warn!("History request failed with {}: {}", status, err);
            return Err(err);
        }

        let history: PriceHistory = serde_json::from_slice(&body)?;
        info!(
            "Received {} price points for {}",
            history.history.len(),
            history.asin
        );
        Ok(history)
    }

    async fn create_alert(&self, request: &AlertRequest) -> Result<(), PriceWatchError> {
        let endpoint = self.endpoint(ALERTS_PATH);
        info!(
            "Creating alert for {} at {:.2}",
            request.asin, request.target_price
        );

        let response = self.client.post(&endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await?;
            let err = backend_error(status.as_u16(), &body, ALERT_FALLBACK);
            warn!("Alert request failed with {}: {}", status, err);
            return Err(err);
        }

        Ok(())
    }
}
