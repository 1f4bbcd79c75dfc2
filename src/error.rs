use thiserror::Error;

#[derive(Error, Debug)]
pub enum PriceWatchError {
    #[error("Request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Non-success status reported by the backend. Displays as the detail alone.
    #[error("{detail}")]
    BackendError { status: u16, detail: String },

    #[error("Unexpected response: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl PriceWatchError {
    /// The single line shown in the shared error region.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
