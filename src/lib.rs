//! Terminal client for browsing a product's price history and registering
//! price-drop email alerts against a price-history backend.

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod ui;

pub use api::{HttpBackend, PriceBackend};
pub use config::Config;
pub use error::PriceWatchError;
pub use model::{AlertRequest, PriceHistory, PricePoint};
pub use ui::core::tracker::{fetch_history, submit_alert, TrackerState};
