pub mod backend;
pub mod http;

pub use backend::PriceBackend;
pub use http::HttpBackend;
