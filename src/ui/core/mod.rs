pub mod alerts;
pub mod tracker;
