pub mod chart;
pub mod core;
pub mod dashboard;
