pub mod animate;
pub mod chart;
pub mod config;
pub mod summary;
