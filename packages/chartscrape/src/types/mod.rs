//! Data types for the web-to-chart pipeline.

pub mod chart;
pub mod config;
pub mod report;
pub mod request;
pub mod source;
