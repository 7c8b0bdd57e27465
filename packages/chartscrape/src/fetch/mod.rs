//! Fetcher implementations.

pub mod http;
pub mod paced;

pub use http::HttpFetcher;
pub use paced::{FetcherExt, PacedFetcher};
