//! overspend-http: HTTP + JSON page fetcher for the transaction-search service

pub mod fetcher;

pub use fetcher::{DEFAULT_ENDPOINT, HttpConfig, HttpPageFetcher};
