//! Email-Harvest: a single-domain email crawler
//!
//! This crate walks every page reachable from a seed domain by following
//! `href` links that stay inside that domain, and collects the email
//! addresses published in the text content it fetches.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Email-Harvest operations
///
/// Only failures that stop a crawl from starting end up here. Per-page
/// failures are [`FetchError`]s and never abort the crawl.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Invalid domain: {0:?}")]
    InvalidDomain(String),
}

/// Failures reported by a [`crawler::Fetcher`]
///
/// None of these abort a crawl. The crawler drops the offending URI and
/// moves on to the next frontier entry.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Malformed URI {uri}: {reason}")]
    MalformedUri { uri: String, reason: String },

    #[error("Transport error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },
}

/// Result type alias for Email-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::crawler::{CrawlReport, Crawler, Fetcher, HttpFetcher};
pub use crate::output::{CollectingSink, ConsolePresenter, EmailSink};
pub use crate::url::{Domain, Scope};
