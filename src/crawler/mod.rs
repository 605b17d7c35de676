//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The frontier stack, visited set and email set
//! - HTTP fetching behind the [`Fetcher`] trait
//! - The crawl loop that drives fetch, classify, extract and enqueue

mod coordinator;
mod fetcher;
mod state;

pub use coordinator::Crawler;
pub use fetcher::{
    build_http_client, is_text_content, FetchedPage, Fetcher, HttpFetcher, MAX_REDIRECTS,
};
pub use state::{EmailSet, Frontier, VisitedSet};

pub use crate::output::CrawlReport;

use crate::config::Config;
use crate::output::EmailSink;
use crate::url::Domain;
use std::sync::Arc;

/// Runs a complete crawl with the HTTP fetcher
///
/// This is the main entry point used by the binary. It will:
/// 1. Build the HTTP client from the configuration
/// 2. Seed the frontier with `domain`
/// 3. Crawl until the frontier is empty, reporting emails to `sink`
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The crawl ran to completion (possibly finding nothing)
/// * `Err(HarvestError)` - The HTTP client could not be built
pub async fn crawl<S>(
    domain: Domain,
    allow_subdomains: bool,
    config: &Config,
    sink: &mut S,
) -> crate::Result<CrawlReport>
where
    S: EmailSink + ?Sized,
{
    let fetcher = Arc::new(HttpFetcher::from_config(config)?);
    let crawler = Crawler::new(domain, allow_subdomains)
        .with_concurrency(config.crawler.concurrency as usize);

    Ok(crawler.run(fetcher, sink).await)
}
