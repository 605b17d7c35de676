//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties everything together:
//! - Popping URIs off the frontier and gating them on the visited set
//! - Dispatching fetches, at most `concurrency` at a time
//! - Scanning text pages for emails, then for links
//! - Pushing in-scope links back onto the frontier
//!
//! The coordinator is the single owner of all crawl state. Fetch tasks
//! only perform I/O and hand their result back, so extraction and state
//! updates never race.

use crate::crawler::state::{EmailSet, Frontier, VisitedSet};
use crate::crawler::{FetchedPage, Fetcher};
use crate::extract::{find_emails, find_raw_links};
use crate::output::{format_summary, CrawlReport, CrawlStats, EmailSink};
use crate::url::{reconstruct_uri, Domain, Scope};
use crate::FetchError;
use chrono::Utc;
use std::sync::Arc;
use tokio::task::JoinSet;

/// How often (in completed fetches) progress is logged
const PROGRESS_INTERVAL: u64 = 25;

/// Single-domain email crawler
///
/// # Example
///
/// ```no_run
/// use email_harvest::config::Config;
/// use email_harvest::crawler::{Crawler, HttpFetcher};
/// use email_harvest::output::CollectingSink;
/// use email_harvest::url::Domain;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = Arc::new(HttpFetcher::from_config(&Config::default())?);
/// let crawler = Crawler::new(Domain::parse("example.com")?, false);
/// let mut sink = CollectingSink::new();
/// let report = crawler.run(fetcher, &mut sink).await;
/// println!("found {} emails", report.emails.len());
/// # Ok(())
/// # }
/// ```
pub struct Crawler {
    scope: Scope,
    frontier: Frontier,
    visited: VisitedSet,
    emails: EmailSet,
    stats: CrawlStats,
    concurrency: usize,
}

impl Crawler {
    /// Creates a crawler whose frontier holds only `domain`
    pub fn new(domain: Domain, allow_subdomains: bool) -> Self {
        let frontier = Frontier::seeded(domain.as_str());
        Self {
            scope: Scope::new(domain, allow_subdomains),
            frontier,
            visited: VisitedSet::default(),
            emails: EmailSet::default(),
            stats: CrawlStats::default(),
            concurrency: 1,
        }
    }

    /// Sets the maximum number of fetches in flight (at least 1)
    ///
    /// With 1, pages are visited in strict depth-first stack order.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn domain(&self) -> &Domain {
        self.scope.domain()
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Distinct emails found so far, in first-discovery order
    pub fn emails(&self) -> &[String] {
        self.emails.as_slice()
    }

    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    /// Runs the crawl until the frontier is empty
    ///
    /// Each new email is passed to `sink` the moment it is found. Fetch
    /// failures are logged and counted, never returned: one bad link
    /// cannot stop the crawl.
    pub async fn run<S>(mut self, fetcher: Arc<dyn Fetcher>, sink: &mut S) -> CrawlReport
    where
        S: EmailSink + ?Sized,
    {
        let started_at = Utc::now();
        tracing::info!(
            "Starting crawl of {} (subdomains: {}, concurrency: {})",
            self.scope.domain(),
            self.scope.allows_subdomains(),
            self.concurrency
        );

        let mut in_flight: JoinSet<(String, Result<FetchedPage, FetchError>)> = JoinSet::new();
        let mut completed: u64 = 0;

        loop {
            while in_flight.len() < self.concurrency {
                let Some(uri) = self.frontier.pop() else {
                    break;
                };

                // Marked before the outcome is known: failed URIs are not retried.
                if !self.visited.mark(&uri) {
                    continue;
                }

                self.stats.pages_visited += 1;
                tracing::debug!("Visiting {}", uri);

                let fetcher = Arc::clone(&fetcher);
                in_flight.spawn(async move {
                    let result = fetcher.fetch(&uri).await;
                    (uri, result)
                });
            }

            let Some(joined) = in_flight.join_next().await else {
                tracing::info!("Frontier is empty, crawl complete");
                break;
            };

            match joined {
                Ok((uri, Ok(page))) => self.process_page(&uri, page, sink),
                Ok((uri, Err(e))) => {
                    tracing::debug!("Skipping {}: {}", uri, e);
                    self.stats.fetch_failures += 1;
                }
                Err(e) => {
                    tracing::warn!("Fetch task did not complete: {}", e);
                    self.stats.fetch_failures += 1;
                }
            }

            completed += 1;
            if completed % PROGRESS_INTERVAL == 0 {
                tracing::info!(
                    "Progress: {} pages visited, {} in frontier, {} emails",
                    self.stats.pages_visited,
                    self.frontier.len(),
                    self.emails.len()
                );
            }
        }

        let report = CrawlReport {
            domain: self.scope.domain().to_string(),
            emails: self.emails.into_vec(),
            stats: self.stats,
            started_at,
            finished_at: Utc::now(),
        };

        tracing::info!("{}", format_summary(&report));
        sink.crawl_finished(&report);
        report
    }

    /// Handles one successfully fetched page
    fn process_page<S>(&mut self, uri: &str, page: FetchedPage, sink: &mut S)
    where
        S: EmailSink + ?Sized,
    {
        if !page.is_text() {
            tracing::debug!("Skipping {} with content type {:?}", uri, page.content_type);
            self.stats.pages_non_text += 1;
            return;
        }

        self.stats.pages_scanned += 1;
        let new_emails = self.extract_emails(&page.body, sink);
        let queued = self.discover_links(&page.body);
        tracing::debug!("{}: {} new emails, {} links queued", uri, new_emails, queued);
    }

    /// Adds every new valid email in `text` to the email set
    ///
    /// Each addition is reported to `sink` immediately. Returns the number
    /// of emails that were new.
    pub fn extract_emails<S>(&mut self, text: &str, sink: &mut S) -> usize
    where
        S: EmailSink + ?Sized,
    {
        let mut added = 0;
        for email in find_emails(text) {
            if self.emails.insert(&email) {
                tracing::debug!("Found email {}", email);
                sink.email_found(&email);
                added += 1;
            }
        }
        added
    }

    /// Pushes every in-scope link in `text` onto the frontier
    ///
    /// Links are pushed even if already visited or queued; the visited
    /// check happens when they are popped. Returns the number pushed.
    pub fn discover_links(&mut self, text: &str) -> usize {
        let mut queued = 0;
        for raw_link in find_raw_links(text) {
            let Some(uri) = reconstruct_uri(&raw_link, self.scope.domain()) else {
                self.stats.links_unusable += 1;
                continue;
            };

            if self.scope.contains(&uri) {
                self.frontier.push(uri);
                self.stats.links_queued += 1;
                queued += 1;
            } else {
                tracing::trace!("Out of scope: {}", uri);
                self.stats.links_out_of_scope += 1;
            }
        }
        queued
    }
}
