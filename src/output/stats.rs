//! Crawl statistics and the final report
//!
//! The crawler fills in [`CrawlStats`] as it goes and hands a
//! [`CrawlReport`] to the presenter once the frontier is empty.

use chrono::{DateTime, Utc};

/// Counters collected during a crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// URIs taken off the frontier and handed to the fetcher
    pub pages_visited: u64,

    /// Fetched pages with a text-like content type
    pub pages_scanned: u64,

    /// Fetched pages skipped because of their content type
    pub pages_non_text: u64,

    /// Fetches that failed (malformed URI, transport, status, body)
    pub fetch_failures: u64,

    /// In-scope links pushed onto the frontier
    pub links_queued: u64,

    /// Reconstructed links rejected by the scope check
    pub links_out_of_scope: u64,

    /// Raw links with no usable prefix
    pub links_unusable: u64,
}

impl CrawlStats {
    /// Returns the share of visited pages that were scanned, as a percentage
    pub fn scan_rate(&self) -> f64 {
        if self.pages_visited == 0 {
            return 0.0;
        }
        (self.pages_scanned as f64 / self.pages_visited as f64) * 100.0
    }
}

/// Outcome of one crawl invocation
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// The seed domain
    pub domain: String,

    /// Distinct emails in first-discovery order
    pub emails: Vec<String>,

    pub stats: CrawlStats,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// Returns true if at least one email was found
    pub fn found(&self) -> bool {
        !self.emails.is_empty()
    }

    /// Wall-clock duration of the crawl in milliseconds
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

/// Formats a one-line summary of a finished crawl
pub fn format_summary(report: &CrawlReport) -> String {
    let stats = &report.stats;
    format!(
        "{}: {} emails, {} pages visited ({} scanned, {} non-text, {} failed), \
         {} links queued, {} out of scope, {} unusable, {:.1}% scanned, {}ms",
        report.domain,
        report.emails.len(),
        stats.pages_visited,
        stats.pages_scanned,
        stats.pages_non_text,
        stats.fetch_failures,
        stats.links_queued,
        stats.links_out_of_scope,
        stats.links_unusable,
        stats.scan_rate(),
        report.duration_ms()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn report(emails: Vec<&str>) -> CrawlReport {
        let started_at = Utc::now();
        CrawlReport {
            domain: "example.com".to_string(),
            emails: emails.into_iter().map(str::to_string).collect(),
            stats: CrawlStats {
                pages_visited: 4,
                pages_scanned: 3,
                pages_non_text: 1,
                fetch_failures: 0,
                links_queued: 7,
                links_out_of_scope: 2,
                links_unusable: 1,
            },
            started_at,
            finished_at: started_at + Duration::milliseconds(1500),
        }
    }

    #[test]
    fn test_scan_rate() {
        let stats = report(vec![]).stats;
        assert!((stats.scan_rate() - 75.0).abs() < 0.01);
    }

    #[test]
    fn test_scan_rate_zero_pages() {
        assert_eq!(CrawlStats::default().scan_rate(), 0.0);
    }

    #[test]
    fn test_found() {
        assert!(!report(vec![]).found());
        assert!(report(vec!["a@example.com"]).found());
    }

    #[test]
    fn test_duration() {
        assert_eq!(report(vec![]).duration_ms(), 1500);
    }

    #[test]
    fn test_format_summary() {
        let summary = format_summary(&report(vec!["a@example.com"]));
        assert!(summary.starts_with("example.com: 1 emails, 4 pages visited"));
        assert!(summary.contains("3 scanned, 1 non-text, 0 failed"));
        assert!(summary.contains("7 links queued, 2 out of scope, 1 unusable"));
        assert!(summary.ends_with("75.0% scanned, 1500ms"));
    }
}
