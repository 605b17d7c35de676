//! Presenter trait and an in-memory implementation

use crate::output::CrawlReport;

/// Receiver of crawl results
///
/// `email_found` is called synchronously from the crawl loop, exactly
/// once per distinct email and in first-discovery order.
/// `crawl_finished` is called once, after the frontier is exhausted.
pub trait EmailSink {
    /// Records a newly discovered email
    fn email_found(&mut self, email: &str);

    /// Receives the final report
    fn crawl_finished(&mut self, _report: &CrawlReport) {}
}

/// Sink that keeps everything in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    /// Emails in the order they were reported
    pub emails: Vec<String>,

    /// Whether `crawl_finished` has been called
    pub finished: bool,

    /// The final `found()` signal
    pub found: bool,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EmailSink for CollectingSink {
    fn email_found(&mut self, email: &str) {
        self.emails.push(email.to_string());
    }

    fn crawl_finished(&mut self, report: &CrawlReport) {
        self.finished = true;
        self.found = report.found();
    }
}
