//! Console presenter
//!
//! Produces the user-facing output of the binary: a banner, one line per
//! email as soon as it is found, and a final line when nothing was found.

use crate::output::{CrawlReport, EmailSink};
use std::io::{self, Write};

/// Prints crawl results to a writer (stdout in the binary)
pub struct ConsolePresenter<W: Write> {
    out: W,
}

impl ConsolePresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Prints the banner shown before the crawl starts
    pub fn announce(&mut self, domain: &str) -> io::Result<()> {
        writeln!(self.out, "Finding emails for {}\n", domain)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        // A closed stdout must not abort the crawl.
        if let Err(e) = writeln!(self.out, "{}", line).and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to write output: {}", e);
        }
    }
}

impl<W: Write> EmailSink for ConsolePresenter<W> {
    fn email_found(&mut self, email: &str) {
        self.write_line(email);
    }

    fn crawl_finished(&mut self, report: &CrawlReport) {
        if !report.found() {
            self.write_line("No emails found");
        }
    }
}
