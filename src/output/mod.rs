//! Output module for presenting crawl results
//!
//! This module handles:
//! - The [`EmailSink`] trait the crawler reports to
//! - Printing emails to the console as they are found
//! - Crawl statistics and the end-of-crawl summary

mod console;
pub mod stats;
mod traits;

pub use console::ConsolePresenter;
pub use stats::{format_summary, CrawlReport, CrawlStats};
pub use traits::{CollectingSink, EmailSink};
