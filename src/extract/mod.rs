//! Text extraction for fetched pages
//!
//! Both extractors work on the raw body text with regular expressions,
//! not on a parsed DOM, so emails and links are found in scripts,
//! comments and plain-text documents alike.

mod emails;
mod links;

pub use emails::{find_emails, is_valid_email};
pub use links::find_raw_links;
