//! URL handling module for Email-Harvest
//!
//! URIs inside the crawler never carry a scheme: they are bare
//! `host/path` strings. This module owns the seed [`Domain`], the
//! [`Scope`] rule deciding which discovered URIs may be crawled, and the
//! reconstruction of raw `href` values into that scheme-less form.

mod domain;
mod reconstruct;

pub use domain::Domain;
pub use reconstruct::{reconstruct_uri, strip_href};

/// Scheme the crawler uses for every request
const FETCH_SCHEME: &str = "http://";

/// Turns a scheme-less URI into the URL handed to the fetch transport
///
/// The crawler is HTTP-only: `https://` is never produced here.
///
/// # Examples
///
/// ```
/// use email_harvest::url::to_fetch_url;
///
/// assert_eq!(to_fetch_url("example.com/about"), "http://example.com/about");
/// ```
pub fn to_fetch_url(uri: &str) -> String {
    format!("{}{}", FETCH_SCHEME, uri)
}

/// The scoping rule for a crawl
///
/// Without subdomains a URI is in scope when it starts with the domain or
/// with `www.` + domain. With subdomains it is in scope when the domain
/// appears anywhere inside it.
#[derive(Debug, Clone)]
pub struct Scope {
    domain: Domain,
    www_domain: String,
    allow_subdomains: bool,
}

impl Scope {
    /// Creates the scope rule anchored at `domain`
    pub fn new(domain: Domain, allow_subdomains: bool) -> Self {
        let www_domain = format!("www.{}", domain.as_str());
        Self {
            domain,
            www_domain,
            allow_subdomains,
        }
    }

    /// Returns true if `uri` may be pushed onto the frontier
    pub fn contains(&self, uri: &str) -> bool {
        let domain = self.domain.as_str();
        if self.allow_subdomains {
            uri.contains(domain)
        } else {
            uri.starts_with(domain) || uri.starts_with(&self.www_domain)
        }
    }

    /// The anchor domain
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Whether subdomain-inclusive scoping is enabled
    pub fn allows_subdomains(&self) -> bool {
        self.allow_subdomains
    }
}
