use crate::{UrlError, UrlResult};
use std::fmt;

/// The normalized hostname anchoring a crawl
///
/// A `Domain` never ends with `/` and never carries a scheme. It is set
/// once when the crawler is built and never changes afterwards.
///
/// # Examples
///
/// ```
/// use email_harvest::url::Domain;
///
/// let domain = Domain::parse("example.com/").unwrap();
/// assert_eq!(domain.as_str(), "example.com");
///
/// let domain = Domain::parse("https://example.com").unwrap();
/// assert_eq!(domain.as_str(), "example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Domain(String);

impl Domain {
    /// Normalizes a user-supplied domain
    ///
    /// # Normalization Steps
    ///
    /// 1. Trim surrounding whitespace
    /// 2. Drop a leading `http://` or `https://`
    /// 3. Drop every trailing `/`
    ///
    /// # Returns
    ///
    /// * `Ok(Domain)` - The normalized domain
    /// * `Err(UrlError::InvalidDomain)` - Nothing is left, or whitespace remains inside
    pub fn parse(raw: &str) -> UrlResult<Self> {
        let trimmed = raw.trim();
        let without_scheme = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"))
            .unwrap_or(trimmed);
        let normalized = without_scheme.trim_end_matches('/');

        if normalized.is_empty() || normalized.chars().any(char::is_whitespace) {
            return Err(UrlError::InvalidDomain(raw.to_string()));
        }

        Ok(Self(normalized.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
