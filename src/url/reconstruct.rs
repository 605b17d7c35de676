use crate::url::Domain;

/// Extracts the raw link from a full `href="..."` attribute match
///
/// Drops the `href=` prefix and the surrounding quote characters.
///
/// # Examples
///
/// ```
/// use email_harvest::url::strip_href;
///
/// assert_eq!(strip_href(r#"href="/about""#), Some("/about"));
/// assert_eq!(strip_href("href='//cdn.example.com/x'"), Some("//cdn.example.com/x"));
/// ```
pub fn strip_href(attribute: &str) -> Option<&str> {
    let quoted = attribute.strip_prefix("href=")?;
    let inner = quoted
        .strip_prefix(['"', '\''])?
        .strip_suffix(['"', '\''])?;

    if inner.is_empty() {
        None
    } else {
        Some(inner)
    }
}

/// Converts a raw link into a scheme-less URI
///
/// # Prefix Rules
///
/// | Link starts with | Result |
/// |------------------|--------|
/// | `//` | remainder after `//` |
/// | `/` | `domain` + link |
/// | `http://` | remainder after the scheme |
/// | `https://` | remainder after the scheme |
/// | `https:/` | remainder after the one-slash scheme |
/// | anything else | `None` |
///
/// Relative paths, fragments and other schemes (`mailto:`, `javascript:`)
/// are not usable and yield `None`.
///
/// # Examples
///
/// ```
/// use email_harvest::url::{reconstruct_uri, Domain};
///
/// let domain = Domain::parse("example.com").unwrap();
/// assert_eq!(reconstruct_uri("/about", &domain), Some("example.com/about".to_string()));
/// assert_eq!(reconstruct_uri("mailto:a@example.com", &domain), None);
/// ```
pub fn reconstruct_uri(link: &str, domain: &Domain) -> Option<String> {
    if let Some(rest) = link.strip_prefix("//") {
        Some(rest.to_string())
    } else if link.starts_with('/') {
        Some(format!("{}{}", domain.as_str(), link))
    } else if let Some(rest) = link.strip_prefix("http://") {
        Some(rest.to_string())
    } else if let Some(rest) = link.strip_prefix("https://") {
        Some(rest.to_string())
    } else if let Some(rest) = link.strip_prefix("https:/") {
        // Seen in the wild on redirect pages
        Some(rest.to_string())
    } else {
        None
    }
}
