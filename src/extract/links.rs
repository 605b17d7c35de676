use crate::url::strip_href;
use regex::Regex;
use std::sync::LazyLock;

// No capture groups: every hit is the full `href=...` attribute text.
static HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"href=["'][a-zA-Z0-9._~:/?#\[\]@!$&'()*+,;=-]+["']"#).unwrap()
});

/// Finds every `href` attribute value in `text`, in document order
///
/// The values are returned exactly as written, without quotes and
/// without any resolution against the page URL.
///
/// # Examples
///
/// ```
/// use email_harvest::extract::find_raw_links;
///
/// let links = find_raw_links(r#"<a href="/about">About</a> <a href='https://example.com/x'>X</a>"#);
/// assert_eq!(links, vec!["/about", "https://example.com/x"]);
/// ```
pub fn find_raw_links(text: &str) -> Vec<String> {
    HREF_RE
        .find_iter(text)
        .filter_map(|m| strip_href(m.as_str()))
        .map(str::to_string)
        .collect()
}
