use regex::Regex;
use std::sync::LazyLock;

// The domain run may swallow several labels before the final `.tld`.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());

/// Finds every acceptable email address in `text`, in match order
///
/// Candidates failing [`is_valid_email`] are dropped. Repeated addresses
/// are returned as many times as they occur.
///
/// # Examples
///
/// ```
/// use email_harvest::extract::find_emails;
///
/// let emails = find_emails("write to jane.doe@example.com or a..b@example.com");
/// assert_eq!(emails, vec!["jane.doe@example.com"]);
/// ```
pub fn find_emails(text: &str) -> Vec<String> {
    EMAIL_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|candidate| is_valid_email(candidate))
        .map(str::to_string)
        .collect()
}

/// Dot-placement check for an email candidate
///
/// Rejects a local part that starts or ends with `.`, a candidate that
/// starts or ends with `.`, and any `..`. Nothing else is checked.
pub fn is_valid_email(candidate: &str) -> bool {
    let Some((local, _domain)) = candidate.split_once('@') else {
        return false;
    };

    if local.starts_with('.')
        || local.ends_with('.')
        || candidate.starts_with('.')
        || candidate.ends_with('.')
    {
        return false;
    }

    !candidate.contains("..")
}
