//! URL checks for submitted feeds.

use url::Url;

/// Absolute `http`, `https` or `ftp` URL with a host.
pub fn is_valid_url(input: &str) -> bool {
    let input = input.trim();
    if input.is_empty() || input.contains(char::is_whitespace) {
        return false;
    }
    match Url::parse(input) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https" | "ftp")
                && url.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

/// A URL is new unless it contains, or is contained in, a known feed URL.
pub fn is_url_unique<'a>(url: &str, known: impl IntoIterator<Item = &'a str>) -> bool {
    !known
        .into_iter()
        .any(|link| link.contains(url) || url.contains(link))
}
