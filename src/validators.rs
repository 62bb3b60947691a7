use url::Url;

use crate::compat::{String, ToString};
use crate::error::Result;
use crate::query_params::QueryParams;

/// Check if a string parses as an absolute URL
pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url).is_ok()
}

/// Check if a URL uses `https`.
///
/// Unparseable input is reported as not secure and logged.
pub fn is_url_secure(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.scheme() == "https",
        Err(err) => {
            tracing::warn!(url, error = %err, "invalid URL in secure-scheme check");
            false
        }
    }
}

/// Normalize a URL through the parser
pub fn format_url(url: &str) -> Result<String> {
    Ok(Url::parse(url)?.as_str().to_string())
}

/// Remove every `javascript:` marker, ignoring ASCII case
pub fn sanitize_url(url: &str) -> String {
    const MARKER: &[u8] = b"javascript:";

    let bytes = url.as_bytes();
    let mut result = String::with_capacity(url.len());
    let mut start = 0;
    let mut i = 0;
    while i + MARKER.len() <= bytes.len() {
        if bytes[i..i + MARKER.len()].eq_ignore_ascii_case(MARKER) {
            result.push_str(&url[start..i]);
            i += MARKER.len();
            start = i;
        } else {
            i += 1;
        }
    }
    result.push_str(&url[start..]);
    result
}

/// Compare two URLs by origin and path, ignoring query and fragment
pub fn compare_urls(a: &str, b: &str) -> Result<bool> {
    let a = Url::parse(a)?;
    let b = Url::parse(b)?;
    Ok(a.origin() == b.origin() && a.path() == b.path())
}

/// Compare the query parameters of two URLs after normalizing their encoding.
/// Parameter order matters.
pub fn compare_url_params(a: &str, b: &str) -> Result<bool> {
    let a = Url::parse(a)?;
    let b = Url::parse(b)?;
    let normalize = |url: &Url| QueryParams::parse(url.query().unwrap_or("")).serialize();
    Ok(normalize(&a) == normalize(&b))
}
