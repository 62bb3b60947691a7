use url::Url;

use crate::compat::{String, ToString};
use crate::error::Result;
use crate::query_params::QueryParams;

/// Append `params` to the query of `url`, keeping its existing parameters
fn append_query<I, K, V>(url: &mut Url, params: I)
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: ToString,
{
    let mut query = QueryParams::parse(url.query().unwrap_or(""));
    for (key, value) in params {
        query.append(key.as_ref(), &value.to_string());
    }
    let serialized = query.serialize();
    url.set_query((!serialized.is_empty()).then_some(serialized.as_str()));
}

/// Build an absolute URL from `base`, an optional replacement path and extra
/// query parameters.
///
/// ```
/// let url = hashq::builder::build_url("https://x.test/old?a=1", "/new", [("b", 2)]).unwrap();
/// assert_eq!(url, "https://x.test/new?a=1&b=2");
/// ```
pub fn build_url<I, K, V>(base: &str, path: &str, params: I) -> Result<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: ToString,
{
    let mut url = Url::parse(base)?;
    if !path.is_empty() {
        url.set_path(path);
    }
    append_query(&mut url, params);
    Ok(url.into())
}

/// Append query parameters and optionally set the fragment of `base`.
/// This is the address the navigation shortcuts of a page would use.
pub fn with_params<I, K, V>(base: &str, params: I, hash: Option<&str>) -> Result<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: ToString,
{
    let mut url = Url::parse(base)?;
    append_query(&mut url, params);
    if let Some(hash) = hash.filter(|hash| !hash.is_empty()) {
        url.set_fragment(Some(hash.strip_prefix('#').unwrap_or(hash)));
    }
    Ok(url.into())
}

/// Serialize key/value pairs as a form-encoded query string without `?`
pub fn serialize_query_params<I, K, V>(params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: ToString,
{
    let mut query = QueryParams::new();
    for (key, value) in params {
        query.append(key.as_ref(), &value.to_string());
    }
    query.serialize()
}
