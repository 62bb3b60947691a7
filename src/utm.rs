use url::Url;

use crate::compat::String;
use crate::error::Result;
use crate::query_params::QueryParams;

/// The campaign parameters recognized by [`strip_utm_parameters`]
pub const UTM_KEYS: [&str; 5] = [
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
];

fn rewrite_query(url: &mut Url, f: impl FnOnce(&mut QueryParams)) {
    let mut query = QueryParams::parse(url.query().unwrap_or(""));
    f(&mut query);
    let serialized = query.serialize();
    url.set_query((!serialized.is_empty()).then_some(serialized.as_str()));
}

/// Set campaign parameters on `base`, replacing earlier values of the same keys
pub fn add_utm_parameters<I, K, V>(base: &str, params: I) -> Result<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut url = Url::parse(base)?;
    rewrite_query(&mut url, |query| {
        for (key, value) in params {
            query.set(key.as_ref(), value.as_ref());
        }
    });
    Ok(url.into())
}

/// Remove every `utm_*` campaign parameter listed in [`UTM_KEYS`]
pub fn strip_utm_parameters(url: &str) -> Result<String> {
    let mut url = Url::parse(url)?;
    rewrite_query(&mut url, |query| {
        for key in UTM_KEYS {
            query.delete(key);
        }
    });
    Ok(url.into())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_add_utm_parameters() {
        let url = add_utm_parameters(
            "https://x.test/?utm_source=old&id=1",
            [("utm_source", "news"), ("utm_medium", "email")],
        )
        .unwrap();
        assert_eq!(url, "https://x.test/?utm_source=news&id=1&utm_medium=email");
    }

    #[test]
    fn test_strip_utm_parameters() {
        let url = strip_utm_parameters("https://x.test/p?utm_source=a&id=1&utm_term=b#f").unwrap();
        assert_eq!(url, "https://x.test/p?id=1#f");
        let url = strip_utm_parameters("https://x.test/p?utm_campaign=c").unwrap();
        assert_eq!(url, "https://x.test/p");
    }
}
