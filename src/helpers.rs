use crate::compat::{Cow, String};

/// Split a hash fragment at its first `?`
/// Returns (`hash_path`, `hash_query`), the query WITHOUT the leading '?'
pub fn split_hash(hash: &str) -> (&str, Option<&str>) {
    memchr::memchr(b'?', hash.as_bytes()).map_or((hash, None), |pos| {
        (&hash[..pos], Some(&hash[pos + 1..]))
    })
}

/// Prune fragment (#hash) from an address string
/// Returns (`address_without_fragment`, `fragment_without_hash`)
pub fn prune_fragment(input: &str) -> (&str, Option<&str>) {
    memchr::memchr(b'#', input.as_bytes()).map_or((input, None), |pos| {
        (&input[..pos], Some(&input[pos + 1..]))
    })
}

/// Normalize a hash path so it is empty or starts with `#`
pub fn normalize_hash_path(hash: &str) -> Cow<'_, str> {
    if hash.is_empty() || hash.starts_with('#') {
        Cow::Borrowed(hash)
    } else {
        let mut owned = String::with_capacity(hash.len() + 1);
        owned.push('#');
        owned.push_str(hash);
        Cow::Owned(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_hash() {
        assert_eq!(split_hash("#/section?x=1"), ("#/section", Some("x=1")));
        assert_eq!(split_hash("#/section"), ("#/section", None));
        assert_eq!(split_hash("#?a=1?b=2"), ("#", Some("a=1?b=2")));
        assert_eq!(split_hash(""), ("", None));
    }

    #[test]
    fn test_prune_fragment() {
        assert_eq!(prune_fragment("/p?q=1#frag"), ("/p?q=1", Some("frag")));
        assert_eq!(prune_fragment("/p"), ("/p", None));
    }

    #[test]
    fn test_normalize_hash_path() {
        assert_eq!(normalize_hash_path("section"), "#section");
        assert_eq!(normalize_hash_path("#section"), "#section");
        assert_eq!(normalize_hash_path(""), "");
    }
}
