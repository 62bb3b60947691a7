#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]

/// URL helper tests
///
/// Exercises the free-standing helpers through the public API only.
use hashq::builder::{build_url, serialize_query_params, with_params};
use hashq::encoding::{decode_component, decode_component_safe, encode_component};
use hashq::paths::{join_url_paths, relative_path};
use hashq::utm::{add_utm_parameters, strip_utm_parameters};
use hashq::validators::{compare_url_params, compare_urls, is_url_secure, sanitize_url};
use hashq::{Error, ParameterStore};

#[test]
fn test_relative_path_cases() {
    let cases = [
        ("https://x.test/a/b", "https://x.test/a/c", "c"),
        ("https://x.test/a/b", "https://x.test/a", "../a"),
        ("https://x.test/a/b/c", "https://x.test/a/d/e", "../d/e"),
        ("https://x.test/a/", "https://x.test/a/b/c", "b/c"),
        ("https://x.test/a/b", "https://x.test/a/", "./"),
    ];
    for (from, to, expected) in cases {
        assert_eq!(relative_path(from, to).unwrap(), expected, "{from} -> {to}");
    }
}

#[test]
fn test_relative_path_errors() {
    assert_eq!(
        relative_path("https://x.test/a", "http://x.test/a"),
        Err(Error::CrossOrigin)
    );
    assert_eq!(relative_path("/a", "https://x.test/a"), Err(Error::InvalidUrl));
}

#[test]
fn test_safe_decoding_never_fails() {
    assert_eq!(decode_component_safe("%"), "%");
    assert_eq!(decode_component_safe("%E0%A4%A"), "%E0%A4%A");
    assert_eq!(decode_component_safe("a%20b"), "a b");
    assert_eq!(decode_component("%zz"), Err(Error::InvalidPercentEncoding));
    assert_eq!(decode_component(&encode_component("ü & ?")).unwrap(), "ü & ?");
}

#[test]
fn test_builders_agree_with_store() {
    let built = build_url("https://x.test/", "/search", [("q", "a b"), ("page", "2")]).unwrap();
    assert_eq!(built, "https://x.test/search?q=a+b&page=2");

    let store = ParameterStore::from_href(&built);
    assert_eq!(store.get("q"), Some("a b"));
    assert_eq!(
        store.to_string_search(),
        serialize_query_params([("q", "a b"), ("page", "2")])
    );
}

#[test]
fn test_with_params_sets_fragment() {
    let url = with_params("https://x.test/p?a=1", [("b", 2)], Some("#tab?x=1")).unwrap();
    assert_eq!(url, "https://x.test/p?a=1&b=2#tab?x=1");
    assert_eq!(ParameterStore::from_href(&url).get_from_hash("x"), Some("1"));
}

#[test]
fn test_utm_round_trip() {
    let tagged = add_utm_parameters(
        "https://x.test/landing?id=7",
        [("utm_source", "mail"), ("utm_campaign", "spring")],
    )
    .unwrap();
    assert_eq!(
        tagged,
        "https://x.test/landing?id=7&utm_source=mail&utm_campaign=spring"
    );
    assert_eq!(strip_utm_parameters(&tagged).unwrap(), "https://x.test/landing?id=7");
}

#[test]
fn test_validators() {
    assert!(is_url_secure("https://x.test"));
    assert!(!is_url_secure("http://x.test"));
    assert!(!is_url_secure("::"));
    assert_eq!(sanitize_url("JavaScript:alert(1)"), "alert(1)");
    assert!(compare_urls("https://x.test/a?x=1", "https://x.test/a#h").unwrap());
    assert!(compare_url_params("https://x.test/?q=a%20b", "https://y.test/z?q=a+b").unwrap());
    assert!(!compare_url_params("https://x.test/?a=1&b=2", "https://x.test/?b=2&a=1").unwrap());
}

#[test]
fn test_join_url_paths_skips_empty_pieces() {
    assert_eq!(join_url_paths(["/", "api", "", "/v2/"]), "api/v2");
}
