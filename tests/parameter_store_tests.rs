#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]

/// Parameter store tests
///
/// Covers the search and hash namespaces, serialization and the
/// serialize/parse round trip of both.
use hashq::ParameterStore;

#[test]
fn test_add_preserves_insertion_order() {
    let mut store = ParameterStore::new("", "");
    store.add([("color", "red"), ("size", "m"), ("color", "blue")]);
    store.add([("color", "green")]);

    assert_eq!(store.get("color"), Some("red"));
    assert_eq!(store.get_all("color"), vec!["red", "blue", "green"]);
    assert_eq!(store.to_string_search(), "color=red&size=m&color=blue&color=green");
}

#[test]
fn test_add_stringifies_scalars() {
    let mut store = ParameterStore::default();
    store.add([("id", 5106)]);
    store.add([("ratio", 0.5)]);
    store.add([("flag", true)]);
    assert_eq!(store.to_string_search(), "id=5106&ratio=0.5&flag=true");
}

#[test]
fn test_update_absent_removes_every_value() {
    let mut store = ParameterStore::new("?k=1&k=2&other=x", "");
    store.update([("k", None::<&str>)]);
    assert_eq!(store.get("k"), None);
    assert!(store.get_all("k").is_empty());
    assert_eq!(store.get("other"), Some("x"));
}

#[test]
fn test_update_replaces_with_single_value() {
    let mut store = ParameterStore::new("?k=1&k=2", "");
    store.update([("k", Some(3)), ("new", Some(4))]);
    assert_eq!(store.get_all("k"), vec!["3"]);
    assert_eq!(store.to_string_search(), "k=3&new=4");
}

#[test]
fn test_unknown_keys_read_as_absent() {
    let store = ParameterStore::new("?a=1", "#?b=2");
    assert_eq!(store.get("b"), None);
    assert_eq!(store.get_from_hash("a"), None);
    assert!(store.get_all("zzz").is_empty());
    assert!(!store.has("zzz"));
    assert!(store.has_in_hash("b"));
}

#[test]
fn test_hash_namespace_operations() {
    let mut store = ParameterStore::new("", "#/detail?id=5");
    store.add_to_hash([("id", 6)]);
    assert_eq!(store.get_all_from_hash("id"), vec!["5", "6"]);

    store.update_in_hash([("id", Some("7"))]);
    assert_eq!(store.to_string_hash(), "id=7");

    store.add_to_hash([("tab", "info")]);
    store.remove_from_hash(["id", "missing"]);
    assert_eq!(store.to_string_hash(), "tab=info");

    store.remove_all_from_hash();
    assert_eq!(store.to_string_hash(), "");
    assert_eq!(store.hash_path(), "#/detail");
}

#[test]
fn test_set_hash_normalizes() {
    let mut store = ParameterStore::default();
    store.set_hash("/section");
    assert_eq!(store.hash_path(), "#/section");
    store.set_hash("#/other");
    assert_eq!(store.hash_path(), "#/other");
}

#[test]
fn test_remove_hash_keeps_hash_params() {
    let mut store = ParameterStore::new("", "#frag?x=2");
    store.remove_hash();
    assert_eq!(store.hash_path(), "");
    assert_eq!(store.get_from_hash("x"), Some("2"));
    assert_eq!(store.to_href("/p"), "/p#?x=2");
}

#[test]
fn test_to_href_assembly() {
    let store = ParameterStore::new("?type=detail&id=5106", "#/section1?param=value");
    assert_eq!(
        store.to_href("/orders"),
        "/orders?type=detail&id=5106#/section1?param=value"
    );

    let only_hash = ParameterStore::new("", "#top");
    assert_eq!(only_hash.to_href("/"), "/#top");
}

#[test]
fn test_search_round_trip() {
    let mut store = ParameterStore::default();
    store.add([("q", "rust & c++"), ("q", "50% off"), ("empty", "")]);
    store.add([("unicode", "café ✓")]);

    let serialized = store.to_string_search();
    let reparsed = ParameterStore::new(&serialized, "");

    let pairs: Vec<_> = store.search_entries().collect();
    let reparsed_pairs: Vec<_> = reparsed.search_entries().collect();
    assert_eq!(pairs, reparsed_pairs);
    assert_eq!(reparsed.to_string_search(), serialized);
}

#[test]
fn test_full_address_round_trip() {
    let mut store = ParameterStore::new("?a=1", "#view?x=y z");
    store.add([("a", "2")]);
    store.add_to_hash([("tricky", "#?&=")]);

    let reparsed = ParameterStore::from_href(&store.to_href("/p"));
    assert_eq!(reparsed, store);
}

#[test]
fn test_entries_iterate_in_order() {
    let store = ParameterStore::new("b=2&a=1", "#?z=26&y=25");
    let search: Vec<_> = store.search_entries().collect();
    let hash: Vec<_> = store.hash_entries().collect();
    assert_eq!(search, vec![("b", "2"), ("a", "1")]);
    assert_eq!(hash, vec![("z", "26"), ("y", "25")]);
}

#[test]
fn test_hash_path_with_question_mark_survives_reparse() {
    let mut store = ParameterStore::new("?a=1", "");
    store.set_hash("/search?draft");
    store.add_to_hash([("q", "x?y")]);

    let href = store.to_href("/p");
    assert_eq!(href, "/p?a=1#/search%3Fdraft?q=x%3Fy");
    assert_eq!(ParameterStore::from_href(&href), store);
}
