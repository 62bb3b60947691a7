use crate::compat::{String, ToString, Vec};
use crate::error::Result;
use crate::helpers::{normalize_hash_path, prune_fragment, split_hash};
use crate::platform::{History, Location};
use crate::query_params::QueryParams;

/// Query-string and hash-fragment parameters of one address.
///
/// The search namespace and the hash namespace are independent multimaps:
/// the same key can live in both without any relationship. The hash path is
/// the part of the fragment before its first `?` and is always empty or
/// starts with `#`.
///
/// # Examples
///
/// ```
/// use hashq::ParameterStore;
///
/// let mut store = ParameterStore::new("?type=detail&id=5106", "#/section?tab=2");
/// assert_eq!(store.get("id"), Some("5106"));
/// assert_eq!(store.get_from_hash("tab"), Some("2"));
///
/// store.add([("id", 7)]);
/// store.update_in_hash([("tab", None::<&str>)]);
/// assert_eq!(store.to_href("/page"), "/page?type=detail&id=5106&id=7#/section");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterStore {
    search: QueryParams,
    hash_path: String,
    hash: QueryParams,
}

impl ParameterStore {
    /// Build a store from a query string (with or without `?`) and a hash
    /// fragment (with or without `#`).
    pub fn new(search: &str, hash: &str) -> Self {
        let (hash_path, hash_query) = split_hash(hash);
        Self {
            search: QueryParams::parse(search),
            hash_path: normalize_hash_path(hash_path).into_owned(),
            hash: hash_query.map(QueryParams::parse).unwrap_or_default(),
        }
    }

    /// Build a store from the current platform address
    pub fn from_location<L: Location + ?Sized>(location: &L) -> Self {
        Self::new(&location.search(), &location.hash())
    }

    /// Build a store from a relative or absolute address such as
    /// `/list?page=2#/detail?id=5`.
    pub fn from_href(href: &str) -> Self {
        let (before_fragment, fragment) = prune_fragment(href);
        let search = memchr::memchr(b'?', before_fragment.as_bytes())
            .map_or("", |pos| &before_fragment[pos..]);
        Self::new(search, fragment.unwrap_or(""))
    }

    // Search namespace

    pub fn get(&self, key: &str) -> Option<&str> {
        self.search.get(key)
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.search.get_all(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.search.has(key)
    }

    /// Append one value per entry, keeping existing values
    pub fn add<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToString,
    {
        append_entries(&mut self.search, entries);
    }

    /// Replace each key's values with one value, or delete the key on `None`
    pub fn update<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: ToString,
    {
        update_entries(&mut self.search, entries);
    }

    /// Delete every value of each key; unknown keys are ignored
    pub fn remove<I, K>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        for key in keys {
            self.search.delete(key.as_ref());
        }
    }

    pub fn remove_all(&mut self) {
        self.search.clear();
    }

    pub fn search_params(&self) -> &QueryParams {
        &self.search
    }

    pub fn search_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.search.iter()
    }

    /// Serialized search parameters, without a leading `?`
    pub fn to_string_search(&self) -> String {
        self.search.serialize()
    }

    // Hash namespace

    pub fn get_from_hash(&self, key: &str) -> Option<&str> {
        self.hash.get(key)
    }

    pub fn get_all_from_hash(&self, key: &str) -> Vec<&str> {
        self.hash.get_all(key)
    }

    pub fn has_in_hash(&self, key: &str) -> bool {
        self.hash.has(key)
    }

    pub fn add_to_hash<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToString,
    {
        append_entries(&mut self.hash, entries);
    }

    pub fn update_in_hash<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: ToString,
    {
        update_entries(&mut self.hash, entries);
    }

    pub fn remove_from_hash<I, K>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        for key in keys {
            self.hash.delete(key.as_ref());
        }
    }

    pub fn remove_all_from_hash(&mut self) {
        self.hash.clear();
    }

    pub fn hash_params(&self) -> &QueryParams {
        &self.hash
    }

    pub fn hash_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.hash.iter()
    }

    /// Serialized hash parameters, without a leading `?`
    pub fn to_string_hash(&self) -> String {
        self.hash.serialize()
    }

    // Hash path

    /// The fragment before its first `?`, e.g. `#/section`
    pub fn hash_path(&self) -> &str {
        &self.hash_path
    }

    /// Set the hash path; a missing leading `#` is added.
    ///
    /// A `?` would start the hash parameters, so it is stored as `%3F`.
    pub fn set_hash(&mut self, fragment: &str) {
        let path = normalize_hash_path(fragment);
        self.hash_path = if memchr::memchr(b'?', path.as_bytes()).is_some() {
            path.replace('?', "%3F")
        } else {
            path.into_owned()
        };
    }

    /// Clear the hash path; hash parameters are kept
    pub fn remove_hash(&mut self) {
        self.hash_path.clear();
    }

    /// The whole fragment: hash path plus `?` and the hash parameters.
    ///
    /// With hash parameters but no hash path the fragment is `#?...` so the
    /// parameters still land in the fragment.
    pub fn hash_fragment(&self) -> String {
        let params = self.hash.serialize();
        let mut fragment = String::with_capacity(self.hash_path.len() + params.len() + 2);
        fragment.push_str(&self.hash_path);
        if !params.is_empty() {
            if fragment.is_empty() {
                fragment.push('#');
            }
            fragment.push('?');
            fragment.push_str(&params);
        }
        fragment
    }

    /// Assemble `pathname`, the search parameters and the fragment into one
    /// relative address.
    pub fn to_href(&self, pathname: &str) -> String {
        let search = self.search.serialize();
        let fragment = self.hash_fragment();
        let mut href = String::with_capacity(pathname.len() + search.len() + fragment.len() + 1);
        href.push_str(pathname);
        if !search.is_empty() {
            href.push('?');
            href.push_str(&search);
        }
        href.push_str(&fragment);
        href
    }

    /// Write the store into the address bar with a silent history replacement.
    ///
    /// Listeners are not notified; [`Navigator`](crate::Navigator) owns
    /// notification.
    pub fn apply<P>(&self, platform: &P) -> Result<()>
    where
        P: Location + History + ?Sized,
    {
        let href = self.to_href(&platform.pathname());
        platform.replace_state(&href)
    }
}

fn append_entries<I, K, V>(params: &mut QueryParams, entries: I)
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: ToString,
{
    for (key, value) in entries {
        params.append(key.as_ref(), &value.to_string());
    }
}

fn update_entries<I, K, V>(params: &mut QueryParams, entries: I)
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: AsRef<str>,
    V: ToString,
{
    for (key, value) in entries {
        match value {
            Some(value) => params.set(key.as_ref(), &value.to_string()),
            None => params.delete(key.as_ref()),
        }
    }
}
