use core::cell::{OnceCell, Ref, RefCell, RefMut};

use url::Url;

use crate::builder;
use crate::compat::{Rc, String, ToString};
use crate::error::Result;
use crate::listeners::{Listener, ListenerRegistry};
use crate::platform::Platform;
use crate::store::ParameterStore;

/// Navigation over a [`Platform`] with a listener registry and a
/// [`ParameterStore`].
///
/// `push`, `replace` and the parameter shortcuts notify listeners before they
/// return. Back/forward navigation notifies them through the platform's
/// pop-state subscription, made once when the navigator is built. Hard
/// navigations (`navigate_to`, `redirect_to`) and `go` do not notify.
///
/// Once the store has been read, every navigation that lands re-reads it from
/// the new address before listeners run, so the shortcuts always build on the
/// live query and fragment.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use hashq::platform::memory::MemoryPlatform;
/// use hashq::{Navigator, listener};
///
/// let platform = Rc::new(MemoryPlatform::new("https://app.test/list").unwrap());
/// let navigator = Navigator::new(platform.clone());
///
/// let seen = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&seen);
/// navigator.add_listener(listener(move || { counter.set(counter.get() + 1); Ok(()) }), false);
///
/// navigator.add_query_params([("page", 2)]).unwrap();
/// assert_eq!(platform.href(), "https://app.test/list?page=2");
/// assert_eq!(seen.get(), 1);
/// ```
pub struct Navigator {
    platform: Rc<dyn Platform>,
    store: Rc<OnceCell<RefCell<ParameterStore>>>,
    listeners: Rc<ListenerRegistry>,
}

/// Replace an already-read store with the platform's current address.
/// An unread store stays unread; it is filled from the address on first use.
fn resync(platform: &dyn Platform, store: &OnceCell<RefCell<ParameterStore>>) {
    let Some(cell) = store.get() else {
        return;
    };
    match cell.try_borrow_mut() {
        Ok(mut current) => *current = ParameterStore::from_location(platform),
        Err(_) => tracing::warn!("parameter store is borrowed, skipping resync"),
    }
}

impl Navigator {
    /// Wrap `platform`. The parameter store is read from the platform address
    /// the first time it is used.
    pub fn new(platform: Rc<dyn Platform>) -> Self {
        Self::build(platform, OnceCell::new())
    }

    /// Wrap `platform` with a store built from explicit search and hash strings
    pub fn with_params(platform: Rc<dyn Platform>, search: &str, hash: &str) -> Self {
        Self::with_store(platform, ParameterStore::new(search, hash))
    }

    /// Wrap `platform` with an existing store
    pub fn with_store(platform: Rc<dyn Platform>, store: ParameterStore) -> Self {
        Self::build(platform, OnceCell::from(RefCell::new(store)))
    }

    fn build(platform: Rc<dyn Platform>, store: OnceCell<RefCell<ParameterStore>>) -> Self {
        let store = Rc::new(store);
        let listeners = Rc::new(ListenerRegistry::new());

        // The platform owns the handler, so it only holds weak references.
        let weak_platform = Rc::downgrade(&platform);
        let weak_store = Rc::downgrade(&store);
        let registry = Rc::downgrade(&listeners);
        platform.subscribe_pop_state(Rc::new(move || {
            if let (Some(platform), Some(store)) = (weak_platform.upgrade(), weak_store.upgrade()) {
                resync(&*platform, &store);
            }
            match registry.upgrade() {
                Some(registry) => registry.trigger(),
                None => Ok(()),
            }
        }));
        Self {
            platform,
            store,
            listeners,
        }
    }

    /// The platform this navigator drives
    pub fn platform(&self) -> &Rc<dyn Platform> {
        &self.platform
    }

    fn store(&self) -> &RefCell<ParameterStore> {
        self.store
            .get_or_init(|| RefCell::new(ParameterStore::from_location(&*self.platform)))
    }

    /// Borrow the parameter store
    pub fn params(&self) -> Ref<'_, ParameterStore> {
        self.store().borrow()
    }

    /// Borrow the parameter store mutably. Changes reach the address on
    /// [`apply`](Self::apply) or the next navigation built from the store.
    pub fn params_mut(&self) -> RefMut<'_, ParameterStore> {
        self.store().borrow_mut()
    }

    /// Re-read the parameter store from the current platform address
    pub fn sync_from_location(&self) {
        let fresh = ParameterStore::from_location(&*self.platform);
        *self.params_mut() = fresh;
    }

    /// The store assembled onto the current path
    pub fn href(&self) -> String {
        let pathname = self.platform.pathname();
        self.params().to_href(&pathname)
    }

    /// Write the store into the address without notifying listeners
    pub fn apply(&self) -> Result<()> {
        self.params().apply(&*self.platform)
    }

    fn resync(&self) {
        resync(&*self.platform, &self.store);
    }

    // History stepping

    /// Step the history by `delta` entries. Listeners run when the step lands.
    pub fn go(&self, delta: i32) {
        tracing::debug!(delta, "history go");
        self.platform.go(delta);
    }

    /// Step one entry forward
    pub fn go_forward(&self) {
        self.go(1);
    }

    /// Step one entry back
    pub fn go_back(&self) {
        self.go(-1);
    }

    // Navigation

    /// Hard navigation. With `replace` the current address leaves no history
    /// entry behind.
    pub fn navigate_to(&self, url: &str, replace: bool) -> Result<()> {
        tracing::debug!(url, replace, "navigate");
        if replace {
            self.platform.replace(url)?;
        } else {
            self.platform.assign(url)?;
        }
        self.resync();
        Ok(())
    }

    /// Insert a history entry without reloading, then notify listeners
    pub fn push(&self, url: &str) -> Result<()> {
        tracing::debug!(url, "push");
        self.platform.push_state(url)?;
        self.resync();
        self.listeners.trigger()
    }

    /// Replace the current history entry without reloading, then notify
    /// listeners
    pub fn replace(&self, url: &str) -> Result<()> {
        tracing::debug!(url, "replace");
        self.platform.replace_state(url)?;
        self.resync();
        self.listeners.trigger()
    }

    /// Hard-replace the address with `base_url`, optionally carrying over the
    /// store's search parameters and fragment. An empty store value removes
    /// the component from `base_url`.
    pub fn redirect_to(
        &self,
        base_url: &str,
        preserve_search: bool,
        preserve_hash: bool,
    ) -> Result<()> {
        let mut url = Url::parse(base_url)?;
        {
            let store = self.params();
            if preserve_search {
                let search = store.to_string_search();
                url.set_query((!search.is_empty()).then_some(search.as_str()));
            }
            if preserve_hash {
                let fragment = store.hash_fragment();
                let fragment = fragment.strip_prefix('#').unwrap_or(&fragment);
                url.set_fragment((!fragment.is_empty()).then_some(fragment));
            }
        }
        tracing::debug!(url = url.as_str(), "redirect");
        self.platform.replace(url.as_str())?;
        self.resync();
        Ok(())
    }

    // Navigation to a built address

    /// Hard navigation to `base_url` with `params` appended to its query and
    /// the fragment replaced by `hash` when given. Pushes a history entry.
    pub fn redirect_with_params<I, K, V>(
        &self,
        base_url: &str,
        params: I,
        hash: Option<&str>,
    ) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToString,
    {
        let url = builder::with_params(base_url, params, hash)?;
        self.navigate_to(&url, false)
    }

    /// [`push`](Self::push) the address built from `base_url`, `params` and
    /// `hash`
    pub fn push_with_params<I, K, V>(
        &self,
        base_url: &str,
        params: I,
        hash: Option<&str>,
    ) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToString,
    {
        let url = builder::with_params(base_url, params, hash)?;
        self.push(&url)
    }

    /// [`replace`](Self::replace) with the address built from `base_url`,
    /// `params` and `hash`
    pub fn replace_with_params<I, K, V>(
        &self,
        base_url: &str,
        params: I,
        hash: Option<&str>,
    ) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToString,
    {
        let url = builder::with_params(base_url, params, hash)?;
        self.replace(&url)
    }

    // Parameter shortcuts

    /// Append search parameters, then [`replace`](Self::replace)
    pub fn add_query_params<I, K, V>(&self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToString,
    {
        self.params_mut().add(entries);
        self.replace_with_store()
    }

    /// Delete search parameters, then [`replace`](Self::replace)
    pub fn remove_query_params<I, K>(&self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        self.params_mut().remove(keys);
        self.replace_with_store()
    }

    /// Set the hash path, then [`replace`](Self::replace)
    pub fn set_hash(&self, fragment: &str) -> Result<()> {
        self.params_mut().set_hash(fragment);
        self.replace_with_store()
    }

    /// Drop the whole fragment, hash parameters included, then
    /// [`replace`](Self::replace)
    pub fn clear_hash(&self) -> Result<()> {
        {
            let mut store = self.params_mut();
            store.remove_hash();
            store.remove_all_from_hash();
        }
        self.replace_with_store()
    }

    fn replace_with_store(&self) -> Result<()> {
        let href = self.href();
        self.replace(&href)
    }

    // Listeners

    /// Register `listener`; a `once` listener is dropped after it first runs
    pub fn add_listener(&self, listener: Listener, once: bool) {
        self.listeners.add(listener, once);
    }

    /// Remove every registration of `listener`; returns how many were removed
    pub fn remove_listener(&self, listener: &Listener) -> usize {
        self.listeners.remove(listener)
    }

    /// Drop every registered listener
    pub fn remove_all_listeners(&self) {
        self.listeners.clear();
    }

    /// Number of registered listeners, `once` entries included
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl core::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Navigator")
            .field("store", &self.store.get())
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::platform::memory::MemoryPlatform;
    use crate::platform::History;

    fn setup(initial: &str) -> (Rc<MemoryPlatform>, Navigator) {
        let platform = Rc::new(MemoryPlatform::new(initial).unwrap());
        let navigator = Navigator::new(platform.clone());
        (platform, navigator)
    }

    #[test]
    fn test_store_is_read_lazily() {
        let (platform, navigator) = setup("https://app.test/p?a=1#h?x=2");
        platform.replace_state("/p?a=5").unwrap();
        assert_eq!(navigator.params().get("a"), Some("5"));
        platform.replace_state("/p?a=6").unwrap();
        assert_eq!(navigator.params().get("a"), Some("5"));
        navigator.sync_from_location();
        assert_eq!(navigator.params().get("a"), Some("6"));
    }

    #[test]
    fn test_apply_is_silent() {
        let (platform, navigator) = setup("https://app.test/p");
        navigator.add_listener(
            crate::listeners::listener(|| Err(crate::Error::listener("no"))),
            false,
        );
        navigator.params_mut().add([("k", "v")]);
        navigator.apply().unwrap();
        assert_eq!(platform.href(), "https://app.test/p?k=v");
    }

    #[test]
    fn test_redirect_rejects_invalid_url() {
        let (platform, navigator) = setup("https://app.test/p");
        assert_eq!(
            navigator.redirect_to("not a url", true, true),
            Err(crate::Error::InvalidUrl)
        );
        assert_eq!(platform.document_loads(), 1);
    }

    #[test]
    fn test_href_uses_current_path() {
        let navigator = Navigator::with_params(
            Rc::new(MemoryPlatform::new("https://app.test/here").unwrap()),
            "a=1",
            "#tab",
        );
        assert_eq!(navigator.href(), "/here?a=1#tab");
    }
}
