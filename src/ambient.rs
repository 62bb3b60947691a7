//! A swappable default [`Navigator`] for call sites that do not carry one.
//!
//! Nothing is installed implicitly: a host installs its navigator once and
//! every function here forwards to it. All callers on the thread share the
//! same parameter namespace.
//!
//! ```
//! use std::rc::Rc;
//!
//! use hashq::platform::memory::MemoryPlatform;
//! use hashq::{Navigator, ambient};
//!
//! let platform = Rc::new(MemoryPlatform::new("https://app.test/?page=1").unwrap());
//! ambient::install(Rc::new(Navigator::new(platform.clone())));
//!
//! assert_eq!(ambient::get("page").unwrap(), Some("1".to_string()));
//! ambient::update([("page", Some(2))]).unwrap();
//! assert_eq!(platform.href(), "https://app.test/?page=2");
//! # ambient::uninstall();
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::string::{String, ToString};
use std::vec::Vec;

use crate::error::{Error, Result};
use crate::navigator::Navigator;
use crate::store::ParameterStore;

thread_local! {
    static AMBIENT: RefCell<Option<Rc<Navigator>>> = const { RefCell::new(None) };
}

/// Install `navigator` as the default, returning the previous one
pub fn install(navigator: Rc<Navigator>) -> Option<Rc<Navigator>> {
    AMBIENT.with(|slot| slot.borrow_mut().replace(navigator))
}

/// Remove the default navigator, returning it
pub fn uninstall() -> Option<Rc<Navigator>> {
    AMBIENT.with(|slot| slot.borrow_mut().take())
}

/// The installed default navigator
pub fn current() -> Result<Rc<Navigator>> {
    AMBIENT
        .with(|slot| slot.borrow().clone())
        .ok_or(Error::NoAmbientNavigator)
}

fn read<T>(f: impl FnOnce(&ParameterStore) -> T) -> Result<T> {
    let navigator = current()?;
    let store = navigator.params();
    Ok(f(&*store))
}

fn write(f: impl FnOnce(&mut ParameterStore)) -> Result<()> {
    let navigator = current()?;
    {
        let mut store = navigator.params_mut();
        f(&mut *store);
    }
    navigator.apply()
}

// Navigation

pub fn go(delta: i32) -> Result<()> {
    current()?.go(delta);
    Ok(())
}

pub fn go_forward() -> Result<()> {
    go(1)
}

pub fn go_back() -> Result<()> {
    go(-1)
}

pub fn navigate_to(url: &str, replace: bool) -> Result<()> {
    current()?.navigate_to(url, replace)
}

/// Push through the default navigator, notifying its listeners
pub fn push(url: &str) -> Result<()> {
    current()?.push(url)
}

/// Replace through the default navigator, notifying its listeners
pub fn replace(url: &str) -> Result<()> {
    current()?.replace(url)
}

// Parameters. Reads return owned values; writes apply to the address
// silently.

pub fn get(key: &str) -> Result<Option<String>> {
    read(|store| store.get(key).map(ToString::to_string))
}

pub fn get_all(key: &str) -> Result<Vec<String>> {
    read(|store| store.get_all(key).into_iter().map(ToString::to_string).collect())
}

pub fn get_from_hash(key: &str) -> Result<Option<String>> {
    read(|store| store.get_from_hash(key).map(ToString::to_string))
}

pub fn get_all_from_hash(key: &str) -> Result<Vec<String>> {
    read(|store| {
        store
            .get_all_from_hash(key)
            .into_iter()
            .map(ToString::to_string)
            .collect()
    })
}

pub fn hash() -> Result<String> {
    read(|store| store.hash_path().to_string())
}

pub fn add<I, K, V>(entries: I) -> Result<()>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: ToString,
{
    write(|store| store.add(entries))
}

pub fn add_to_hash<I, K, V>(entries: I) -> Result<()>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: ToString,
{
    write(|store| store.add_to_hash(entries))
}

pub fn update<I, K, V>(entries: I) -> Result<()>
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: AsRef<str>,
    V: ToString,
{
    write(|store| store.update(entries))
}

pub fn update_in_hash<I, K, V>(entries: I) -> Result<()>
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: AsRef<str>,
    V: ToString,
{
    write(|store| store.update_in_hash(entries))
}

pub fn remove<I, K>(keys: I) -> Result<()>
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    write(|store| store.remove(keys))
}

pub fn remove_from_hash<I, K>(keys: I) -> Result<()>
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    write(|store| store.remove_from_hash(keys))
}

pub fn remove_all() -> Result<()> {
    write(ParameterStore::remove_all)
}

pub fn remove_all_from_hash() -> Result<()> {
    write(ParameterStore::remove_all_from_hash)
}

pub fn set_hash(fragment: &str) -> Result<()> {
    write(|store| store.set_hash(fragment))
}

pub fn remove_hash() -> Result<()> {
    write(ParameterStore::remove_hash)
}
