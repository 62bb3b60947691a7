//! The address and history surfaces a [`Navigator`](crate::Navigator) drives.
//!
//! A browser binding implements both traits over `window.location` and
//! `window.history`; [`memory::MemoryPlatform`] keeps a session history in
//! memory for tests and non-browser hosts.

pub mod memory;

use crate::compat::{Rc, String};
use crate::error::Result;

/// Callback fired when the history position changes through back/forward
/// navigation.
pub type PopStateHandler = Rc<dyn Fn() -> Result<()>>;

/// Read and hard-navigate the current address
pub trait Location {
    /// Path of the current address, e.g. `/list`
    fn pathname(&self) -> String;

    /// Query of the current address including its `?`, or empty
    fn search(&self) -> String;

    /// Fragment of the current address including its `#`, or empty
    fn hash(&self) -> String;

    /// Navigate to `url`, reloading the document and pushing a history entry
    fn assign(&self, url: &str) -> Result<()>;

    /// Navigate to `url`, reloading the document without a history entry
    /// for the current address
    fn replace(&self, url: &str) -> Result<()>;
}

/// Session history without document reloads
pub trait History {
    /// Insert a history entry for `url` after the current one
    fn push_state(&self, url: &str) -> Result<()>;

    /// Replace the current history entry with `url`
    fn replace_state(&self, url: &str) -> Result<()>;

    /// Step the history stack by `delta` entries
    fn go(&self, delta: i32);

    /// Register `handler` for back/forward navigation
    fn subscribe_pop_state(&self, handler: PopStateHandler);
}

/// Both surfaces of a host environment
pub trait Platform: Location + History {}

impl<T: Location + History + ?Sized> Platform for T {}
