use core::cell::RefCell;

use url::Url;

use super::{History, Location, PopStateHandler};
use crate::compat::{String, ToString, Vec, format};
use crate::error::{Error, Result};

/// Session history kept in memory.
///
/// Mirrors the browser model closely enough for tests and non-browser hosts:
/// relative addresses resolve against the current entry, `push_state` drops
/// forward entries, soft navigation refuses to leave the current origin, and
/// a landed `go` step fires every pop-state handler synchronously.
///
/// # Examples
///
/// ```
/// use hashq::platform::{History, Location, memory::MemoryPlatform};
///
/// let platform = MemoryPlatform::new("https://app.test/list?page=1").unwrap();
/// platform.push_state("/detail#top").unwrap();
/// assert_eq!(platform.pathname(), "/detail");
/// assert_eq!(platform.hash(), "#top");
///
/// platform.go(-1);
/// assert_eq!(platform.search(), "?page=1");
/// ```
#[derive(Default)]
pub struct MemoryPlatform {
    session: RefCell<Session>,
    handlers: RefCell<Vec<PopStateHandler>>,
    pop_state_errors: RefCell<Vec<Error>>,
}

#[derive(Debug, Default)]
struct Session {
    entries: Vec<Url>,
    index: usize,
    document_loads: usize,
}

impl Session {
    fn current(&self) -> Option<&Url> {
        self.entries.get(self.index)
    }

    fn resolve(&self, url: &str) -> Result<Url> {
        match self.current() {
            Some(current) => Ok(current.join(url)?),
            None => Ok(Url::parse(url)?),
        }
    }

    fn resolve_same_origin(&self, url: &str) -> Result<Url> {
        let target = self.resolve(url)?;
        match self.current() {
            Some(current) if current.origin() != target.origin() => Err(Error::CrossOrigin),
            _ => Ok(target),
        }
    }

    fn push(&mut self, url: Url) {
        if self.entries.is_empty() {
            self.entries.push(url);
            self.index = 0;
            return;
        }
        self.entries.truncate(self.index + 1);
        self.entries.push(url);
        self.index = self.entries.len() - 1;
    }

    fn replace(&mut self, url: Url) {
        match self.entries.get_mut(self.index) {
            Some(slot) => *slot = url,
            None => self.push(url),
        }
    }
}

impl MemoryPlatform {
    /// Start a session at the absolute address `initial`
    pub fn new(initial: &str) -> Result<Self> {
        let url = Url::parse(initial)?;
        let platform = Self::default();
        {
            let mut session = platform.session.borrow_mut();
            session.push(url);
            session.document_loads = 1;
        }
        Ok(platform)
    }

    /// The current absolute address
    pub fn href(&self) -> String {
        self.session
            .borrow()
            .current()
            .map(|url| url.as_str().to_string())
            .unwrap_or_default()
    }

    /// Number of entries in the session history
    pub fn history_len(&self) -> usize {
        self.session.borrow().entries.len()
    }

    /// Position of the current entry
    pub fn history_index(&self) -> usize {
        self.session.borrow().index
    }

    /// Count of document loads, including the initial one
    pub fn document_loads(&self) -> usize {
        self.session.borrow().document_loads
    }

    /// Errors returned by pop-state handlers since the last call
    pub fn take_pop_state_errors(&self) -> Vec<Error> {
        core::mem::take(&mut *self.pop_state_errors.borrow_mut())
    }

    fn with_current<T>(&self, f: impl FnOnce(&Url) -> T) -> Option<T> {
        self.session.borrow().current().map(f)
    }

    fn fire_pop_state(&self) {
        // Handlers may navigate again, so no borrow is held while they run.
        let handlers: Vec<PopStateHandler> = self.handlers.borrow().clone();
        for handler in handlers {
            if let Err(err) = handler() {
                tracing::warn!(error = %err, "pop-state handler failed");
                self.pop_state_errors.borrow_mut().push(err);
            }
        }
    }
}

impl Location for MemoryPlatform {
    fn pathname(&self) -> String {
        self.with_current(|url| url.path().to_string())
            .unwrap_or_default()
    }

    fn search(&self) -> String {
        self.with_current(|url| match url.query() {
            Some(query) if !query.is_empty() => format!("?{query}"),
            _ => String::new(),
        })
        .unwrap_or_default()
    }

    fn hash(&self) -> String {
        self.with_current(|url| match url.fragment() {
            Some(fragment) if !fragment.is_empty() => format!("#{fragment}"),
            _ => String::new(),
        })
        .unwrap_or_default()
    }

    fn assign(&self, url: &str) -> Result<()> {
        let mut session = self.session.borrow_mut();
        let target = session.resolve(url)?;
        session.push(target);
        session.document_loads += 1;
        Ok(())
    }

    fn replace(&self, url: &str) -> Result<()> {
        let mut session = self.session.borrow_mut();
        let target = session.resolve(url)?;
        session.replace(target);
        session.document_loads += 1;
        Ok(())
    }
}

impl History for MemoryPlatform {
    fn push_state(&self, url: &str) -> Result<()> {
        let mut session = self.session.borrow_mut();
        let target = session.resolve_same_origin(url)?;
        session.push(target);
        Ok(())
    }

    fn replace_state(&self, url: &str) -> Result<()> {
        let mut session = self.session.borrow_mut();
        let target = session.resolve_same_origin(url)?;
        session.replace(target);
        Ok(())
    }

    fn go(&self, delta: i32) {
        {
            let mut session = self.session.borrow_mut();
            if delta == 0 {
                session.document_loads += 1;
                return;
            }
            let target = session.index as i64 + i64::from(delta);
            if target < 0 || target >= session.entries.len() as i64 {
                tracing::debug!(delta, "history step out of range, ignoring");
                return;
            }
            session.index = target as usize;
        }
        self.fire_pop_state();
    }

    fn subscribe_pop_state(&self, handler: PopStateHandler) {
        self.handlers.borrow_mut().push(handler);
    }
}
