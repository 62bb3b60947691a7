#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Compatibility layer for std/no_std
mod compat;

// Internal modules (not public API)
mod error;
mod helpers;
mod listeners;
mod navigator;
mod query_params;
mod store;

// Public modules
#[cfg(feature = "std")]
pub mod ambient;
pub mod builder;
pub mod encoding;
pub mod nested;
pub mod paths;
pub mod platform;
pub mod utm;
pub mod validators;

// Public API
pub use error::{Error, Result};
pub use listeners::{Listener, ListenerRegistry, listener};
pub use navigator::Navigator;
pub use nested::{ParamMap, ParamValue};
pub use query_params::QueryParams;
pub use store::ParameterStore;
