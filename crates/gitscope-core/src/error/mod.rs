//! Error types for gitscope
//!
//! Every fallible operation in the core crate returns [`GitScopeResult`].
//! Cache and context operations absorb environmental failures (disk I/O,
//! corrupt files) themselves; the errors that reach callers are programmer
//! errors such as an unknown category or a payload filed under the wrong
//! category.

mod constructors;
mod conversions;
mod types;

pub use types::{GitScopeError, GitScopeResult};
