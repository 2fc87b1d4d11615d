//! Shared utilities for statdx
//!
//! Filesystem helpers used by persistence code and the tracing setup
//! shared by binaries and tests.

pub mod file_lock;
pub mod logging;
pub mod paths;

pub use file_lock::{LockMode, LockedFile};
pub use paths::default_cache_dir;
