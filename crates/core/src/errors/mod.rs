//! Error types for statdx operations

mod builders;
mod types;

pub use types::{Error, Result};
