//! Core domain types, errors and collaborator traits for `statdx`.
//!
//! ## Key Components
//!
//! - **`types`**: keys with their containment order, response details,
//!   artefact references, flows, structures and data sets.
//! - **`fetch`**: the [`Fetcher`] trait implemented by source drivers.
//! - **`errors`**: the shared [`Error`] enum and [`Result`] alias.
//! - **`clock`**, **`events`**, **`config`**: the injectable time source,
//!   diagnostic listener and string-keyed properties used by the cache.

pub mod clock;
pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod fetch;
pub mod types;

pub use self::{
    clock::{Clock, ManualClock, SystemClock},
    config::Properties,
    errors::{Error, Result},
    events::{EventListener, NoopListener, TracingListener},
    fetch::{FetchStrategy, Fetcher},
    types::*,
};
