//! The fetch collaborator boundary
//!
//! Drivers (REST clients, file readers) implement [`Fetcher`]; the caching
//! layer wraps any implementation without interpreting its errors.

use crate::errors::Result;
use crate::types::{Detail, Flow, FlowRef, Key, Series, StructRef, Structure};
use std::sync::Arc;

/// Which key a cache miss should actually request from a collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStrategy {
    /// Request exactly the key asked for. Suits sources whose cost grows
    /// with the breadth of the key, such as services filtering server-side.
    #[default]
    Exact,
    /// Request [`Key::ALL`]. Suits sources that decode everything anyway,
    /// such as local files parsed wholesale.
    Widest,
}

impl FetchStrategy {
    pub fn fetch_key(self, requested: &Key) -> Key {
        match self {
            FetchStrategy::Exact => requested.clone(),
            FetchStrategy::Widest => Key::ALL,
        }
    }
}

/// A source of flows, structures and series
pub trait Fetcher: Send + Sync {
    fn fetch_flows(&self) -> Result<Vec<Flow>>;

    fn fetch_flow(&self, flow_ref: &FlowRef) -> Result<Flow>;

    fn fetch_structure(&self, struct_ref: &StructRef) -> Result<Structure>;

    fn fetch_data(&self, flow_ref: &FlowRef, key: &Key, detail: Detail) -> Result<Vec<Series>>;

    /// How a cache should widen keys on a miss for this source
    fn fetch_strategy(&self) -> FetchStrategy {
        FetchStrategy::Exact
    }
}

impl<F: Fetcher + ?Sized> Fetcher for Arc<F> {
    fn fetch_flows(&self) -> Result<Vec<Flow>> {
        (**self).fetch_flows()
    }

    fn fetch_flow(&self, flow_ref: &FlowRef) -> Result<Flow> {
        (**self).fetch_flow(flow_ref)
    }

    fn fetch_structure(&self, struct_ref: &StructRef) -> Result<Structure> {
        (**self).fetch_structure(struct_ref)
    }

    fn fetch_data(&self, flow_ref: &FlowRef, key: &Key, detail: Detail) -> Result<Vec<Series>> {
        (**self).fetch_data(flow_ref, key, detail)
    }

    fn fetch_strategy(&self) -> FetchStrategy {
        (**self).fetch_strategy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_key() {
        let requested = Key::parse("M.BE.INDUSTRY").unwrap();
        assert_eq!(FetchStrategy::Exact.fetch_key(&requested), requested);
        assert_eq!(FetchStrategy::Widest.fetch_key(&requested), Key::ALL);
    }
}
