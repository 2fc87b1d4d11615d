//! Persisted snapshots and their expiry stamps

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use statdx_core::{DataSet, Flow, Structure};
use std::time::Duration;

/// Generic persisted snapshot
///
/// One shape backs every cached result: a flow list, a single flow, a
/// structure or a data set. Unused parts stay empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Envelope {
    pub flows: Vec<Flow>,
    pub structures: Vec<Structure>,
    pub data_sets: Vec<DataSet>,
}

impl Envelope {
    pub fn of_flows(flows: Vec<Flow>) -> Self {
        Self {
            flows,
            ..Self::default()
        }
    }

    pub fn of_structure(structure: Structure) -> Self {
        Self {
            structures: vec![structure],
            ..Self::default()
        }
    }

    pub fn of_data_set(data_set: DataSet) -> Self {
        Self {
            data_sets: vec![data_set],
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty() && self.structures.is_empty() && self.data_sets.is_empty()
    }
}

/// An envelope stamped with its write instant and time-to-live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub envelope: Envelope,
    pub created_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl CacheEntry {
    pub fn new(envelope: Envelope, created_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            envelope,
            created_at,
            ttl,
        }
    }

    /// Last instant at which the entry is still live
    pub fn expires_at(&self) -> DateTime<Utc> {
        chrono::Duration::from_std(self.ttl)
            .ok()
            .and_then(|ttl| self.created_at.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// An entry is absent once `now > created_at + ttl`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_boundary() {
        let created_at = DateTime::<Utc>::UNIX_EPOCH;
        let entry = CacheEntry::new(Envelope::default(), created_at, Duration::from_secs(60));

        assert!(!entry.is_expired(created_at));
        assert!(!entry.is_expired(created_at + chrono::Duration::seconds(60)));
        assert!(entry.is_expired(created_at + chrono::Duration::milliseconds(60_001)));
    }

    #[test]
    fn test_huge_ttl_never_overflows() {
        let entry = CacheEntry::new(Envelope::default(), Utc::now(), Duration::MAX);
        assert_eq!(entry.expires_at(), DateTime::<Utc>::MAX_UTC);
        assert!(!entry.is_expired(Utc::now()));
    }

    #[test]
    fn test_envelope_constructors() {
        assert!(Envelope::default().is_empty());
        let flow = Flow {
            flow_ref: statdx_core::FlowRef::new("ECB", "EXR", "1.0"),
            structure_ref: statdx_core::StructRef::new("ECB", "ECB_EXR1", "1.0"),
            name: "Exchange rates".to_string(),
            description: None,
        };
        let envelope = Envelope::of_flows(vec![flow]);
        assert_eq!(envelope.flows.len(), 1);
        assert!(envelope.structures.is_empty());
        assert!(!envelope.is_empty());
    }
}
