//! Shared helpers for statdx-cache integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use parking_lot::Mutex;
use statdx_core::{
    Detail, Dimension, Error, EventListener, FetchStrategy, Fetcher, Flow, FlowRef, Key, Obs,
    Result, Series, StructRef, Structure,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub const SERIES_KEYS: [&str; 4] = [
    "M.BE.INDUSTRY",
    "M.FR.INDUSTRY",
    "M.BE.SERVICES",
    "A.BE.INDUSTRY",
];

pub fn key(text: &str) -> Key {
    Key::parse(text).unwrap()
}

pub fn flow_ref() -> FlowRef {
    FlowRef::new("STATDX", "PRODUCTION", "1.0")
}

pub fn struct_ref() -> StructRef {
    StructRef::new("STATDX", "PRODUCTION_DSD", "1.0")
}

pub fn flow() -> Flow {
    Flow {
        flow_ref: flow_ref(),
        structure_ref: struct_ref(),
        name: "Industrial production".to_string(),
        description: None,
    }
}

pub fn structure() -> Structure {
    let dimension = |id: &str, codes: &[&str]| Dimension {
        id: id.to_string(),
        label: id.to_lowercase(),
        codes: codes
            .iter()
            .map(|c| (c.to_string(), c.to_lowercase()))
            .collect::<BTreeMap<_, _>>(),
    };
    Structure {
        struct_ref: struct_ref(),
        label: "Production".to_string(),
        dimensions: vec![
            dimension("FREQ", &["A", "M"]),
            dimension("REF_AREA", &["BE", "FR"]),
            dimension("SECTOR", &["INDUSTRY", "SERVICES"]),
        ],
        attributes: vec!["TITLE".to_string()],
        time_dimension_id: "TIME_PERIOD".to_string(),
        primary_measure_id: "OBS_VALUE".to_string(),
    }
}

/// A full series with two observations and a title
pub fn series(text: &str) -> Series {
    let mut series = Series::new(key(text));
    for (month, value) in [(1, 101.5), (2, 99.25)] {
        series.obs.push(Obs {
            period: NaiveDate::from_ymd_opt(2024, month, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            value,
        });
    }
    series
        .meta
        .insert("TITLE".to_string(), format!("Production {text}"));
    series
}

/// A fetch collaborator over [`SERIES_KEYS`] that counts its calls
#[derive(Debug)]
pub struct CountingFetcher {
    strategy: FetchStrategy,
    data_calls: AtomicUsize,
    metadata_calls: AtomicUsize,
    failing: AtomicBool,
    requests: Mutex<Vec<(Key, Detail)>>,
}

impl CountingFetcher {
    pub fn new(strategy: FetchStrategy) -> Self {
        Self {
            strategy,
            data_calls: AtomicUsize::new(0),
            metadata_calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A remote-like source, filtering server-side
    pub fn exact() -> Self {
        Self::new(FetchStrategy::Exact)
    }

    /// A file-like source, decoding everything anyway
    pub fn widest() -> Self {
        Self::new(FetchStrategy::Widest)
    }

    pub fn data_calls(&self) -> usize {
        self.data_calls.load(Ordering::SeqCst)
    }

    pub fn metadata_calls(&self) -> usize {
        self.metadata_calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<(Key, Detail)> {
        self.requests.lock().clone()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(Error::transport("https://data.example.org", "connection reset"))
        } else {
            Ok(())
        }
    }
}

impl Fetcher for CountingFetcher {
    fn fetch_flows(&self) -> Result<Vec<Flow>> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(vec![flow()])
    }

    fn fetch_flow(&self, flow_ref: &FlowRef) -> Result<Flow> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        if *flow_ref == self::flow_ref() {
            Ok(flow())
        } else {
            Err(Error::not_found("flow", flow_ref))
        }
    }

    fn fetch_structure(&self, struct_ref: &StructRef) -> Result<Structure> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        if *struct_ref == self::struct_ref() {
            Ok(structure())
        } else {
            Err(Error::not_found("structure", struct_ref))
        }
    }

    fn fetch_data(&self, _flow_ref: &FlowRef, key: &Key, detail: Detail) -> Result<Vec<Series>> {
        self.data_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push((key.clone(), detail));
        self.check()?;
        let mut data = Vec::new();
        if detail.requests_series() {
            for text in SERIES_KEYS {
                let series = series(text);
                if key.contains(&series.key)? {
                    data.push(series.with_detail(detail));
                }
            }
        }
        Ok(data)
    }

    fn fetch_strategy(&self) -> FetchStrategy {
        self.strategy
    }
}

/// Records every notification it receives
#[derive(Debug, Default)]
pub struct RecordingListener {
    events: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingListener {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().clone()
    }

    pub fn count(&self, message: &str) -> usize {
        self.events.lock().iter().filter(|m| *m == message).count()
    }
}

impl EventListener for RecordingListener {
    fn on_event(&self, _source: &str, message: &str) {
        self.events.lock().push(message.to_string());
    }

    fn on_error(&self, _source: &str, message: &str, error: &dyn std::error::Error) {
        self.errors.lock().push(format!("{message}: {error}"));
    }
}
