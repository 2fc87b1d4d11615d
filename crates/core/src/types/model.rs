//! Flows, structures and data sets returned by fetch collaborators

use super::{Detail, FlowRef, Key, StructRef};
use crate::errors::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A dataflow: a named view over a data structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flow {
    pub flow_ref: FlowRef,
    pub structure_ref: StructRef,
    pub name: String,
    pub description: Option<String>,
}

/// A coded dimension of a data structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub id: String,
    pub label: String,
    /// Allowed codes and their labels
    pub codes: BTreeMap<String, String>,
}

/// A data structure definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Structure {
    pub struct_ref: StructRef,
    pub label: String,
    /// Key dimensions, in key order
    pub dimensions: Vec<Dimension>,
    pub attributes: Vec<String>,
    pub time_dimension_id: String,
    pub primary_measure_id: String,
}

/// A single observation
///
/// A missing value is `NaN`. It is written as `null` and reads back as
/// `NaN`, and two missing values compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obs {
    pub period: NaiveDateTime,
    #[serde(with = "obs_value")]
    pub value: f64,
}

impl PartialEq for Obs {
    fn eq(&self, other: &Self) -> bool {
        self.period == other.period
            && (self.value == other.value || (self.value.is_nan() && other.value.is_nan()))
    }
}

mod obs_value {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_none()
        } else {
            serializer.serialize_some(value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

/// A time series identified by a series key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub key: Key,
    pub obs: Vec<Obs>,
    /// Series-level attributes
    pub meta: BTreeMap<String, String>,
}

impl Series {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            obs: Vec::new(),
            meta: BTreeMap::new(),
        }
    }

    /// Strip what `detail` does not ask for
    pub fn with_detail(mut self, detail: Detail) -> Self {
        if !detail.requests_values() {
            self.obs.clear();
        }
        if !detail.requests_series_metadata() {
            self.meta.clear();
        }
        self
    }
}

/// A key filter paired with a response detail
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataQuery {
    pub key: Key,
    pub detail: Detail,
}

impl DataQuery {
    pub fn new(key: Key, detail: Detail) -> Self {
        Self { key, detail }
    }
}

impl Default for DataQuery {
    fn default() -> Self {
        Self::new(Key::ALL, Detail::Full)
    }
}

/// Series of one flow, tagged with the query that produced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    pub flow_ref: FlowRef,
    pub query: DataQuery,
    pub data: Vec<Series>,
}

impl DataSet {
    pub fn new(flow_ref: FlowRef, query: DataQuery, data: Vec<Series>) -> Self {
        Self {
            flow_ref,
            query,
            data,
        }
    }

    /// Narrow this data set to a query it contains
    ///
    /// Keeps the series whose key is matched by `query.key` and strips each
    /// of them down to `query.detail`. Fails if the key arities disagree.
    pub fn filter(&self, query: &DataQuery) -> Result<DataSet> {
        let mut data = Vec::new();
        if query.detail.requests_series() {
            for series in &self.data {
                if query.key.contains(&series.key)? {
                    data.push(series.clone().with_detail(query.detail));
                }
            }
        }
        Ok(DataSet::new(self.flow_ref.clone(), query.clone(), data))
    }
}
