//! Domain types of the statistical data exchange model

mod detail;
mod key;
mod model;
mod refs;

pub use detail::Detail;
pub use key::{Key, Selector};
pub use model::{DataQuery, DataSet, Dimension, Flow, Obs, Series, Structure};
pub use refs::{FlowRef, StructRef, ALL_AGENCIES, LATEST_VERSION};
