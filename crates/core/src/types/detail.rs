//! Response-richness levels of data requests

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// What a data response carries for each series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Detail {
    /// Series, observations and series metadata
    #[default]
    Full,
    /// Series and observations, no series metadata
    DataOnly,
    /// Series identities and metadata, no observations
    SeriesKeysOnly,
    /// Flow and structure only, no series at all
    NoData,
}

impl Detail {
    pub const ALL: [Detail; 4] = [
        Detail::Full,
        Detail::DataOnly,
        Detail::SeriesKeysOnly,
        Detail::NoData,
    ];

    /// Whether the response carries observation values
    pub fn requests_values(self) -> bool {
        matches!(self, Detail::Full | Detail::DataOnly)
    }

    /// Whether the response carries per-series metadata
    pub fn requests_series_metadata(self) -> bool {
        matches!(self, Detail::Full | Detail::SeriesKeysOnly)
    }

    /// Whether the response carries per-series entries at all
    pub fn requests_series(self) -> bool {
        !matches!(self, Detail::NoData)
    }

    /// Name of the cache slot able to serve this detail, if any
    ///
    /// Every detail without observation values shares the `keys` slot,
    /// which is filled at [`Detail::SeriesKeysOnly`].
    pub fn cache_category(self) -> Option<&'static str> {
        if self.requests_values() {
            None
        } else {
            Some("keys")
        }
    }

    /// The REST spelling of this detail
    pub fn as_str(self) -> &'static str {
        match self {
            Detail::Full => "full",
            Detail::DataOnly => "dataonly",
            Detail::SeriesKeysOnly => "serieskeysonly",
            Detail::NoData => "nodata",
        }
    }
}

impl Display for Detail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Detail {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', '-'], "");
        Detail::ALL
            .into_iter()
            .find(|detail| detail.as_str() == normalized)
            .ok_or_else(|| {
                Error::parse(
                    "detail",
                    s,
                    "expected one of full, dataonly, serieskeysonly, nodata",
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(Detail::Full.requests_values());
        assert!(Detail::DataOnly.requests_values());
        assert!(!Detail::SeriesKeysOnly.requests_values());
        assert!(!Detail::NoData.requests_values());

        assert!(Detail::Full.requests_series_metadata());
        assert!(!Detail::DataOnly.requests_series_metadata());
        assert!(Detail::SeriesKeysOnly.requests_series_metadata());
        assert!(!Detail::NoData.requests_series_metadata());
    }

    #[test]
    fn test_cache_category() {
        assert_eq!(Detail::Full.cache_category(), None);
        assert_eq!(Detail::DataOnly.cache_category(), None);
        assert_eq!(Detail::SeriesKeysOnly.cache_category(), Some("keys"));
        assert_eq!(Detail::NoData.cache_category(), Some("keys"));
    }

    #[test]
    fn test_parse() {
        assert_eq!("serieskeysonly".parse::<Detail>().unwrap(), Detail::SeriesKeysOnly);
        assert_eq!("SERIES_KEYS_ONLY".parse::<Detail>().unwrap(), Detail::SeriesKeysOnly);
        assert_eq!("NO_DATA".parse::<Detail>().unwrap(), Detail::NoData);
        assert_eq!("full".parse::<Detail>().unwrap(), Detail::Full);
        assert!("everything".parse::<Detail>().is_err());
        for detail in Detail::ALL {
            assert_eq!(detail.to_string().parse::<Detail>().unwrap(), detail);
        }
    }
}
