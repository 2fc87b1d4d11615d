//! Maintainable-artefact references (`agency,id,version`)

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

pub const ALL_AGENCIES: &str = "all";
pub const LATEST_VERSION: &str = "latest";

fn split_reference<'a>(kind: &'static str, input: &'a str) -> Result<(&'a str, &'a str, &'a str)> {
    let parts: Vec<&str> = input.trim().split(',').map(str::trim).collect();
    let (agency, id, version) = match parts.as_slice() {
        [id] => (ALL_AGENCIES, *id, LATEST_VERSION),
        [agency, id] => (*agency, *id, LATEST_VERSION),
        [agency, id, version] => (*agency, *id, *version),
        _ => return Err(Error::parse(kind, input, "expected 'agency,id,version'")),
    };
    if id.is_empty() {
        return Err(Error::parse(kind, input, "missing id"));
    }
    let agency = if agency.is_empty() { ALL_AGENCIES } else { agency };
    let version = if version.is_empty() { LATEST_VERSION } else { version };
    Ok((agency, id, version))
}

macro_rules! artefact_ref {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name {
            agency: String,
            id: String,
            version: String,
        }

        impl $name {
            pub fn new(
                agency: impl Into<String>,
                id: impl Into<String>,
                version: impl Into<String>,
            ) -> Self {
                Self {
                    agency: agency.into(),
                    id: id.into(),
                    version: version.into(),
                }
            }

            /// Parse `id`, `agency,id` or `agency,id,version`
            pub fn parse(input: &str) -> Result<Self> {
                let (agency, id, version) = split_reference($kind, input)?;
                Ok(Self::new(agency, id, version))
            }

            pub fn agency(&self) -> &str {
                &self.agency
            }

            pub fn id(&self) -> &str {
                &self.id
            }

            pub fn version(&self) -> &str {
                &self.version
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{},{},{}", self.agency, self.id, self.version)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse(s)
            }
        }
    };
}

artefact_ref!(
    /// Reference to a dataflow
    FlowRef,
    "flow reference"
);

artefact_ref!(
    /// Reference to a data structure definition
    StructRef,
    "structure reference"
);
