//! String-keyed configuration properties

use crate::constants::ENV_PREFIX;
use crate::errors::{Error, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// An ordered map of configuration properties
///
/// Values are kept as text and converted on access, so a malformed value
/// only fails the component that reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    values: BTreeMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Properties read from `STATDX_*` environment variables for the given keys
    pub fn from_env<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new().with_env_overrides(keys)
    }

    /// Override `keys` with their `STATDX_*` environment variable, when set
    pub fn with_env_overrides<'a>(mut self, keys: impl IntoIterator<Item = &'a str>) -> Self {
        for key in keys {
            if let Ok(value) = std::env::var(env_var_name(key)) {
                self.values.insert(key.to_string(), value);
            }
        }
        self
    }

    /// Set a property, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) {
        self.values.insert(key.into(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Read a boolean, accepting `true`/`false`/`1`/`0`/`yes`/`no`
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        self.get(key)
            .map(|raw| match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" => Ok(false),
                _ => Err(Error::configuration(format!(
                    "property '{key}' expects a boolean, got '{raw}'"
                ))),
            })
            .transpose()
    }

    pub fn get_u64(&self, key: &str) -> Result<Option<u64>> {
        self.get(key)
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|e| {
                    Error::configuration(format!(
                        "property '{key}' expects an unsigned integer, got '{raw}': {e}"
                    ))
                })
            })
            .transpose()
    }

    pub fn get_path(&self, key: &str) -> Option<PathBuf> {
        self.get(key)
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Environment variable overriding a property: `caching.noCache` is `STATDX_CACHING_NOCACHE`
pub fn env_var_name(key: &str) -> String {
    format!("{ENV_PREFIX}{}", key.replace('.', "_").to_ascii_uppercase())
}
