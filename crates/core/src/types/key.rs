//! Dimensional filter keys and their containment order

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{self, Display};
use std::str::FromStr;

const DIMENSION_SEPARATOR: char = '.';
const CODE_SEPARATOR: char = '+';
const ALL_KEYWORD: &str = "all";

/// Selector for a single dimension of a [`Key`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Selector {
    /// Matches any code
    Wildcard,
    /// Matches any of the listed codes
    Codes(BTreeSet<String>),
}

impl Selector {
    /// Selector matching exactly one code
    pub fn code(code: impl Into<String>) -> Self {
        Selector::Codes(BTreeSet::from([code.into()]))
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Selector::Wildcard)
    }

    /// Whether this selector pins exactly one code
    pub fn is_single_code(&self) -> bool {
        matches!(self, Selector::Codes(codes) if codes.len() == 1)
    }

    /// Whether every code matched by `other` is also matched by `self`
    pub fn contains(&self, other: &Selector) -> bool {
        match (self, other) {
            (Selector::Wildcard, _) => true,
            (Selector::Codes(_), Selector::Wildcard) => false,
            (Selector::Codes(mine), Selector::Codes(theirs)) => theirs.is_subset(mine),
        }
    }

    fn parse(text: &str, input: &str) -> Result<Self> {
        if text.is_empty() {
            return Ok(Selector::Wildcard);
        }
        let mut codes = BTreeSet::new();
        for code in text.split(CODE_SEPARATOR) {
            if code.is_empty() {
                return Err(Error::parse("key", input, "empty code in selector"));
            }
            if let Some(c) = code.chars().find(|c| c.is_whitespace() || c.is_control()) {
                return Err(Error::parse(
                    "key",
                    input,
                    format!("invalid character {c:?} in code '{code}'"),
                ));
            }
            codes.insert(code.to_string());
        }
        Ok(Selector::Codes(codes))
    }
}

impl Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Wildcard => Ok(()),
            Selector::Codes(codes) => {
                let mut first = true;
                for code in codes {
                    if !first {
                        write!(f, "{CODE_SEPARATOR}")?;
                    }
                    write!(f, "{code}")?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

/// An ordered, fixed-arity sequence of per-dimension selectors
///
/// The text form separates dimensions with `.`, leaves wildcard positions
/// empty and joins alternative codes with `+`: `M.BE+FR.` selects monthly
/// series for Belgium or France with any value in the third dimension.
///
/// [`Key::ALL`] is the top of the containment order. It carries no arity
/// and is written `all`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Key {
    selectors: Vec<Selector>,
}

impl Key {
    /// The key matching everything, regardless of arity
    pub const ALL: Key = Key {
        selectors: Vec::new(),
    };

    /// Build a key from per-dimension codes, an empty code being a wildcard
    pub fn of<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let selectors = codes
            .into_iter()
            .map(|code| {
                let code = code.into();
                if code.is_empty() {
                    Selector::Wildcard
                } else {
                    Selector::code(code)
                }
            })
            .collect();
        Self { selectors }
    }

    /// Build a key from explicit selectors
    pub fn from_selectors(selectors: Vec<Selector>) -> Self {
        Self { selectors }
    }

    /// Parse the dotted text form
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_KEYWORD) {
            return Ok(Key::ALL);
        }
        let selectors = trimmed
            .split(DIMENSION_SEPARATOR)
            .map(|part| Selector::parse(part, input))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { selectors })
    }

    /// Number of dimensions, zero for [`Key::ALL`]
    pub fn size(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_all(&self) -> bool {
        self.selectors.is_empty()
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    pub fn selector(&self, index: usize) -> Option<&Selector> {
        self.selectors.get(index)
    }

    /// Whether every position is a wildcard (true for [`Key::ALL`])
    pub fn is_wildcard_only(&self) -> bool {
        self.selectors.iter().all(Selector::is_wildcard)
    }

    /// Whether the key identifies exactly one series
    pub fn is_series_key(&self) -> bool {
        !self.is_all() && self.selectors.iter().all(Selector::is_single_code)
    }

    /// Whether every key matched by `other` is also matched by `self`
    ///
    /// Keys of different arity cannot be compared, unless one of them is
    /// [`Key::ALL`].
    pub fn contains(&self, other: &Key) -> Result<bool> {
        if self.is_all() {
            return Ok(true);
        }
        if other.is_all() {
            return Ok(self.is_wildcard_only());
        }
        if self.size() != other.size() {
            return Err(Error::invalid_argument(format!(
                "cannot compare key '{self}' of size {} with key '{other}' of size {}",
                self.size(),
                other.size()
            )));
        }
        Ok(self
            .selectors
            .iter()
            .zip(&other.selectors)
            .all(|(mine, theirs)| mine.contains(theirs)))
    }
}

impl Default for Key {
    fn default() -> Self {
        Key::ALL
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all() {
            return write!(f, "{ALL_KEYWORD}");
        }
        for (index, selector) in self.selectors.iter().enumerate() {
            if index > 0 {
                write!(f, "{DIMENSION_SEPARATOR}")?;
            }
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Key::parse(s)
    }
}

impl TryFrom<String> for Key {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Key::parse(&value)
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}
