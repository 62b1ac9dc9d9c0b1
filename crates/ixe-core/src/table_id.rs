//! Strongly-typed output table identifier.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// Identifier of an output table (e.g. `in.c-main.customers`).
///
/// The identifier names files under `out/tables/`, so it must be non-empty,
/// must not contain path separators and must not be `.` or `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TableId(String);

impl<'de> Deserialize<'de> for TableId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TableId::try_new(s).map_err(serde::de::Error::custom)
    }
}

impl TableId {
    /// Create a new `TableId`, panicking if the identifier is invalid.
    ///
    /// Prefer [`try_new`](Self::try_new) when handling untrusted input.
    pub fn new(id: impl Into<String>) -> Self {
        match Self::try_new(id) {
            Ok(id) => id,
            Err(reason) => panic!("{reason}"),
        }
    }

    /// Try to create a new `TableId`, returning the reason it was rejected.
    pub fn try_new(id: impl Into<String>) -> Result<Self, String> {
        let s = id.into();
        if s.is_empty() {
            return Err("outputTable must not be empty".to_string());
        }
        if s == "." || s == ".." || s.contains(['/', '\\']) {
            return Err(format!(
                "outputTable '{s}' must not contain path separators or be '.'/'..'"
            ));
        }
        Ok(Self(s))
    }

    /// Return the underlying identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TableId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for TableId {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TableId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TableId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TableId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
