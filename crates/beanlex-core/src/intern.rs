//! String interning for accounts and currencies.
//!
//! Account and currency tokens repeat constantly across a ledger file; a thin
//! `Arc<str>` wrapper lets every occurrence of `Assets:Cash` or `USD` share one
//! allocation and compare by pointer in the common case.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// An interned string: cheap to clone, cheap to compare when it shares an
/// allocation with the value it's compared against.
#[derive(Debug, Clone, Eq)]
pub struct InternedStr(Arc<str>);

impl InternedStr {
    /// Wrap a string without deduplicating against any other instance.
    pub fn new(s: impl Into<Arc<str>>) -> Self {
        Self(s.into())
    }

    /// Borrow the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for InternedStr {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl std::hash::Hash for InternedStr {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl PartialOrd for InternedStr {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InternedStr {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl fmt::Display for InternedStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for InternedStr {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for InternedStr {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl std::borrow::Borrow<str> for InternedStr {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for InternedStr {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl Serialize for InternedStr {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for InternedStr {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_by_content_even_without_sharing() {
        let a = InternedStr::new("Assets:Cash");
        let b = InternedStr::new("Assets:Cash");
        assert_eq!(a, b);
    }

    #[test]
    fn compares_against_str() {
        let a = InternedStr::new("USD");
        assert_eq!(a.as_str(), "USD");
    }
}
