//! Section identifiers and the ordered section registry.
//!
//! The registry mirrors the `section[id]` elements of the host page in
//! document order. Order matters: the scroll tracker lets later sections win,
//! and shortcut digits index into it.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};

/// Identifier of a page section (the element id, e.g. `"projects"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SectionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for SectionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered, duplicate-free list of navigable sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRegistry {
    order: Vec<SectionId>,
    index: HashMap<SectionId, usize>,
}

impl SectionRegistry {
    /// Build a registry, rejecting empty lists, blank ids and duplicates.
    pub fn new<I, S>(ids: I) -> PortfolioResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<SectionId>,
    {
        let mut order = Vec::new();
        let mut index = HashMap::new();

        for id in ids {
            let id = id.into();
            if id.as_str().trim().is_empty() {
                return Err(PortfolioError::Config("blank section id".to_string()));
            }
            if index.insert(id.clone(), order.len()).is_some() {
                return Err(PortfolioError::Config(format!(
                    "duplicate section id: {}",
                    id
                )));
            }
            order.push(id);
        }

        if order.is_empty() {
            return Err(PortfolioError::Config("empty section registry".to_string()));
        }

        Ok(Self { order, index })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &SectionId) -> bool {
        self.index.contains_key(id)
    }

    /// Zero-based lookup.
    pub fn get(&self, position: usize) -> Option<&SectionId> {
        self.order.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionId> {
        self.order.iter()
    }
}

impl<'a> IntoIterator for &'a SectionRegistry {
    type Item = &'a SectionId;
    type IntoIter = std::slice::Iter<'a, SectionId>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}
