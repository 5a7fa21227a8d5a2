//! Attraction list model

use serde::{Deserialize, Serialize};

/// Attraction names in upstream relevance order. Duplicates are kept.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct AttractionList {
    names: Vec<String>,
}

impl AttractionList {
    #[must_use]
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// One name per line
    #[must_use]
    pub fn to_lines(&self) -> String {
        self.names.join("\n")
    }
}

impl From<Vec<String>> for AttractionList {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl IntoIterator for AttractionList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.into_iter()
    }
}
