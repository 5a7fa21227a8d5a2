//! Separates genuine tourist attractions from lodging, food and retail noise

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::config::AttractionsConfig;

/// OSM tag mapping of a map feature
pub type Tags = HashMap<String, String>;

/// Denylist/allowlist heuristic over OSM tags
#[derive(Debug, Clone)]
pub struct AttractionFilter {
    denylist: Vec<String>,
    tourism_allowlist: HashSet<String>,
    leisure_allowlist: HashSet<String>,
}

impl AttractionFilter {
    pub fn new<D, T, L>(denylist: D, tourism_allowlist: T, leisure_allowlist: L) -> Self
    where
        D: IntoIterator,
        D::Item: AsRef<str>,
        T: IntoIterator,
        T::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        Self {
            denylist: denylist
                .into_iter()
                .map(|word| word.as_ref().to_lowercase())
                .filter(|word| !word.is_empty())
                .collect(),
            tourism_allowlist: tourism_allowlist.into_iter().map(Into::into).collect(),
            leisure_allowlist: leisure_allowlist.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn from_config(config: &AttractionsConfig) -> Self {
        Self::new(
            &config.denylist,
            config.tourism_allowlist.iter().cloned(),
            config.leisure_allowlist.iter().cloned(),
        )
    }

    /// Whether a feature looks like a real attraction.
    ///
    /// Denylisted name substrings win over any category tag.
    #[must_use]
    pub fn is_tourist_attraction(&self, tags: &Tags) -> bool {
        let name = tags
            .get("name")
            .map(|n| n.to_lowercase())
            .unwrap_or_default();

        if self.denylist.iter().any(|bad| name.contains(bad.as_str())) {
            return false;
        }

        if tags
            .get("tourism")
            .is_some_and(|t| self.tourism_allowlist.contains(t))
        {
            return true;
        }

        tags.get("leisure")
            .is_some_and(|l| self.leisure_allowlist.contains(l))
    }

    /// Pick up to `limit` attraction names in source order.
    ///
    /// When nothing passes the filter but some features are named, the
    /// first `limit` named features are returned unfiltered.
    #[must_use]
    pub fn select<'a, I>(&self, features: I, limit: usize) -> Vec<String>
    where
        I: IntoIterator<Item = &'a Tags>,
        I::IntoIter: Clone,
    {
        let features = features.into_iter();

        let accepted: Vec<String> = features
            .clone()
            .filter_map(|tags| named(tags).map(|name| (name, tags)))
            .filter(|(_, tags)| self.is_tourist_attraction(tags))
            .map(|(name, _)| name.to_string())
            .take(limit)
            .collect();

        if !accepted.is_empty() {
            return accepted;
        }

        let fallback: Vec<String> = features
            .filter_map(named)
            .map(str::to_string)
            .take(limit)
            .collect();
        if !fallback.is_empty() {
            debug!(
                "Filter rejected every feature, falling back to {} raw names",
                fallback.len()
            );
        }
        fallback
    }
}

fn named(tags: &Tags) -> Option<&str> {
    tags.get("name").map(String::as_str).filter(|n| !n.is_empty())
}
