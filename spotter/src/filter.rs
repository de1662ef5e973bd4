//! Filtering of spots by name and by tag.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::Spot;

/// What the user is currently looking for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterQuery {
    /// Case-insensitive substring to look for in spot names. Empty matches
    /// everything.
    #[serde(default)]
    pub search: String,
    /// Spots matching any of these tags are kept. Empty matches everything.
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl FilterQuery {
    pub fn with_search<S: Into<String>>(mut self, search: S) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_tag<S: Into<String>>(mut self, tag: S) -> Self {
        let _ = self.tags.insert(tag.into());
        self
    }

    /// Whether this query would keep every spot.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.tags.is_empty()
    }
}

/// Applies the search stage and then, if `tag_stage` is enabled, the tag
/// stage. The relative order of `spots` is preserved.
///
/// `tag_stage` should be disabled when the data has no tags column at all, in
/// which case any tags in the query are ignored.
pub fn apply<'a, I>(spots: I, query: &FilterQuery, tag_stage: bool) -> Vec<&'a Spot>
where
    I: IntoIterator<Item = &'a Spot>,
{
    let found = by_name(spots, &query.search);
    if tag_stage {
        by_tags(found, &query.tags)
    } else {
        found
    }
}

/// Keeps the spots whose name contains `search`, ignoring case.
pub fn by_name<'a, I>(spots: I, search: &str) -> Vec<&'a Spot>
where
    I: IntoIterator<Item = &'a Spot>,
{
    if search.is_empty() {
        return spots.into_iter().collect();
    }
    let needle = search.to_lowercase();
    spots
        .into_iter()
        .filter(|s| s.name.to_lowercase().contains(&needle))
        .collect()
}

/// Keeps the spots carrying at least one of the `selected` tags.
pub fn by_tags<'a, I>(spots: I, selected: &BTreeSet<String>) -> Vec<&'a Spot>
where
    I: IntoIterator<Item = &'a Spot>,
{
    if selected.is_empty() {
        return spots.into_iter().collect();
    }
    spots
        .into_iter()
        .filter(|s| s.has_any_tag(selected))
        .collect()
}
