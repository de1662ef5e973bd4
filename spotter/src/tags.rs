//! The set of tags available for filtering.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::Spot;

/// Every distinct tag used by a set of spots, in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagUniverse(Vec<String>);

impl TagUniverse {
    /// Collects the tags of all the given spots.
    pub fn build<'a, I>(spots: I) -> Self
    where
        I: IntoIterator<Item = &'a Spot>,
    {
        let all = spots
            .into_iter()
            .flat_map(|s| s.tags.iter().cloned())
            .collect::<BTreeSet<String>>();
        Self(all.into_iter().collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.binary_search_by(|t| t.as_str().cmp(tag)).is_ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a TagUniverse {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::spot::parse_tags;
    use crate::Coordinate;

    fn spot(tags: &str) -> Spot {
        Spot {
            name: "x".to_string(),
            address: String::new(),
            coordinate: Coordinate::new(0.0, 0.0),
            tags: parse_tags(tags),
            description: None,
            link: None,
        }
    }

    #[test]
    fn unions_and_sorts_tags() {
        let spots = vec![spot("lake, beach"), spot(""), spot("forest,beach ")];
        let universe = TagUniverse::build(&spots);
        assert_eq!(
            universe.iter().map(String::as_str).collect::<Vec<&str>>(),
            vec!["beach", "forest", "lake"]
        );
        assert!(universe.contains("forest"));
        assert!(!universe.contains("desert"));
    }

    #[test]
    fn empty_when_nothing_is_tagged() {
        let spots = vec![spot(""), spot(" , ")];
        assert!(TagUniverse::build(&spots).is_empty());
    }
}
