//! Spots: the validated records handed to whoever displays them.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::coordinate::{extract_from_link, Candidate, Coordinate};
use crate::schema::{Column, ColumnMap};
use crate::table::RawRecord;

/// A single location with a usable position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spot {
    pub name: String,
    pub address: String,
    pub coordinate: Coordinate,
    pub tags: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Spot {
    /// Builds a spot from a raw record, or returns `None` if no coordinate
    /// could be resolved for it.
    pub fn from_record(record: &RawRecord, columns: &ColumnMap) -> Option<Self> {
        let coordinate = resolve_coordinate(record, columns)?;
        Some(Self {
            name: record.get(columns.name.index).trim().to_string(),
            address: record.get(columns.address.index).trim().to_string(),
            coordinate,
            tags: columns
                .tags
                .as_ref()
                .map(|c| parse_tags(record.get(c.index)))
                .unwrap_or_default(),
            description: optional_cell(record, columns.description.as_ref()),
            link: optional_cell(record, columns.link.as_ref()),
        })
    }

    /// Whether any of this spot's tags is in `selected`.
    pub fn has_any_tag(&self, selected: &BTreeSet<String>) -> bool {
        self.tags.iter().any(|t| selected.contains(t))
    }
}

/// Works out a record's position from its coordinate columns and map link.
///
/// The explicit columns form the baseline. Whatever the link yields replaces
/// the baseline axis by axis.
pub fn resolve_coordinate(record: &RawRecord, columns: &ColumnMap) -> Option<Coordinate> {
    // The coordinate columns only count as a baseline when both exist.
    let explicit = match (&columns.latitude, &columns.longitude) {
        (Some(lat), Some(lon)) => Candidate::from_cells(
            Some(record.get(lat.index)),
            Some(record.get(lon.index)),
        ),
        _ => Candidate::default(),
    };
    let extracted = columns
        .link
        .as_ref()
        .map(|c| record.get(c.index))
        .filter(|text| !text.trim().is_empty())
        .map(extract_from_link)
        .unwrap_or_default();
    explicit.merge(extracted).resolve()
}

/// Splits a comma-separated tags cell into distinct, trimmed, non-empty
/// tags.
pub fn parse_tags(cell: &str) -> BTreeSet<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn optional_cell(record: &RawRecord, column: Option<&Column>) -> Option<String> {
    column
        .map(|c| record.get(c.index).trim())
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}
