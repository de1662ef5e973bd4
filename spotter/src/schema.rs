//! Resolution of free-form table headers to the semantic fields Spotter
//! understands.

use std::fmt;

use serde::Serialize;

use crate::Error;

/// A semantic role that a table column can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Name,
    Address,
    Latitude,
    Longitude,
    Link,
    Tags,
    Description,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 7] = [
        Self::Name,
        Self::Address,
        Self::Latitude,
        Self::Longitude,
        Self::Link,
        Self::Tags,
        Self::Description,
    ];
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Name => "name",
                Self::Address => "address",
                Self::Latitude => "latitude",
                Self::Longitude => "longitude",
                Self::Link => "link",
                Self::Tags => "tags",
                Self::Description => "description",
            }
        )
    }
}

/// How a normalized header is compared against a field's aliases.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// The header must equal one of the aliases.
    Exact(&'static [&'static str]),
    /// The header must contain one of the aliases.
    Contains(&'static [&'static str]),
}

impl Matcher {
    /// `header` is expected to be trimmed and lowercased already.
    pub fn matches(&self, header: &str) -> bool {
        match self {
            Self::Exact(aliases) => aliases.iter().any(|a| header == *a),
            Self::Contains(aliases) => aliases.iter().any(|a| header.contains(a)),
        }
    }
}

/// The alias table. Headers are compared after trimming and lowercasing.
pub const ALIASES: &[(CanonicalField, Matcher)] = &[
    (CanonicalField::Name, Matcher::Exact(&["name", "nom"])),
    (CanonicalField::Address, Matcher::Exact(&["address", "adresse"])),
    (CanonicalField::Latitude, Matcher::Exact(&["lat", "latitude"])),
    (CanonicalField::Longitude, Matcher::Exact(&["lon", "longitude"])),
    (
        CanonicalField::Link,
        Matcher::Contains(&["map", "lien", "geo", "geolocation"]),
    ),
    (CanonicalField::Tags, Matcher::Exact(&["tags"])),
    (CanonicalField::Description, Matcher::Contains(&["desc"])),
];

/// A column of the source table that has been assigned a semantic role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Position of the column in the table.
    pub index: usize,
    /// The header exactly as it appeared in the input.
    pub header: String,
}

/// The result of resolving a table's headers: where each canonical field
/// lives, if anywhere.
///
/// Name and address are always present, since they fall back to the first
/// and second column respectively when no header matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMap {
    pub name: Column,
    pub address: Column,
    pub latitude: Option<Column>,
    pub longitude: Option<Column>,
    pub link: Option<Column>,
    pub tags: Option<Column>,
    pub description: Option<Column>,
}

impl ColumnMap {
    /// Resolves the given headers against [`ALIASES`].
    ///
    /// For each field, the first header (in input order) that matches wins.
    /// Fails if the table has fewer than two columns, since name and address
    /// could then not be resolved positionally.
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Result<Self, Error> {
        if headers.len() < 2 {
            return Err(Error::SchemaIncomplete {
                columns: headers.len(),
            });
        }
        let normalized = headers
            .iter()
            .map(|h| h.as_ref().trim().to_lowercase())
            .collect::<Vec<String>>();
        let find = |field: CanonicalField| -> Option<Column> {
            let matcher = ALIASES
                .iter()
                .find(|(f, _)| *f == field)
                .map(|(_, m)| m)?;
            let index = normalized.iter().position(|h| matcher.matches(h))?;
            Some(column(headers, index))
        };

        Ok(Self {
            name: find(CanonicalField::Name).unwrap_or_else(|| column(headers, 0)),
            address: find(CanonicalField::Address).unwrap_or_else(|| column(headers, 1)),
            latitude: find(CanonicalField::Latitude),
            longitude: find(CanonicalField::Longitude),
            link: find(CanonicalField::Link),
            tags: find(CanonicalField::Tags),
            description: find(CanonicalField::Description),
        })
    }

    /// The column resolved for the given field, if any.
    pub fn get(&self, field: CanonicalField) -> Option<&Column> {
        match field {
            CanonicalField::Name => Some(&self.name),
            CanonicalField::Address => Some(&self.address),
            CanonicalField::Latitude => self.latitude.as_ref(),
            CanonicalField::Longitude => self.longitude.as_ref(),
            CanonicalField::Link => self.link.as_ref(),
            CanonicalField::Tags => self.tags.as_ref(),
            CanonicalField::Description => self.description.as_ref(),
        }
    }
}

impl fmt::Display for ColumnMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for field in CanonicalField::ALL {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            match self.get(field) {
                Some(c) => write!(f, "{}=\"{}\"", field, c.header)?,
                None => write!(f, "{}=-", field)?,
            }
        }
        Ok(())
    }
}

fn column<S: AsRef<str>>(headers: &[S], index: usize) -> Column {
    Column {
        index,
        header: headers[index].as_ref().to_string(),
    }
}
