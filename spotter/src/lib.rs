//! Spotter turns a loosely structured table of places ("spots") into a clean,
//! geocoded collection that can be searched and filtered by tag.
//!
//! The pipeline runs in a fixed order: the table's headers are resolved to
//! known fields ([`ColumnMap`]), each record's coordinates are resolved from
//! its coordinate columns and map link, records without coordinates are
//! dropped, the available tags are collected ([`TagUniverse`]) and finally
//! user queries ([`FilterQuery`]) are evaluated against the result.
//!
//! For Spotter's command line interface, see the `spotter-cli` crate.

mod catalog;
mod config;
pub mod coordinate;
mod dataset;
mod error;
pub mod filter;
mod fs;
mod hash;
pub mod schema;
mod source;
mod spot;
pub mod table;
mod tags;
mod view;

pub use catalog::{Catalog, Reload, Selection};
pub use config::{parse_delimiter, Config, DEFAULT_SOURCE};
pub use coordinate::{Candidate, Coordinate};
pub use dataset::{resolve_and_filter, Dataset};
pub use error::Error;
pub use filter::FilterQuery;
pub use schema::{CanonicalField, Column, ColumnMap};
pub use source::Source;
pub use spot::{parse_tags, Spot};
pub use table::{RawRecord, RawTable};
pub use tags::TagUniverse;
pub use view::{MapView, DEFAULT_ZOOM};
