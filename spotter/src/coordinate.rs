//! Coordinate resolution.
//!
//! A record can carry its position in two places: dedicated latitude and
//! longitude columns, and a map link whose URL embeds the coordinates. Both
//! are turned into a [`Candidate`] and merged axis by axis, with the link
//! taking precedence wherever it produced a value.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// A resolved geographic position.
///
/// Both components are finite. Ranges are not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A partially known position: either axis may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Candidate {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl Candidate {
    pub fn new(lat: Option<f64>, lon: Option<f64>) -> Self {
        Self { lat, lon }
    }

    /// Parses a pair of cells, either of which may be malformed.
    pub fn from_cells(lat: Option<&str>, lon: Option<&str>) -> Self {
        Self {
            lat: lat.and_then(parse_decimal),
            lon: lon.and_then(parse_decimal),
        }
    }

    /// Combines two candidates, preferring `overriding` on each axis where it
    /// has a value and keeping `self` elsewhere.
    pub fn merge(self, overriding: Candidate) -> Candidate {
        Candidate {
            lat: merge_axis(self.lat, overriding.lat),
            lon: merge_axis(self.lon, overriding.lon),
        }
    }

    /// A coordinate, if and only if both axes are known.
    pub fn resolve(self) -> Option<Coordinate> {
        Some(Coordinate::new(self.lat?, self.lon?))
    }
}

/// The per-axis precedence rule: an overriding value wins only when present.
#[inline]
pub fn merge_axis(baseline: Option<f64>, overriding: Option<f64>) -> Option<f64> {
    overriding.or(baseline)
}

/// Parses a number that may use a comma as its decimal separator.
///
/// Surrounding whitespace is ignored. Anything that is not a finite number
/// after normalization yields `None`.
pub fn parse_decimal(s: &str) -> Option<f64> {
    let s = s.trim().replace(',', ".");
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}

// Patterns tried against map link text, in order. Only the first one that
// matches is used.
static LINK_PATTERNS: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"@([-+]?\d+(?:\.\d+)?),([-+]?\d+(?:\.\d+)?)").unwrap(),
        Regex::new(r"q=([-+]?\d+(?:\.\d+)?),([-+]?\d+(?:\.\d+)?)").unwrap(),
    ]
});

/// Extracts coordinates from the text of a map link, e.g.
/// `https://www.google.com/maps/place/X/@45.76,4.83,17z` or
/// `https://maps.google.com/?q=45.76,4.83`.
///
/// The `@lat,lon` form is tried first, then `q=lat,lon`. Once a form matches,
/// no other is tried, even if one of its numbers turns out not to be finite;
/// such an axis is simply left empty.
pub fn extract_from_link(text: &str) -> Candidate {
    for pattern in LINK_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            return Candidate::new(
                caps.get(1).and_then(|m| parse_finite(m.as_str())),
                caps.get(2).and_then(|m| parse_finite(m.as_str())),
            );
        }
    }
    Candidate::default()
}

fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}
