//! Map view suggestions for displaying a selection of spots.

use serde::Serialize;

use crate::{Coordinate, Spot};

/// The zoom level suggested when none is configured.
pub const DEFAULT_ZOOM: u8 = 14;

/// Where a map showing a set of spots should initially be centered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
}

impl MapView {
    /// Centers the view on the mean position of the given spots.
    ///
    /// Returns `None` if there are no spots, since there is then nothing to
    /// show.
    pub fn fit<'a, I>(spots: I, zoom: u8) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Spot>,
    {
        let (count, lat, lon) = spots
            .into_iter()
            .fold((0_usize, 0.0_f64, 0.0_f64), |(n, lat, lon), s| {
                (n + 1, lat + s.coordinate.lat, lon + s.coordinate.lon)
            });
        if count == 0 {
            return None;
        }
        Some(Self {
            center: Coordinate::new(lat / count as f64, lon / count as f64),
            zoom,
        })
    }
}
