//! Spatial analysis over geolocated trap readings.
//!
//! Everything here operates on [`SpatialPoint`]s — records that survived
//! coordinate validation. Records without a usable geolocation are dropped
//! at [`SpatialPoint::from_records`] and never reach the statistics, so no
//! function in this module has a "missing coordinates" error path.
//!
//! Distances are plain Euclidean in degree space; thresholds throughout
//! the system are calibrated in degrees (0.01° ≈ 1.1 km at the equator).
//! Pairwise scans are `O(n²)`, fine for municipal trap networks.

pub mod autocorrelation;
pub mod cluster;
pub mod dispersion;
pub mod hotspot;
pub mod kde;

use crate::record::TrapRecord;

/// A geolocated observation: one trap reading with usable coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpatialPoint {
    pub id: u32,
    pub lat: f64,
    pub lng: f64,
    /// Egg count of the reading.
    pub value: f64,
}

impl SpatialPoint {
    /// Projects `records` onto spatial points, keeping only records whose
    /// coordinates are present, in range and not the `(0, 0)` placeholder.
    pub fn from_records(records: &[TrapRecord]) -> Vec<SpatialPoint> {
        records
            .iter()
            .filter_map(|r| {
                r.coordinates().map(|(lat, lng)| SpatialPoint {
                    id: r.record_id,
                    lat,
                    lng,
                    value: f64::from(r.egg_count),
                })
            })
            .collect()
    }

    /// Euclidean distance to `other` in degree space.
    pub fn distance(&self, other: &SpatialPoint) -> f64 {
        ((self.lat - other.lat).powi(2) + (self.lng - other.lng).powi(2)).sqrt()
    }
}
