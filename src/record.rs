//! Normalized trap readings, the engine's only input shape.
//!
//! The ingestion boundary (CSV loading, out of scope here) resolves all
//! string-vs-number ambiguity and produces these records; nothing inside
//! the engine re-parses or special-cases raw fields. Missing values use
//! the documented sentinels (`None`, zero id, empty neighborhood) so the
//! quality scorer can see what the loader could not fill in.

use chrono::NaiveDate;

/// One reading of one ovitrap on one collection visit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrapRecord {
    pub record_id: u32,
    /// Trap identifier; `0` means the loader could not attribute the
    /// reading to a trap.
    pub trap_id: u32,
    pub collection_date: Option<NaiveDate>,
    pub installation_date: Option<NaiveDate>,
    /// Eggs found in the trap; `0` is a negative trap, not missing data.
    pub egg_count: u32,
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
    /// Epidemiological week, 1-53.
    pub epidemiological_week: u32,
    /// Empty when the loader had no neighborhood to attribute.
    pub neighborhood: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl TrapRecord {
    /// A positive trap had at least one egg.
    pub fn is_positive(&self) -> bool {
        self.egg_count > 0
    }

    /// Whether the record carries a usable geolocation: both coordinates
    /// present, in range, and not the `(0, 0)` placeholder the loader
    /// emits for traps without coordinates.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => {
                let in_range = (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng);

                if in_range && !(lat == 0.0 && lng == 0.0) {
                    Some((lat, lng))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Whether the neighborhood field carries information.
    pub fn has_neighborhood(&self) -> bool {
        let trimmed = self.neighborhood.trim();

        // NB `to_lowercase` and not the ascii variant: "Não" needs the ã folded
        !trimmed.is_empty() && trimmed.to_lowercase() != "não informado"
    }
}

/// Extracts the egg counts of `records` as floats, in input order.
pub fn egg_counts(records: &[TrapRecord]) -> Vec<f64> {
    records.iter().map(|r| f64::from(r.egg_count)).collect()
}

#[cfg(test)]
mod test {
    use super::TrapRecord;

    fn record(id: u32, eggs: u32, lat: f64, lng: f64) -> TrapRecord {
        TrapRecord {
            record_id: id,
            trap_id: id,
            collection_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 15),
            installation_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 8),
            egg_count: eggs,
            year: 2024,
            month: 3,
            epidemiological_week: 11,
            neighborhood: "Centro".to_string(),
            latitude: Some(lat),
            longitude: Some(lng),
        }
    }

    #[test]
    fn zero_eggs_is_negative_trap() {
        assert!(!record(1, 0, -20.0, -45.0).is_positive());
        assert!(record(2, 1, -20.0, -45.0).is_positive());
    }

    #[test]
    fn origin_coordinates_mean_no_geolocation() {
        assert_eq!(record(1, 5, 0.0, 0.0).coordinates(), None);
        assert_eq!(record(1, 5, -20.0, -45.0).coordinates(), Some((-20.0, -45.0)));
    }

    #[test]
    fn out_of_range_coordinates_are_unusable() {
        assert_eq!(record(1, 5, 95.0, -45.0).coordinates(), None);
        assert_eq!(record(1, 5, -20.0, 200.0).coordinates(), None);
    }

    #[test]
    fn placeholder_neighborhood_is_not_informed() {
        let mut r = record(1, 5, -20.0, -45.0);

        assert!(r.has_neighborhood());
        r.neighborhood = "  ".to_string();
        assert!(!r.has_neighborhood());
        r.neighborhood = "Não Informado".to_string();
        assert!(!r.has_neighborhood());
    }
}
