//! Data-quality scoring and anomaly flagging.
//!
//! Two separate readings of the same records: completeness (how much of
//! each record the loader managed to fill in, weighted by how much the
//! engine depends on the field) and plausibility (values that are present
//! but cannot be right).

use chrono::NaiveDate;

use crate::record::TrapRecord;

/// Records at or above this completeness score count as complete.
pub const COMPLETE_THRESHOLD: f64 = 95.0;

/// Egg counts above this are flagged as implausible. A heuristic cutoff,
/// not a statistical one: the largest credible single-trap reading in the
/// program's history is an order of magnitude below it.
pub const MAX_PLAUSIBLE_EGGS: u32 = 10_000;

/// Relative importance of each field for completeness scoring.
///
/// The defaults weigh the fields by how many engine products break without
/// them: coordinates feed every spatial product, the collection date every
/// series, and so on.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldWeights {
    pub trap_id: f64,
    pub collection_date: f64,
    pub coordinates: f64,
    pub neighborhood: f64,
    pub egg_count: f64,
    pub epidemiological_week: f64,
    pub year: f64,
}

impl Default for FieldWeights {
    fn default() -> FieldWeights {
        FieldWeights {
            trap_id: 1.0,
            collection_date: 1.2,
            coordinates: 1.5,
            neighborhood: 1.0,
            egg_count: 1.0,
            epidemiological_week: 0.6,
            year: 0.6,
        }
    }
}

impl FieldWeights {
    fn total(&self) -> f64 {
        self.trap_id
            + self.collection_date
            + self.coordinates
            + self.neighborhood
            + self.egg_count
            + self.epidemiological_week
            + self.year
    }
}

/// Completeness of a single record
// NB Serialize only: the borrowed field names cannot round-trip
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecordScore {
    pub record_id: u32,
    /// 0-100; weighted share of present fields
    pub score: f64,
    pub missing_fields: Vec<&'static str>,
}

/// Scores the completeness of one record against `weights`.
pub fn score_record(record: &TrapRecord, weights: &FieldWeights) -> RecordScore {
    let mut present = 0.0;
    let mut missing_fields = Vec::new();

    let mut check = |name: &'static str, weight: f64, ok: bool| {
        if ok {
            present += weight;
        } else {
            missing_fields.push(name);
        }
    };

    check("trap_id", weights.trap_id, record.trap_id != 0);
    check(
        "collection_date",
        weights.collection_date,
        record.collection_date.is_some(),
    );
    check(
        "coordinates",
        weights.coordinates,
        record.coordinates().is_some(),
    );
    check(
        "neighborhood",
        weights.neighborhood,
        record.has_neighborhood(),
    );
    // The normalized shape always carries an egg count; the weight is
    // retained so callers overriding presence semantics keep the same total
    check("egg_count", weights.egg_count, true);
    check(
        "epidemiological_week",
        weights.epidemiological_week,
        (1..=53).contains(&record.epidemiological_week),
    );
    check("year", weights.year, record.year > 0);

    let total = weights.total();
    let score = if total == 0.0 {
        0.0
    } else {
        present / total * 100.0
    };

    RecordScore {
        record_id: record.record_id,
        score,
        missing_fields,
    }
}

/// Aggregate completeness of a record collection
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetQuality {
    pub total_records: usize,
    /// Mean per-record score, 0-100
    pub mean_score: f64,
    /// Records scoring at least [`COMPLETE_THRESHOLD`]
    pub complete_records: usize,
    pub complete_pct: f64,
}

/// Scores every record and aggregates. Zero records yield the all-zero
/// aggregate.
pub fn score_dataset(records: &[TrapRecord], weights: &FieldWeights) -> DatasetQuality {
    if records.is_empty() {
        return DatasetQuality::default();
    }

    let scores: Vec<f64> = records
        .iter()
        .map(|r| score_record(r, weights).score)
        .collect();
    let complete = scores.iter().filter(|&&s| s >= COMPLETE_THRESHOLD).count();
    let n = records.len() as f64;

    DatasetQuality {
        total_records: records.len(),
        mean_score: scores.iter().sum::<f64>() / n,
        complete_records: complete,
        complete_pct: complete as f64 / n * 100.0,
    }
}

/// How bad an anomaly is for downstream products
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Baixa,
    Media,
    Alta,
}

/// A present-but-implausible value in one record
// NB Serialize only: the borrowed field name cannot round-trip
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Anomaly {
    pub record_id: u32,
    pub field: &'static str,
    pub severity: Severity,
    pub description: String,
}

/// Flags implausible values in `records`, with `today` as the reference
/// for the future-date check.
///
/// The four checks and their severities are a fixed policy table:
/// out-of-range coordinates are alta (they poison every spatial product),
/// an egg count past [`MAX_PLAUSIBLE_EGGS`] and a future collection date
/// are media, a week outside 1-53 is baixa (it only skews temporal
/// bucketing).
pub fn detect_anomalies_at(records: &[TrapRecord], today: NaiveDate) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    for record in records {
        let coords_out_of_range = match (record.latitude, record.longitude) {
            (Some(lat), Some(lng)) => {
                !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng)
            }
            _ => false,
        };

        if coords_out_of_range {
            anomalies.push(Anomaly {
                record_id: record.record_id,
                field: "coordinates",
                severity: Severity::Alta,
                description: format!(
                    "coordinates ({:?}, {:?}) outside valid ranges",
                    record.latitude, record.longitude
                ),
            });
        }

        if record.egg_count > MAX_PLAUSIBLE_EGGS {
            anomalies.push(Anomaly {
                record_id: record.record_id,
                field: "egg_count",
                severity: Severity::Media,
                description: format!(
                    "egg count {} above the plausible maximum of {}",
                    record.egg_count, MAX_PLAUSIBLE_EGGS
                ),
            });
        }

        if let Some(date) = record.collection_date {
            if date > today {
                anomalies.push(Anomaly {
                    record_id: record.record_id,
                    field: "collection_date",
                    severity: Severity::Media,
                    description: format!("collection date {} is in the future", date),
                });
            }
        }

        if !(1..=53).contains(&record.epidemiological_week) {
            anomalies.push(Anomaly {
                record_id: record.record_id,
                field: "epidemiological_week",
                severity: Severity::Baixa,
                description: format!(
                    "epidemiological week {} outside 1-53",
                    record.epidemiological_week
                ),
            });
        }
    }

    anomalies
}

/// [`detect_anomalies_at`] with `today` taken from the system clock.
pub fn detect_anomalies(records: &[TrapRecord]) -> Vec<Anomaly> {
    detect_anomalies_at(records, chrono::Local::now().date_naive())
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    use super::{
        detect_anomalies_at, score_dataset, score_record, FieldWeights, Severity,
    };
    use crate::record::TrapRecord;

    fn full_record() -> TrapRecord {
        TrapRecord {
            record_id: 1,
            trap_id: 42,
            collection_date: NaiveDate::from_ymd_opt(2024, 5, 2),
            installation_date: NaiveDate::from_ymd_opt(2024, 4, 25),
            egg_count: 35,
            year: 2024,
            month: 5,
            epidemiological_week: 18,
            neighborhood: "Centro".to_string(),
            latitude: Some(-20.45),
            longitude: Some(-45.95),
        }
    }

    #[test]
    fn complete_record_scores_100() {
        let s = score_record(&full_record(), &FieldWeights::default());

        assert_relative_eq!(s.score, 100.0);
        assert!(s.missing_fields.is_empty());
    }

    #[test]
    fn missing_neighborhood_and_week_score_the_worked_example() {
        let mut r = full_record();
        r.neighborhood = String::new();
        r.epidemiological_week = 0;

        let s = score_record(&r, &FieldWeights::default());

        // (6.9 - 1.6) / 6.9 * 100
        assert_relative_eq!(s.score, (6.9 - 1.6) / 6.9 * 100.0, epsilon = 1e-9);
        assert_eq!(s.missing_fields, vec!["neighborhood", "epidemiological_week"]);
    }

    #[test]
    fn dataset_aggregate_counts_complete_records() {
        let mut incomplete = full_record();
        incomplete.record_id = 2;
        incomplete.latitude = None;

        let q = score_dataset(&[full_record(), incomplete], &FieldWeights::default());

        assert_eq!(q.total_records, 2);
        assert_eq!(q.complete_records, 1);
        assert_relative_eq!(q.complete_pct, 50.0);
        assert!(q.mean_score < 100.0 && q.mean_score > 85.0);
    }

    #[test]
    fn empty_dataset_scores_zero() {
        let q = score_dataset(&[], &FieldWeights::default());

        assert_eq!(q.total_records, 0);
        assert_relative_eq!(q.mean_score, 0.0);
    }

    #[test]
    fn anomaly_table_matches_the_four_checks() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let mut bad_coords = full_record();
        bad_coords.record_id = 1;
        bad_coords.latitude = Some(95.0);

        let mut too_many_eggs = full_record();
        too_many_eggs.record_id = 2;
        too_many_eggs.egg_count = 10_001;

        let mut future = full_record();
        future.record_id = 3;
        future.collection_date = NaiveDate::from_ymd_opt(2024, 6, 2);

        let mut bad_week = full_record();
        bad_week.record_id = 4;
        bad_week.epidemiological_week = 54;

        let anomalies =
            detect_anomalies_at(&[bad_coords, too_many_eggs, future, bad_week], today);

        assert_eq!(anomalies.len(), 4);
        assert_eq!(anomalies[0].severity, Severity::Alta);
        assert_eq!(anomalies[0].field, "coordinates");
        assert_eq!(anomalies[1].severity, Severity::Media);
        assert_eq!(anomalies[2].severity, Severity::Media);
        assert_eq!(anomalies[3].severity, Severity::Baixa);
    }

    #[test]
    fn boundary_values_are_not_anomalous() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let mut r = full_record();
        r.egg_count = 10_000;
        r.epidemiological_week = 53;
        r.collection_date = Some(today);

        assert!(detect_anomalies_at(&[r], today).is_empty());
    }

    #[test]
    fn unattributed_trap_id_is_reported_missing() {
        let mut r = full_record();
        r.trap_id = 0;

        let s = score_record(&r, &FieldWeights::default());

        assert_eq!(s.missing_fields, vec!["trap_id"]);
        assert!(s.score < 100.0);
    }
}
