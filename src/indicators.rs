//! Epidemiological indices over a record collection.
//!
//! All indices are plain folds over `&[TrapRecord]`; filtering (by period,
//! by neighborhood, by trap) happens on the caller's side, and each view
//! passes the slice it wants summarized.

use itertools::Itertools;

use crate::record::{egg_counts, TrapRecord};
use crate::univariate::Sample;

/// Risk tier attached to positivity-style percentages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Baixo,
    Medio,
    Alto,
    Critico,
}

impl RiskTier {
    /// The strict calibration used by the alerting pipeline:
    /// `< 1%` baixo, `[1, 5)` médio, `[5, 10)` alto, `>= 10%` crítico.
    pub fn strict(pct: f64) -> RiskTier {
        match pct {
            p if p < 1.0 => RiskTier::Baixo,
            p if p < 5.0 => RiskTier::Medio,
            p if p < 10.0 => RiskTier::Alto,
            _ => RiskTier::Critico,
        }
    }

    /// The looser calibration kept for the legacy panorama view:
    /// `< 15` baixo, `< 30` moderado, `< 50` alto, else crítico.
    ///
    /// Two independently evolved policies, deliberately not unified; the
    /// loose scheme's "moderado" maps onto [`RiskTier::Medio`].
    pub fn loose(pct: f64) -> RiskTier {
        match pct {
            p if p < 15.0 => RiskTier::Baixo,
            p if p < 30.0 => RiskTier::Medio,
            p if p < 50.0 => RiskTier::Alto,
            _ => RiskTier::Critico,
        }
    }
}

/// Raw counts every index derives from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveillanceCounts {
    pub total_records: usize,
    pub positive_records: usize,
    pub negative_records: usize,
    /// Distinct attributed trap ids (the `0` sentinel is not a trap).
    pub unique_traps: usize,
    /// Distinct trap ids with at least one positive reading.
    pub positive_traps: usize,
    /// Distinct informed neighborhoods.
    pub unique_neighborhoods: usize,
    pub total_eggs: u64,
}

impl SurveillanceCounts {
    /// Tallies `records` in one pass per counter.
    pub fn of(records: &[TrapRecord]) -> SurveillanceCounts {
        let positive_records = records.iter().filter(|r| r.is_positive()).count();

        SurveillanceCounts {
            total_records: records.len(),
            positive_records,
            negative_records: records.len() - positive_records,
            unique_traps: records
                .iter()
                .filter(|r| r.trap_id != 0)
                .map(|r| r.trap_id)
                .unique()
                .count(),
            positive_traps: records
                .iter()
                .filter(|r| r.trap_id != 0 && r.is_positive())
                .map(|r| r.trap_id)
                .unique()
                .count(),
            unique_neighborhoods: records
                .iter()
                .filter(|r| r.has_neighborhood())
                .map(|r| r.neighborhood.trim().to_lowercase())
                .unique()
                .count(),
            total_eggs: records.iter().map(|r| u64::from(r.egg_count)).sum(),
        }
    }
}

/// Egg-count percentiles, linearly interpolated like every other
/// percentile in the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EggPercentiles {
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

/// The full set of surveillance indices for one record collection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub counts: SurveillanceCounts,
    /// Positivity over records: positive readings per 100 readings.
    pub ipo_by_record: f64,
    /// Positivity over traps: traps with any positive reading per 100
    /// distinct traps. Kept separate from [`ipo_by_record`]; different
    /// dashboard views consume each.
    ///
    /// [`ipo_by_record`]: IndicatorSet::ipo_by_record
    pub ipo_by_trap: f64,
    /// Breteau-style index. Without per-premise container counts this is
    /// approximated by the record-level positivity rate — a simplification,
    /// not a true Breteau Index.
    pub ib: f64,
    /// Egg density: eggs per positive reading.
    pub ido: f64,
    /// Egg density: eggs per positive trap.
    pub ido_by_trap: f64,
    /// Mean eggs per reading.
    pub imo: f64,
    /// IVO: coefficient of variation of egg counts, in percent.
    pub cv: f64,
    pub percentiles: EggPercentiles,
    /// Strict-scheme tier of `ipo_by_record`.
    pub risk: RiskTier,
}

/// Computes every indicator for `records`.
///
/// Zero records produce the all-zero set with risk baixo; no division by
/// zero ever surfaces.
pub fn compute(records: &[TrapRecord]) -> IndicatorSet {
    let counts = SurveillanceCounts::of(records);
    let eggs = counts.total_eggs as f64;

    let ipo_by_record = ratio_pct(counts.positive_records, counts.total_records);
    let ipo_by_trap = ratio_pct(counts.positive_traps, counts.unique_traps);

    let values = egg_counts(records);
    let (cv, percentiles) = if values.is_empty() {
        (0.0, EggPercentiles::default())
    } else {
        let sample = Sample::new(&values);
        let view = sample.percentiles();

        (
            sample.coef_of_variation(),
            EggPercentiles {
                p25: view.at(25.0),
                p50: view.at(50.0),
                p75: view.at(75.0),
                p90: view.at(90.0),
            },
        )
    };

    IndicatorSet {
        counts,
        ipo_by_record,
        ipo_by_trap,
        ib: ipo_by_record,
        ido: per(eggs, counts.positive_records),
        ido_by_trap: per(eggs, counts.positive_traps),
        imo: per(eggs, counts.total_records),
        cv,
        percentiles,
        risk: RiskTier::strict(ipo_by_record),
    }
}

fn ratio_pct(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn per(amount: f64, divisor: usize) -> f64 {
    if divisor == 0 {
        0.0
    } else {
        amount / divisor as f64
    }
}
