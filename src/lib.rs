//! Ovistats: the statistics engine behind the SIVEPI ovitrap surveillance
//! dashboard.
//!
//! The crate turns a flat collection of normalized trap readings
//! ([`TrapRecord`]) into the derived products the dashboard consumes:
//! descriptive statistics, epidemiological indices (IPO, IB, IDO, IMO, IVO)
//! with risk-tier classification, outlier/trend analytics, spatial
//! statistics (Moran's I, Getis-Ord Gi*, kernel density, grid clustering)
//! and data-quality scores.
//!
//! Every entry point is a pure function over its input slice: nothing is
//! cached, persisted or mutated across calls. How records are loaded and
//! how results are rendered are the caller's concern.
//!
//! Degenerate *data* (empty samples, zero variance, zero mean) never
//! panics; each function documents the neutral value it returns instead.
//! Structural misuse (mismatched slice lengths, non-finite values handed
//! to a [`Sample`]) is a programmer error and panics at the constructor.
//!
//! [`TrapRecord`]: record::TrapRecord
//! [`Sample`]: univariate::Sample

#[macro_use]
extern crate serde_derive;

mod float;

pub mod bivariate;
pub mod indicators;
pub mod quality;
pub mod record;
pub mod series;
pub mod spatial;
pub mod univariate;

pub use crate::float::Float;
pub use crate::indicators::{IndicatorSet, RiskTier};
pub use crate::record::TrapRecord;
pub use crate::spatial::SpatialPoint;
pub use crate::univariate::Summary;

fn dot<A>(xs: &[A], ys: &[A]) -> A
where
    A: Float,
{
    xs.iter()
        .zip(ys)
        .fold(A::cast(0), |acc, (&x, &y)| acc + x * y)
}

fn sum<A>(xs: &[A]) -> A
where
    A: Float,
{
    use std::ops::Add;

    xs.iter().cloned().fold(A::cast(0), Add::add)
}

/// Standard normal CDF (Abramowitz & Stegun 26.2.17, |error| < 7.5e-8)
fn normal_cdf(z: f64) -> f64 {
    if z < 0.0 {
        return 1.0 - normal_cdf(-z);
    }

    let k = 1.0 / (1.0 + 0.2316419 * z);
    let poly = k
        * (0.319381530
            + k * (-0.356563782 + k * (1.781477937 + k * (-1.821255978 + k * 1.330274429))));
    let pdf = (-0.5 * z * z).exp() / (2.0 * std::f64::consts::PI).sqrt();

    1.0 - pdf * poly
}

fn two_tailed(z: f64) -> f64 {
    2.0 * (1.0 - normal_cdf(z.abs()))
}
