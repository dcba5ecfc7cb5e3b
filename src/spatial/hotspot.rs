//! Local hot/cold spot detection (Getis-Ord Gi*)

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::spatial::SpatialPoint;
use crate::univariate::confidence::ConfidenceLevel;

/// Kind of significant local cluster
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotspotKind {
    /// High values surrounded by high values (`z > 0`)
    Hot,
    /// Low values surrounded by low values (`z < 0`)
    Cold,
}

/// A point whose local Gi* statistic cleared the significance cutoff
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub point: SpatialPoint,
    pub z_score: f64,
    pub kind: HotspotKind,
    /// How many points (including the point itself) fed the local statistic
    pub neighbors: usize,
}

/// Detects Getis-Ord Gi* hot and cold spots among `points`.
///
/// The local statistic for each point uses binary weights over the
/// neighborhood within `distance_threshold`, including the point itself
/// (the `*` variant). Only points with `|z|` at or above the critical
/// value of `confidence` are returned.
///
/// Fewer than 3 points, or zero variance in the values, yields no spots.
///
/// - Time: `O(n²)`
pub fn detect(
    points: &[SpatialPoint],
    distance_threshold: f64,
    confidence: ConfidenceLevel,
) -> Vec<Hotspot> {
    let n = points.len();

    if n < 3 {
        return Vec::new();
    }

    let nf = n as f64;
    let mean = points.iter().map(|p| p.value).sum::<f64>() / nf;
    let sq_mean = points.iter().map(|p| p.value * p.value).sum::<f64>() / nf;
    let s = (sq_mean - mean * mean).sqrt();

    if s == 0.0 {
        return Vec::new();
    }

    let cutoff = confidence.z_score();

    let gi_star = |a: &SpatialPoint| -> Option<Hotspot> {
        // Binary weights make sum(w) and sum(w^2) the same neighbor count
        let mut weight_sum = 0.0_f64;
        let mut weighted_values = 0.0_f64;

        for b in points {
            if a.distance(b) <= distance_threshold {
                weight_sum += 1.0;
                weighted_values += b.value;
            }
        }

        let numerator = weighted_values - mean * weight_sum;
        let denominator = s * ((nf * weight_sum - weight_sum * weight_sum) / (nf - 1.0)).sqrt();

        if denominator == 0.0 {
            return None;
        }

        let z = numerator / denominator;

        if z.abs() < cutoff {
            return None;
        }

        Some(Hotspot {
            point: *a,
            z_score: z,
            kind: if z > 0.0 {
                HotspotKind::Hot
            } else {
                HotspotKind::Cold
            },
            neighbors: weight_sum as usize,
        })
    };

    #[cfg(feature = "rayon")]
    {
        points.par_iter().filter_map(|a| gi_star(a)).collect()
    }
    #[cfg(not(feature = "rayon"))]
    {
        points.iter().filter_map(|a| gi_star(a)).collect()
    }
}
