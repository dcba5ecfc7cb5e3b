//! Dispersion of the trap network around its mean center

use crate::spatial::SpatialPoint;
use crate::univariate::Sample;

/// How spread out a set of points and their values are
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dispersion {
    /// Centroid of the point coordinates
    pub mean_center: (f64, f64),
    /// Root-mean-square distance from the centroid, in degrees
    pub standard_distance: f64,
    /// Variance-to-mean ratio of the point values; above 1 indicates
    /// counts more clumped than a Poisson process
    pub dispersion_index: f64,
}

/// Computes the mean center, standard distance and value dispersion index
/// of `points`. No points yields the all-zero result; a zero value mean
/// leaves the dispersion index at zero.
pub fn analyze(points: &[SpatialPoint]) -> Dispersion {
    if points.is_empty() {
        return Dispersion::default();
    }

    let nf = points.len() as f64;
    let center = (
        points.iter().map(|p| p.lat).sum::<f64>() / nf,
        points.iter().map(|p| p.lng).sum::<f64>() / nf,
    );

    let mean_sq_dist = points
        .iter()
        .map(|p| (p.lat - center.0).powi(2) + (p.lng - center.1).powi(2))
        .sum::<f64>()
        / nf;

    let values = points.iter().map(|p| p.value).collect::<Vec<_>>();
    let sample = Sample::new(&values);
    let mean = sample.mean();
    let dispersion_index = if mean == 0.0 {
        0.0
    } else {
        sample.var(Some(mean)) / mean
    };

    Dispersion {
        mean_center: center,
        standard_distance: mean_sq_dist.sqrt(),
        dispersion_index,
    }
}
