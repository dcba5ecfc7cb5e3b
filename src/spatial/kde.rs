//! Kernel density estimation over a lat/lng grid
//!
//! Produces the egg-density surface behind the dashboard heat layer: a
//! Gaussian kernel around every point, weighted by the point's egg count,
//! evaluated at the cell centers of a regular grid spanning the points'
//! bounding box.

use itertools::Itertools;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::spatial::SpatialPoint;

/// One grid cell with non-zero estimated density
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DensityCell {
    /// Cell-center latitude
    pub lat: f64,
    /// Cell-center longitude
    pub lng: f64,
    pub density: f64,
}

/// Evaluates a value-weighted Gaussian KDE on a `grid_size × grid_size`
/// lattice over the bounding box of `points`.
///
/// Kernel support is truncated at `3 * bandwidth`; cells that no point
/// reaches are not emitted. No points, a zero `grid_size` or a
/// non-positive `bandwidth` produce an empty grid.
///
/// - Time: `O(grid_size² * n)`
pub fn density_grid(points: &[SpatialPoint], grid_size: usize, bandwidth: f64) -> Vec<DensityCell> {
    if points.is_empty() || grid_size == 0 || bandwidth <= 0.0 {
        return Vec::new();
    }

    let (min_lat, max_lat) = match points.iter().map(|p| p.lat).minmax().into_option() {
        Some(bounds) => bounds,
        None => return Vec::new(),
    };
    let (min_lng, max_lng) = match points.iter().map(|p| p.lng).minmax().into_option() {
        Some(bounds) => bounds,
        None => return Vec::new(),
    };

    let lat_step = (max_lat - min_lat) / grid_size as f64;
    let lng_step = (max_lng - min_lng) / grid_size as f64;
    let support = 3.0 * bandwidth;

    let estimate = |cell: usize| -> Option<DensityCell> {
        let (row, col) = (cell / grid_size, cell % grid_size);
        let lat = min_lat + (row as f64 + 0.5) * lat_step;
        let lng = min_lng + (col as f64 + 0.5) * lng_step;

        let density = points
            .iter()
            .filter_map(|p| {
                let d = ((p.lat - lat).powi(2) + (p.lng - lng).powi(2)).sqrt();

                if d > support {
                    None
                } else {
                    Some(p.value * gaussian(d / bandwidth))
                }
            })
            .sum::<f64>();

        if density > 0.0 {
            Some(DensityCell { lat, lng, density })
        } else {
            None
        }
    };

    #[cfg(feature = "rayon")]
    {
        (0..grid_size * grid_size)
            .into_par_iter()
            .filter_map(estimate)
            .collect()
    }
    #[cfg(not(feature = "rayon"))]
    {
        (0..grid_size * grid_size).filter_map(estimate).collect()
    }
}

/// Gaussian kernel
fn gaussian(u: f64) -> f64 {
    (-0.5 * u * u).exp() / (2.0 * std::f64::consts::PI).sqrt()
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::{density_grid, gaussian};
    use crate::spatial::test_util::point;

    #[test]
    fn empty_and_degenerate_inputs_yield_empty_grids() {
        assert!(density_grid(&[], 10, 0.01).is_empty());
        assert!(density_grid(&[point(1, 0.0, 0.0, 5.0)], 0, 0.01).is_empty());
        assert!(density_grid(&[point(1, 0.0, 0.0, 5.0)], 10, 0.0).is_empty());
    }

    #[test]
    fn density_concentrates_near_the_mass() {
        let points = vec![
            point(1, 0.0, 0.0, 100.0),
            point(2, 0.001, 0.001, 100.0),
            point(3, 0.1, 0.1, 1.0),
        ];
        let cells = density_grid(&points, 20, 0.02);

        assert!(!cells.is_empty());

        let peak = cells
            .iter()
            .max_by(|a, b| a.density.partial_cmp(&b.density).unwrap())
            .unwrap();

        // The hottest cell sits near the heavy pair, not the light point
        assert!(peak.lat < 0.05 && peak.lng < 0.05);
    }

    #[test]
    fn cells_beyond_kernel_support_are_dropped() {
        // Two distant points, narrow bandwidth: the middle of the grid is dry
        let points = vec![point(1, 0.0, 0.0, 10.0), point(2, 1.0, 1.0, 10.0)];
        let cells = density_grid(&points, 10, 0.01);

        assert!(cells.len() < 100);
        assert!(cells.iter().all(|c| c.density > 0.0));
    }

    #[test]
    fn kernel_reference_values() {
        assert_relative_eq!(gaussian(0.0), 0.3989422804014327, epsilon = 1e-12);
        assert!(gaussian(1.0) < gaussian(0.0));
    }
}
