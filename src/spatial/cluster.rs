//! Grid-based point clustering
//!
//! Cheap density clustering for the map's aggregated view: points snap to
//! grid cells by floor division of their coordinates, and each occupied
//! cell becomes one cluster.

use itertools::Itertools;

use crate::indicators::RiskTier;
use crate::spatial::SpatialPoint;

/// A cell-aggregate of spatial points
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Cell key: `(floor(lat / cell), floor(lng / cell))`
    pub cell: (i64, i64),
    /// Centroid of the member points
    pub lat: f64,
    pub lng: f64,
    pub count: usize,
    pub total_eggs: f64,
    pub mean_eggs: f64,
    pub risk: RiskTier,
}

/// Classifies a cluster by its mean egg count:
/// `< 20` baixo, `< 50` médio, `< 100` alto, else crítico.
///
/// A third calibration next to [`RiskTier::strict`] and
/// [`RiskTier::loose`]; this one reads egg counts, not percentages.
pub fn risk_by_mean_eggs(mean_eggs: f64) -> RiskTier {
    match mean_eggs {
        m if m < 20.0 => RiskTier::Baixo,
        m if m < 50.0 => RiskTier::Medio,
        m if m < 100.0 => RiskTier::Alto,
        _ => RiskTier::Critico,
    }
}

/// Snaps `points` to a grid of `cell_size` degrees and aggregates each
/// occupied cell. A non-positive `cell_size` clusters nothing.
///
/// Clusters come out ordered by cell key, so repeated calls over the same
/// data render identically.
pub fn grid_clusters(points: &[SpatialPoint], cell_size: f64) -> Vec<Cluster> {
    if points.is_empty() || cell_size <= 0.0 {
        return Vec::new();
    }

    let cells = points
        .iter()
        .map(|p| {
            let key = (
                (p.lat / cell_size).floor() as i64,
                (p.lng / cell_size).floor() as i64,
            );

            (key, p)
        })
        .into_group_map();

    cells
        .into_iter()
        .map(|(cell, members)| {
            let count = members.len();
            let nf = count as f64;
            let total_eggs = members.iter().map(|p| p.value).sum::<f64>();
            let mean_eggs = total_eggs / nf;

            Cluster {
                cell,
                lat: members.iter().map(|p| p.lat).sum::<f64>() / nf,
                lng: members.iter().map(|p| p.lng).sum::<f64>() / nf,
                count,
                total_eggs,
                mean_eggs,
                risk: risk_by_mean_eggs(mean_eggs),
            }
        })
        .sorted_by_key(|c| c.cell)
        .collect()
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::{grid_clusters, risk_by_mean_eggs};
    use crate::indicators::RiskTier;
    use crate::spatial::test_util::point;

    #[test]
    fn single_point_forms_a_singleton_cluster() {
        let clusters = grid_clusters(&[point(1, -20.45, -45.95, 19.0)], 0.01);

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].count, 1);
        assert_relative_eq!(clusters[0].lat, -20.45);
        assert_relative_eq!(clusters[0].mean_eggs, 19.0);
        assert_eq!(clusters[0].risk, RiskTier::Baixo);
    }

    #[test]
    fn risk_thresholds_at_boundaries() {
        assert_eq!(risk_by_mean_eggs(19.0), RiskTier::Baixo);
        assert_eq!(risk_by_mean_eggs(20.0), RiskTier::Medio);
        assert_eq!(risk_by_mean_eggs(49.0), RiskTier::Medio);
        assert_eq!(risk_by_mean_eggs(50.0), RiskTier::Alto);
        assert_eq!(risk_by_mean_eggs(100.0), RiskTier::Critico);
    }

    #[test]
    fn nearby_points_share_a_cell_and_average() {
        let points = vec![
            point(1, 0.001, 0.001, 10.0),
            point(2, 0.002, 0.002, 30.0),
            point(3, 5.0, 5.0, 80.0),
        ];
        let clusters = grid_clusters(&points, 0.01);

        assert_eq!(clusters.len(), 2);

        let pair = clusters.iter().find(|c| c.count == 2).unwrap();
        assert_relative_eq!(pair.total_eggs, 40.0);
        assert_relative_eq!(pair.mean_eggs, 20.0);
        assert_relative_eq!(pair.lat, 0.0015);
        assert_eq!(pair.risk, RiskTier::Medio);

        let lone = clusters.iter().find(|c| c.count == 1).unwrap();
        assert_eq!(lone.risk, RiskTier::Alto);
    }

    #[test]
    fn negative_coordinates_floor_consistently() {
        // floor(-0.001 / 0.01) = -1; floor(0.001 / 0.01) = 0
        let points = vec![point(1, -0.001, 0.0, 1.0), point(2, 0.001, 0.0, 1.0)];
        let clusters = grid_clusters(&points, 0.01);

        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn degenerate_inputs_cluster_nothing() {
        assert!(grid_clusters(&[], 0.01).is_empty());
        assert!(grid_clusters(&[point(1, 0.0, 0.0, 1.0)], 0.0).is_empty());
    }
}
