//! Global spatial autocorrelation (Moran's I)

use crate::spatial::SpatialPoint;

/// Reading of the global Moran statistic
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpretation {
    /// Significant positive autocorrelation: similar values cluster
    Agrupado,
    /// Significant negative autocorrelation: dissimilar values alternate
    Disperso,
    /// No significant spatial structure
    Aleatorio,
}

/// Result of a global Moran's I computation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoransI {
    pub index: f64,
    /// Expected value under the null, `-1 / (n - 1)`
    pub expected: f64,
    pub z_score: f64,
    /// Two-tailed p-value under the normality assumption
    pub p_value: f64,
    /// Number of directed edges in the binary weight matrix
    pub total_weight: f64,
    pub interpretation: Interpretation,
}

impl MoransI {
    fn neutral() -> MoransI {
        MoransI {
            index: 0.0,
            expected: 0.0,
            z_score: 0.0,
            p_value: 1.0,
            total_weight: 0.0,
            interpretation: Interpretation::Aleatorio,
        }
    }
}

/// Computes global Moran's I over `points` with a binary weight matrix:
/// `w[i][j] = 1` iff `i != j` and the points lie within
/// `distance_threshold` of each other.
///
/// Fewer than 3 points, a disconnected weight matrix (zero total weight)
/// or zero variance in the values all yield the neutral result instead of
/// dividing by zero.
///
/// - Time: `O(n²)`
pub fn morans_i(points: &[SpatialPoint], distance_threshold: f64) -> MoransI {
    let n = points.len();

    if n < 3 {
        return MoransI::neutral();
    }

    let nf = n as f64;
    let mean = points.iter().map(|p| p.value).sum::<f64>() / nf;
    let ss = points.iter().map(|p| (p.value - mean).powi(2)).sum::<f64>();

    // Accumulate W, the cross product, and the row sums needed for the
    // variance of I under normality
    let mut total_weight = 0.0_f64;
    let mut cross = 0.0_f64;
    let mut row_sums = vec![0.0_f64; n];

    for (i, a) in points.iter().enumerate() {
        for (j, b) in points.iter().enumerate() {
            if i == j || a.distance(b) > distance_threshold {
                continue;
            }

            total_weight += 1.0;
            cross += (a.value - mean) * (b.value - mean);
            row_sums[i] += 1.0;
        }
    }

    if total_weight == 0.0 || ss == 0.0 {
        let mut neutral = MoransI::neutral();
        neutral.total_weight = total_weight;
        neutral.expected = -1.0 / (nf - 1.0);
        return neutral;
    }

    let index = (nf / total_weight) * (cross / ss);
    let expected = -1.0 / (nf - 1.0);

    // Variance under the normality assumption. The weight matrix is binary
    // and symmetric, so s1 = 2W and s2 = sum of (2 * row_sum)^2.
    let w = total_weight;
    let s1 = 2.0 * w;
    let s2 = row_sums.iter().map(|r| (2.0 * r).powi(2)).sum::<f64>();
    let variance =
        (nf * nf * s1 - nf * s2 + 3.0 * w * w) / (w * w * (nf * nf - 1.0)) - expected * expected;

    let (z_score, p_value) = if variance > 0.0 {
        let z = (index - expected) / variance.sqrt();

        (z, crate::two_tailed(z))
    } else {
        (0.0, 1.0)
    };

    let interpretation = if p_value < 0.05 {
        if index > expected {
            Interpretation::Agrupado
        } else {
            Interpretation::Disperso
        }
    } else {
        Interpretation::Aleatorio
    };

    MoransI {
        index,
        expected,
        z_score,
        p_value,
        total_weight,
        interpretation,
    }
}
