//! Confidence interval on the mean
//!
//! This is the one place in the engine that uses the sample (`n - 1`)
//! standard deviation; every other spread computation is population-based.
//! The two conventions coexist on purpose: unifying them would silently
//! shift either the interval widths or every published index, and the
//! historical calibration of both is tied to the convention each used.

use crate::float::Float;
use crate::univariate::Sample;

/// Confidence levels the engine publishes results at.
///
/// The same critical values drive the Getis-Ord Gi* hotspot cutoffs, see
/// [`spatial::hotspot`](crate::spatial::hotspot).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    /// 90% (z = 1.645)
    P90,
    /// 95% (z = 1.96)
    P95,
    /// 99% (z = 2.576)
    P99,
}

impl ConfidenceLevel {
    /// Two-tailed standard-normal critical value for this level
    pub fn z_score(self) -> f64 {
        match self {
            ConfidenceLevel::P90 => 1.645,
            ConfidenceLevel::P95 => 1.96,
            ConfidenceLevel::P99 => 2.576,
        }
    }
}

/// A symmetric confidence interval around the sample mean
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval<A> {
    pub level: ConfidenceLevel,
    pub mean: A,
    pub lower_bound: A,
    pub upper_bound: A,
    pub margin: A,
}

/// Computes the confidence interval of the mean of `values`:
/// `mean ± z * s / sqrt(n)` with `s` the sample (`n - 1`) standard
/// deviation.
///
/// Non-finite values are dropped first. Fewer than two finite values leave
/// no spread estimate, so the interval collapses onto the mean (or onto
/// zero for empty input).
pub fn interval<A>(values: &[A], level: ConfidenceLevel) -> ConfidenceInterval<A>
where
    A: Float,
{
    let _0 = A::cast(0);

    let clean = values
        .iter()
        .cloned()
        .filter(|x| x.is_finite())
        .collect::<Vec<_>>();

    if clean.is_empty() {
        return ConfidenceInterval {
            level,
            mean: _0,
            lower_bound: _0,
            upper_bound: _0,
            margin: _0,
        };
    }

    let sample = Sample::new(&clean);
    let mean = sample.mean();
    let n = clean.len();

    if n < 2 {
        return ConfidenceInterval {
            level,
            mean,
            lower_bound: mean,
            upper_bound: mean,
            margin: _0,
        };
    }

    // Bessel's correction: population variance rescaled by n / (n - 1)
    let sample_var = sample.var(Some(mean)) * A::cast(n) / A::cast(n - 1);
    let std_err = (sample_var / A::cast(n)).sqrt();
    let margin = A::cast(level.z_score() as f32) * std_err;

    ConfidenceInterval {
        level,
        mean,
        lower_bound: mean - margin,
        upper_bound: mean + margin,
        margin,
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::{interval, ConfidenceLevel};

    #[test]
    fn empty_input_collapses_to_zero() {
        let ci = interval::<f64>(&[], ConfidenceLevel::P95);

        assert_relative_eq!(ci.mean, 0.0);
        assert_relative_eq!(ci.lower_bound, 0.0);
        assert_relative_eq!(ci.upper_bound, 0.0);
    }

    #[test]
    fn single_point_has_zero_margin() {
        let ci = interval(&[5.0_f64], ConfidenceLevel::P99);

        assert_relative_eq!(ci.mean, 5.0);
        assert_relative_eq!(ci.margin, 0.0);
    }

    #[test]
    fn uses_sample_variance_not_population() {
        // values 1..=4: population var = 1.25, sample var = 5/3
        let ci = interval(&[1.0_f64, 2.0, 3.0, 4.0], ConfidenceLevel::P95);
        let expected_margin = 1.96 * (5.0_f64 / 3.0 / 4.0).sqrt();

        assert_relative_eq!(ci.margin, expected_margin, epsilon = 1e-6);
        assert_relative_eq!(ci.lower_bound, 2.5 - expected_margin, epsilon = 1e-6);
        assert_relative_eq!(ci.upper_bound, 2.5 + expected_margin, epsilon = 1e-6);
    }

    #[test]
    fn wider_level_widens_the_interval() {
        let values = [3.0_f64, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let p90 = interval(&values, ConfidenceLevel::P90);
        let p99 = interval(&values, ConfidenceLevel::P99);

        assert!(p99.margin > p90.margin);
    }
}
