use crate::float::Float;
use crate::univariate::Sample;

/// Descriptive statistics of a numeric sample, computed in one call.
///
/// This is the engine's answer shape for every "describe these values"
/// request on the dashboard side: egg counts per collection, per
/// neighborhood aggregates, weekly series, and so on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary<A> {
    pub mean: A,
    pub median: A,
    /// Most frequent value; ties break to the value encountered first.
    pub mode: A,
    /// Population standard deviation (`n` divisor).
    pub std_dev: A,
    /// Population variance (`n` divisor).
    pub variance: A,
    pub min: A,
    pub max: A,
    pub q1: A,
    pub q3: A,
    pub iqr: A,
    /// Coefficient of variation in percent; zero when the mean is zero.
    pub cv: A,
    pub skewness: A,
    /// Excess kurtosis; zero when the standard deviation is zero.
    pub kurtosis: A,
}

impl<A> Summary<A>
where
    A: Float + Default,
    usize: cast::From<A, Output = Result<usize, cast::Error>>,
{
    /// Computes the summary of `values`.
    ///
    /// Non-finite values are dropped before computing. An input with no
    /// finite values yields the all-zero summary rather than an error:
    /// callers render "no data" states from it without special-casing.
    pub fn of(values: &[A]) -> Summary<A> {
        let clean = values
            .iter()
            .cloned()
            .filter(|x| x.is_finite())
            .collect::<Vec<_>>();

        if clean.is_empty() {
            return Summary::default();
        }

        let sample = Sample::new(&clean);
        let mean = sample.mean();
        let variance = sample.var(Some(mean));
        let std_dev = variance.sqrt();

        let percentiles = sample.percentiles();
        let (q1, median, q3) = percentiles.quartiles();

        Summary {
            mean,
            median,
            mode: mode(&clean),
            std_dev,
            variance,
            min: sample.min(),
            max: sample.max(),
            q1,
            q3,
            iqr: q3 - q1,
            cv: sample.coef_of_variation(),
            skewness: sample.skewness(),
            kurtosis: sample.kurtosis(),
        }
    }
}

/// Returns the most frequent value; on ties, the value that first reached
/// the maximal frequency in input order wins.
fn mode<A>(values: &[A]) -> A
where
    A: Float,
{
    // NB Floats are not hashable, so this is a quadratic scan. Sample sizes
    // here are collection batches, not time series, and stay small.
    let frequency = |candidate: A| values.iter().filter(|&&x| x == candidate).count();

    let best = values.iter().map(|&x| frequency(x)).max().unwrap_or(0);

    values
        .iter()
        .cloned()
        .find(|&x| frequency(x) == best)
        .unwrap_or_else(|| values[0])
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use quickcheck::quickcheck;
    use quickcheck::TestResult;

    use super::Summary;

    #[test]
    fn empty_input_yields_all_zero_summary() {
        let summary = Summary::<f64>::of(&[]);

        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn non_finite_values_are_dropped_not_propagated() {
        let summary = Summary::of(&[1.0_f64, f64::NAN, 3.0, f64::INFINITY]);

        assert_relative_eq!(summary.mean, 2.0);
        assert_relative_eq!(summary.min, 1.0);
        assert_relative_eq!(summary.max, 3.0);
        assert!(summary.mean.is_finite());
    }

    #[test]
    fn all_non_finite_behaves_like_empty() {
        let summary = Summary::of(&[f64::NAN, f64::NEG_INFINITY]);

        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn singleton_summary() {
        let summary = Summary::of(&[7.0_f64]);

        assert_relative_eq!(summary.mean, 7.0);
        assert_relative_eq!(summary.median, 7.0);
        assert_relative_eq!(summary.mode, 7.0);
        assert_relative_eq!(summary.std_dev, 0.0);
        assert_relative_eq!(summary.variance, 0.0);
    }

    #[test]
    fn mode_ties_break_to_first_encountered() {
        // 2.0 and 1.0 both appear twice; 2.0 is seen first
        let summary = Summary::of(&[2.0_f64, 1.0, 2.0, 1.0, 3.0]);

        assert_relative_eq!(summary.mode, 2.0);
    }

    quickcheck! {
        fn quartiles_are_ordered(values: Vec<f64>) -> TestResult {
            let finite = values.iter().filter(|x| x.is_finite()).count();

            if finite == 0 {
                return TestResult::discard();
            }

            let s = Summary::of(&values);

            TestResult::from_bool(
                s.min <= s.q1 && s.q1 <= s.median && s.median <= s.q3 && s.q3 <= s.max,
            )
        }
    }
}
