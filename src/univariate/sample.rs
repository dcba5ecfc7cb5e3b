use std::{mem, ops};

use crate::float::Float;
use crate::univariate::Percentiles;

/// A collection of data points drawn from a population
///
/// Invariants:
///
/// - The sample contains at least one data point
/// - The sample contains no non-finite values (no `NaN`, no infinities)
#[repr(transparent)]
pub struct Sample<A>([A]);

impl<A> Sample<A>
where
    A: Float,
{
    /// Creates a new sample from an existing slice
    ///
    /// # Panics
    ///
    /// Panics if `slice` is empty or contains any non-finite value
    #[allow(clippy::new_ret_no_self)]
    pub fn new(slice: &[A]) -> &Sample<A> {
        assert!(!slice.is_empty() && slice.iter().all(|x| x.is_finite()));

        unsafe { mem::transmute(slice) }
    }

    /// Returns the biggest element in the sample
    ///
    /// - Time: `O(length)`
    pub fn max(&self) -> A {
        let mut elems = self.iter();

        match elems.next() {
            Some(&head) => elems.fold(head, |a, &b| a.max(b)),
            // NB `unreachable!` because `Sample` is guaranteed to have at least one data point
            None => unreachable!(),
        }
    }

    /// Returns the smallest element in the sample
    ///
    /// - Time: `O(length)`
    pub fn min(&self) -> A {
        let mut elems = self.iter();

        match elems.next() {
            Some(&elem) => elems.fold(elem, |a, &b| a.min(b)),
            // NB `unreachable!` because `Sample` is guaranteed to have at least one data point
            None => unreachable!(),
        }
    }

    /// Returns the arithmetic average of the sample
    ///
    /// - Time: `O(length)`
    pub fn mean(&self) -> A {
        let n = self.len();

        self.sum() / A::cast(n)
    }

    /// Returns the sum of all the elements of the sample
    ///
    /// - Time: `O(length)`
    pub fn sum(&self) -> A {
        crate::sum(self)
    }

    /// Returns the population variance of the sample (`n` divisor)
    ///
    /// Surveillance indices use the population convention throughout; the
    /// one `n - 1` exception is the confidence interval on the mean, see
    /// [`confidence`](crate::univariate::confidence).
    ///
    /// The `mean` can be optionally passed along to speed up (2X) the
    /// computation
    ///
    /// - Time: `O(length)`
    pub fn var(&self, mean: Option<A>) -> A {
        use std::ops::Add;

        let mean = mean.unwrap_or_else(|| self.mean());

        let sum = self
            .iter()
            .map(|&x| (x - mean).powi(2))
            .fold(A::cast(0), Add::add);

        sum / A::cast(self.len())
    }

    /// Returns the population standard deviation of the sample
    ///
    /// The `mean` can be optionally passed along to speed up (2X) the
    /// computation
    ///
    /// - Time: `O(length)`
    pub fn std_dev(&self, mean: Option<A>) -> A {
        self.var(mean).sqrt()
    }

    /// Returns the coefficient of variation: the standard deviation as a
    /// percentage of the mean, or zero when the mean is zero
    ///
    /// - Time: `O(length)`
    pub fn coef_of_variation(&self) -> A {
        let _0 = A::cast(0);
        let _100 = A::cast(100);
        let mean = self.mean();

        if mean == _0 {
            _0
        } else {
            (self.std_dev(Some(mean)) / mean) * _100
        }
    }

    /// Returns the sample skewness (third standardized moment), or zero
    /// when the standard deviation is zero
    ///
    /// - Time: `O(length)`
    pub fn skewness(&self) -> A {
        self.standardized_moment(3)
    }

    /// Returns the excess kurtosis (fourth standardized moment minus 3),
    /// or zero when the standard deviation is zero
    ///
    /// - Time: `O(length)`
    pub fn kurtosis(&self) -> A {
        let _0 = A::cast(0);
        let m4 = self.standardized_moment(4);

        if m4 == _0 {
            _0
        } else {
            m4 - A::cast(3)
        }
    }

    fn standardized_moment(&self, k: i32) -> A {
        use std::ops::Add;

        let _0 = A::cast(0);
        let mean = self.mean();
        let std_dev = self.std_dev(Some(mean));

        if std_dev == _0 {
            return _0;
        }

        let n = A::cast(self.len());
        let sum = self
            .iter()
            .map(|&x| ((x - mean) / std_dev).powi(k))
            .fold(_0, Add::add);

        sum / n
    }

    /// Returns a "view" into the percentiles of the sample
    ///
    /// This "view" makes consecutive computations of percentiles much faster (`O(1)`)
    ///
    /// - Time: `O(N log N) where N = length`
    /// - Memory: `O(length)`
    pub fn percentiles(&self) -> Percentiles<A>
    where
        usize: cast::From<A, Output = Result<usize, cast::Error>>,
    {
        use std::cmp::Ordering;

        // NB This function assumes that there are no `NaN`s in the sample
        fn cmp<T>(a: &T, b: &T) -> Ordering
        where
            T: PartialOrd,
        {
            match a.partial_cmp(b) {
                Some(o) => o,
                // Arbitrary way to handle NaNs that should never happen
                None => Ordering::Equal,
            }
        }

        let mut v = self.to_vec().into_boxed_slice();
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            v.par_sort_unstable_by(cmp);
        }
        #[cfg(not(feature = "rayon"))]
        v.sort_unstable_by(cmp);

        Percentiles::from_sorted(v)
    }
}

impl<A> ops::Deref for Sample<A> {
    type Target = [A];

    fn deref(&self) -> &[A] {
        &self.0
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::Sample;

    #[test]
    fn single_point_has_zero_spread() {
        let sample = Sample::new(&[42.0_f64]);

        assert_relative_eq!(sample.mean(), 42.0);
        assert_relative_eq!(sample.var(None), 0.0);
        assert_relative_eq!(sample.std_dev(None), 0.0);
        assert_relative_eq!(sample.skewness(), 0.0);
        assert_relative_eq!(sample.kurtosis(), 0.0);
    }

    #[test]
    fn population_variance_uses_n_divisor() {
        // ((1-2)^2 + (2-2)^2 + (3-2)^2) / 3
        let sample = Sample::new(&[1.0_f64, 2.0, 3.0]);

        assert_relative_eq!(sample.var(None), 2.0 / 3.0);
    }

    #[test]
    fn cv_is_zero_when_mean_is_zero() {
        let sample = Sample::new(&[-1.0_f64, 1.0]);

        assert_relative_eq!(sample.coef_of_variation(), 0.0);
    }

    #[test]
    fn symmetric_sample_has_zero_skewness() {
        let sample = Sample::new(&[1.0_f64, 2.0, 3.0, 4.0, 5.0]);

        assert_relative_eq!(sample.skewness(), 0.0, epsilon = 1e-12);
    }

    #[test]
    #[should_panic]
    fn non_finite_input_is_rejected() {
        let _ = Sample::new(&[1.0_f64, f64::NAN]);
    }
}
