use crate::float::Float;
use cast::usize;

/// A "view" into the percentiles of a sample
///
/// All percentile-shaped values in the engine (quartiles, p25/p50/p75/p90)
/// go through [`at`](Percentiles::at), so every consumer shares the same
/// linear-interpolation convention.
pub struct Percentiles<A>(Box<[A]>)
where
    A: Float;

impl<A> Percentiles<A>
where
    A: Float,
    usize: cast::From<A, Output = Result<usize, cast::Error>>,
{
    /// Wraps an already-sorted, non-empty boxed slice.
    pub(crate) fn from_sorted(sorted: Box<[A]>) -> Percentiles<A> {
        debug_assert!(!sorted.is_empty());

        Percentiles(sorted)
    }

    /// Returns the percentile at `p`%, by linear interpolation: the rank is
    /// `p / 100 * (n - 1)` and the value is interpolated between the two
    /// nearest order statistics by the fractional part of the rank
    ///
    /// # Panics
    ///
    /// Panics if `p` is outside the closed `[0, 100]` range
    pub fn at(&self, p: A) -> A {
        let _0 = A::cast(0);
        let _100 = A::cast(100);

        assert!(p >= _0 && p <= _100);

        let len = self.0.len() - 1;
        let rank = (p / _100) * A::cast(len);
        let integer = rank.floor();
        let fraction = rank - integer;
        let n = usize(integer).unwrap();
        let floor = self.0[n];

        // A zero fraction needs no upper order statistic; this also covers
        // `p = 100` and the single-element view
        if fraction == _0 {
            floor
        } else {
            let ceiling = self.0[n + 1];

            floor + (ceiling - floor) * fraction
        }
    }

    /// Returns the 50th percentile
    pub fn median(&self) -> A {
        self.at(A::cast(50))
    }

    /// Returns the 25th, 50th and 75th percentiles
    pub fn quartiles(&self) -> (A, A, A) {
        (
            self.at(A::cast(25)),
            self.at(A::cast(50)),
            self.at(A::cast(75)),
        )
    }

    /// Returns the interquartile range
    pub fn iqr(&self) -> A {
        let (q1, _, q3) = self.quartiles();

        q3 - q1
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use crate::univariate::Sample;

    #[test]
    fn median_of_even_length_averages_the_middle_pair() {
        let p = Sample::new(&[1.0_f64, 2.0, 3.0, 4.0]).percentiles();

        assert_relative_eq!(p.median(), 2.5);
    }

    #[test]
    fn interpolated_quartiles() {
        // rank(q1) = 0.75 -> between 1 and 2; rank(q3) = 2.25 -> between 3 and 4
        let p = Sample::new(&[1.0_f64, 2.0, 3.0, 4.0]).percentiles();
        let (q1, _, q3) = p.quartiles();

        assert_relative_eq!(q1, 1.75);
        assert_relative_eq!(q3, 3.25);
        assert_relative_eq!(p.iqr(), 1.5);
    }

    #[test]
    fn endpoints() {
        let p = Sample::new(&[3.0_f64, 1.0, 2.0]).percentiles();

        assert_relative_eq!(p.at(0.0), 1.0);
        assert_relative_eq!(p.at(100.0), 3.0);
    }

    #[test]
    fn single_element_view_is_constant() {
        let p = Sample::new(&[8.0_f64]).percentiles();

        assert_relative_eq!(p.at(0.0), 8.0);
        assert_relative_eq!(p.median(), 8.0);
        assert_relative_eq!(p.at(90.0), 8.0);
        assert_relative_eq!(p.at(100.0), 8.0);
    }

    #[test]
    fn p90_interpolates() {
        // rank = 0.9 * 4 = 3.6 -> 4 + 0.6 * (5 - 4)
        let p = Sample::new(&[1.0_f64, 2.0, 3.0, 4.0, 5.0]).percentiles();

        assert_relative_eq!(p.at(90.0), 4.6);
    }
}
