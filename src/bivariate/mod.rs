//! Bivariate analysis: paired `(X, Y)` observations.

pub mod correlation;
pub mod regression;

use crate::float::Float;

/// Bivariate `(X, Y)` data
///
/// Invariants:
///
/// - Both slices have the same length
/// - No non-finite values in the data
pub struct Data<'a, A>(&'a [A], &'a [A]);

impl<'a, A> Copy for Data<'a, A> {}

#[allow(clippy::expl_impl_clone_on_copy)]
impl<'a, A> Clone for Data<'a, A> {
    fn clone(&self) -> Data<'a, A> {
        *self
    }
}

impl<'a, A> Data<'a, A>
where
    A: Float,
{
    /// Creates a new data set from two existing slices
    ///
    /// # Panics
    ///
    /// Panics if the slices have different lengths or contain non-finite
    /// values. Mismatched lengths are a programmer error, not a data error,
    /// and surface immediately.
    pub fn new(xs: &'a [A], ys: &'a [A]) -> Data<'a, A> {
        assert!(
            xs.len() == ys.len()
                && xs.iter().all(|x| x.is_finite())
                && ys.iter().all(|y| y.is_finite())
        );

        Data(xs, ys)
    }

    /// Returns the length of the data set
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks whether the data set is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `X` coordinates
    pub fn xs(&self) -> &'a [A] {
        self.0
    }

    /// The `Y` coordinates
    pub fn ys(&self) -> &'a [A] {
        self.1
    }

    /// Iterate over the paired observations
    pub fn iter(&self) -> impl Iterator<Item = (A, A)> + 'a {
        self.0.iter().zip(self.1).map(|(&x, &y)| (x, y))
    }
}
