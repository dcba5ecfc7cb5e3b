//! Regression analysis

use crate::bivariate::Data;
use crate::float::Float;

/// A fitted straight line `y = slope * x + intercept`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line<A> {
    pub slope: A,
    pub intercept: A,
}

impl<A> Line<A>
where
    A: Float,
{
    /// Fits the data to a straight line using ordinary least squares
    ///
    /// Degenerate input degrades instead of dividing by zero: with fewer
    /// than two points, or with all `x` values identical, the fit is the
    /// flat line through the mean of `y` (slope zero).
    ///
    /// - Time: `O(length)`
    pub fn fit(data: &Data<'_, A>) -> Line<A> {
        let _0 = A::cast(0);
        let xs = data.xs();
        let ys = data.ys();
        let n = data.len();

        if n < 2 {
            return Line {
                slope: _0,
                intercept: if n == 1 { ys[0] } else { _0 },
            };
        }

        let n = A::cast(n);
        let x_bar = crate::sum(xs) / n;
        let y_bar = crate::sum(ys) / n;

        let ss_xy = crate::dot(xs, ys) - n * x_bar * y_bar;
        let ss_xx = crate::dot(xs, xs) - n * x_bar * x_bar;

        if ss_xx == _0 {
            return Line {
                slope: _0,
                intercept: y_bar,
            };
        }

        let slope = ss_xy / ss_xx;

        Line {
            slope,
            intercept: y_bar - slope * x_bar,
        }
    }

    /// Evaluates the fitted line at `x`
    pub fn predict(&self, x: A) -> A {
        self.slope * x + self.intercept
    }

    /// Computes the goodness of fit (coefficient of determination) for this
    /// data set
    ///
    /// Zero total variance in `y` means there is nothing to explain; the
    /// fit is reported as zero rather than undefined.
    ///
    /// - Time: `O(length)`
    pub fn r_squared(&self, data: &Data<'_, A>) -> A {
        let _0 = A::cast(0);
        let _1 = A::cast(1);

        if data.len() < 2 {
            return _0;
        }

        let n = A::cast(data.len());
        let y_bar = crate::sum(data.ys()) / n;

        let mut ss_res = _0;
        let mut ss_tot = _0;

        for (x, y) in data.iter() {
            ss_res = ss_res + (y - self.predict(x)).powi(2);
            ss_tot = ss_tot + (y - y_bar).powi(2);
        }

        if ss_tot == _0 {
            _0
        } else {
            _1 - ss_res / ss_tot
        }
    }
}
