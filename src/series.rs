//! Time-series helpers: trend classification and naive forecasting.

use crate::bivariate::regression::Line;
use crate::bivariate::Data;
use crate::float::Float;

/// Direction of a series over time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Crescente,
    Decrescente,
    Estavel,
}

/// Outcome of regressing a series against its index positions
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis<A> {
    pub trend: Trend,
    /// Change per period, from the OLS fit
    pub slope: A,
    /// Goodness of fit of the trend line (`r²`)
    pub strength: A,
}

/// Classifies the trend of `series` by regressing it against index
/// position. Slopes within `±0.1` per period count as stable.
///
/// Series shorter than two points are stable with zero slope.
pub fn trend_of<A>(series: &[A]) -> TrendAnalysis<A>
where
    A: Float,
{
    let xs = (0..series.len())
        .map(|i| A::cast(i))
        .collect::<Vec<_>>();
    let data = Data::new(&xs, series);
    let line = Line::fit(&data);

    let threshold = A::cast(0.1_f32);
    let trend = if line.slope.abs() < threshold {
        Trend::Estavel
    } else if line.slope > A::cast(0) {
        Trend::Crescente
    } else {
        Trend::Decrescente
    };

    TrendAnalysis {
        trend,
        slope: line.slope,
        strength: line.r_squared(&data).abs(),
    }
}

/// Forecasts `periods` future points by repeating the trailing moving
/// average of width `window`.
///
/// Each forecast point is the mean of the last `window` values *including
/// previously forecast points*; the recursion is the historical behavior of
/// the dashboard's projection panel and is kept as-is. An empty series or a
/// zero window forecasts nothing.
pub fn moving_average_forecast<A>(series: &[A], window: usize, periods: usize) -> Vec<A>
where
    A: Float,
{
    if series.is_empty() || window == 0 {
        return Vec::new();
    }

    let mut extended = series.to_vec();
    let mut forecast = Vec::with_capacity(periods);

    for _ in 0..periods {
        let tail = &extended[extended.len().saturating_sub(window)..];
        let next = crate::sum(tail) / A::cast(tail.len());

        forecast.push(next);
        extended.push(next);
    }

    forecast
}
