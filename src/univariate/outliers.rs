//! Tukey's fences
//!
//! Outlying observations are classified against fences derived from the
//! quartiles of the sample:
//!
//! ``` ignore
//! let iqr = q3 - q1;
//! let (f1, f2) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);  // inner fences
//! let (f3, f4) = (q1 - 3.0 * iqr, q3 + 3.0 * iqr);  // outer fences
//! ```
//!
//! Anything strictly outside the inner fences is an outlier; anything also
//! outside the outer fences is a severe one. The severity split feeds the
//! alerting layer, which treats severe egg-count spikes differently from
//! mild ones.
//!
//! Input order is retained: every reported outlier carries its index into
//! the original (unsorted) slice.

use crate::float::Float;
use crate::univariate::Sample;

/// Position of an observation relative to the fences
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    /// Below the inner low fence, within the outer one
    LowMild,
    /// Below the outer low fence
    LowSevere,
    /// Above the inner high fence, within the outer one
    HighMild,
    /// Above the outer high fence
    HighSevere,
    /// Inside the inner fences
    NotAnOutlier,
}

impl Label {
    /// Checks if the observation is labeled as an outlier
    pub fn is_outlier(&self) -> bool {
        !matches!(*self, Label::NotAnOutlier)
    }

    /// Checks if the observation is labeled as a "severe" outlier
    pub fn is_severe(&self) -> bool {
        matches!(*self, Label::LowSevere | Label::HighSevere)
    }
}

/// A single outlying observation, with its position in the input slice
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Outlier<A> {
    pub index: usize,
    pub value: A,
    pub label: Label,
}

/// Outcome of classifying a slice against Tukey's fences
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Outliers<A> {
    /// `(low outer, low inner, high inner, high outer)` fences
    pub fences: (A, A, A, A),
    pub outliers: Vec<Outlier<A>>,
}

impl<A> Outliers<A> {
    /// Indices of the outlying observations in the original input order
    pub fn indices(&self) -> Vec<usize> {
        self.outliers.iter().map(|o| o.index).collect()
    }

    /// Values of the outlying observations in the original input order
    pub fn values(&self) -> Vec<A>
    where
        A: Copy,
    {
        self.outliers.iter().map(|o| o.value).collect()
    }
}

/// Classifies `values` against Tukey's fences.
///
/// Non-finite values never classify as outliers; they are ignored for fence
/// computation and skipped in the report. Fewer than two finite values
/// cannot produce fences, so the result is empty.
///
/// - Time: `O(N log N) where N = length`
pub fn detect<A>(values: &[A]) -> Outliers<A>
where
    A: Float,
    usize: cast::From<A, Output = Result<usize, cast::Error>>,
{
    let _0 = A::cast(0);

    let clean = values
        .iter()
        .cloned()
        .filter(|x| x.is_finite())
        .collect::<Vec<_>>();

    if clean.len() < 2 {
        return Outliers {
            fences: (_0, _0, _0, _0),
            outliers: Vec::new(),
        };
    }

    let (q1, _, q3) = Sample::new(&clean).percentiles().quartiles();
    let iqr = q3 - q1;

    // Mild
    let k_m = A::cast(1.5_f32);
    // Severe
    let k_s = A::cast(3);

    let fences = (
        q1 - k_s * iqr,
        q1 - k_m * iqr,
        q3 + k_m * iqr,
        q3 + k_s * iqr,
    );
    let (lost, lomt, himt, hist) = fences;

    let outliers = values
        .iter()
        .enumerate()
        .filter(|(_, x)| x.is_finite())
        .filter_map(|(index, &x)| {
            let label = if x < lost {
                Label::LowSevere
            } else if x > hist {
                Label::HighSevere
            } else if x < lomt {
                Label::LowMild
            } else if x > himt {
                Label::HighMild
            } else {
                Label::NotAnOutlier
            };

            if label.is_outlier() {
                Some(Outlier { index, value: x, label })
            } else {
                None
            }
        })
        .collect();

    Outliers { fences, outliers }
}
