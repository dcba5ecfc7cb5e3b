//! Univariate analysis: descriptive statistics over a single numeric sample.

mod percentiles;
mod sample;
mod summary;

pub mod confidence;
pub mod outliers;

pub use self::percentiles::Percentiles;
pub use self::sample::Sample;
pub use self::summary::Summary;
