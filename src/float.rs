//! Float trait

use cast::From;
use num_traits::float;

/// Extension of `num_traits::float::Float` that adds safe casting plus
/// `Sync + Send`, so the optional rayon feature can fan computations out.
pub trait Float:
    float::Float + From<usize, Output = Self> + From<f32, Output = Self> + Sync + Send
{
}

impl Float for f32 {}
impl Float for f64 {}
