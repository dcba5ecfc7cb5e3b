//! Pearson correlation with significance

use crate::bivariate::Data;

/// Qualitative strength of a correlation, by absolute coefficient
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    /// `|r| < 0.3`
    Fraca,
    /// `0.3 <= |r| < 0.5`
    Moderada,
    /// `0.5 <= |r| < 0.7`
    Forte,
    /// `|r| >= 0.7`
    MuitoForte,
}

/// Sign of a correlation, with a dead zone around zero
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// `r > 0.1`
    Positiva,
    /// `r < -0.1`
    Negativa,
    /// `-0.1 <= r <= 0.1`
    Nenhuma,
}

/// Pearson correlation between two paired samples
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    pub coefficient: f64,
    /// Two-tailed p-value from the t-statistic of the coefficient
    pub p_value: f64,
    pub strength: Strength,
    pub direction: Direction,
}

/// Computes the Pearson correlation of `data`.
///
/// Fewer than three points, or zero variance on either axis, yields the
/// neutral result (coefficient 0, p-value 1).
pub fn pearson(data: &Data<'_, f64>) -> Correlation {
    let n = data.len();

    if n < 3 {
        return classify(0.0, 1.0);
    }

    let nf = n as f64;
    let x_bar = crate::sum(data.xs()) / nf;
    let y_bar = crate::sum(data.ys()) / nf;

    let ss_xy = crate::dot(data.xs(), data.ys()) - nf * x_bar * y_bar;
    let ss_xx = crate::dot(data.xs(), data.xs()) - nf * x_bar * x_bar;
    let ss_yy = crate::dot(data.ys(), data.ys()) - nf * y_bar * y_bar;

    if ss_xx == 0.0 || ss_yy == 0.0 {
        return classify(0.0, 1.0);
    }

    let r = (ss_xy / (ss_xx * ss_yy).sqrt()).max(-1.0).min(1.0);

    classify(r, p_value(r, n))
}

fn classify(r: f64, p: f64) -> Correlation {
    let strength = match r.abs() {
        a if a < 0.3 => Strength::Fraca,
        a if a < 0.5 => Strength::Moderada,
        a if a < 0.7 => Strength::Forte,
        _ => Strength::MuitoForte,
    };

    let direction = if r > 0.1 {
        Direction::Positiva
    } else if r < -0.1 {
        Direction::Negativa
    } else {
        Direction::Nenhuma
    };

    Correlation {
        coefficient: r,
        p_value: p,
        strength,
        direction,
    }
}

/// Two-tailed p-value of `r` over `n` pairs: `t = r * sqrt((n-2)/(1-r^2))`
/// referred to a Student-t distribution with `n - 2` degrees of freedom.
fn p_value(r: f64, n: usize) -> f64 {
    let df = (n - 2) as f64;
    let r2 = r * r;

    if r2 >= 1.0 {
        return 0.0;
    }

    let t = r.abs() * (df / (1.0 - r2)).sqrt();

    2.0 * (1.0 - student_t_cdf(t, df))
}

/// CDF of the Student-t distribution via the normal approximation
/// `z = t * (1 - 1/(4 df)) / sqrt(1 + t^2 / (2 df))`, adequate for the
/// rough significance magnitudes the dashboard reports.
fn student_t_cdf(t: f64, df: f64) -> f64 {
    let z = t * (1.0 - 1.0 / (4.0 * df)) / (1.0 + t * t / (2.0 * df)).sqrt();

    crate::normal_cdf(z)
}
