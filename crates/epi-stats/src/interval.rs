//! Wald confidence intervals for proportions.
//!
//! The interval is `p ± z * sqrt(p * (1 - p) / n)` with `z` the standard
//! normal quantile at `1 - alpha / 2`. Bounds are not clamped to [0, 1].

use std::fmt;

use epi_common::{format_decimal, round_to};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::{EpiError, Result};

/// Significance level used when the caller has no preference (95% interval).
pub const DEFAULT_ALPHA: f64 = 0.05;

/// A point estimate with its two-sided interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProportionInterval {
    pub estimate: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ProportionInterval {
    /// Multiplies estimate and bounds by `factor` (100 for percentages).
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            estimate: self.estimate * factor,
            lower: self.lower * factor,
            upper: self.upper * factor,
        }
    }

    /// Half-width of the interval.
    pub fn margin(&self) -> f64 {
        self.upper - self.estimate
    }

    /// Renders `"estimate (lower-upper)"` with every value rounded to `decimals`.
    pub fn format(&self, decimals: usize) -> String {
        format!(
            "{} ({}-{})",
            format_decimal(round_to(self.estimate, decimals)),
            format_decimal(round_to(self.lower, decimals)),
            format_decimal(round_to(self.upper, decimals)),
        )
    }
}

impl fmt::Display for ProportionInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(2))
    }
}

/// Two-sided standard normal critical value for `alpha`.
pub fn z_critical(alpha: f64) -> Result<f64> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(EpiError::InvalidAlpha { alpha });
    }
    let normal = Normal::standard();
    Ok(normal.inverse_cdf(1.0 - alpha / 2.0))
}

/// Wald interval for a proportion `p` observed in a sample of `n`.
pub fn wald_interval(n: usize, p: f64, alpha: f64) -> Result<ProportionInterval> {
    if n == 0 {
        return Err(EpiError::InvalidSampleSize { n });
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(EpiError::InvalidProportion { p });
    }
    let z = z_critical(alpha)?;
    let margin = z * (p * (1.0 - p) / n as f64).sqrt();
    Ok(ProportionInterval {
        estimate: p,
        lower: p - margin,
        upper: p + margin,
    })
}

/// Confidence interval for a proportion, as `"p (lower-upper)"` to 2 decimals.
///
/// ```
/// use epi_stats::{DEFAULT_ALPHA, prop_error};
///
/// assert_eq!(prop_error(100, 0.5, DEFAULT_ALPHA).unwrap(), "0.5 (0.4-0.6)");
/// ```
pub fn prop_error(n: usize, p: f64, alpha: f64) -> Result<String> {
    Ok(wald_interval(n, p, alpha)?.format(2))
}

/// Confidence interval for a proportion in percent, to 1 decimal.
///
/// ```
/// use epi_stats::{DEFAULT_ALPHA, prop_error_pct};
///
/// assert_eq!(prop_error_pct(100, 0.5, DEFAULT_ALPHA).unwrap(), "50.0 (40.2-59.8)");
/// ```
pub fn prop_error_pct(n: usize, p: f64, alpha: f64) -> Result<String> {
    Ok(wald_interval(n, p, alpha)?.scaled(100.0).format(1))
}
