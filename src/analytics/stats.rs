//! Pure statistical routines for correlation analytics.
//!
//! Degenerate input (length mismatch, empty series, zero variance) yields a
//! neutral 0.0 rather than an error: correlation is mathematically undefined
//! there, and callers treat 0.0 as "no detectable relationship".

/// Pearson correlation coefficient of two equal-length series.
///
/// Returns 0.0 when the series are empty, lengths differ, or either side has
/// zero variance. The result is clamped to [-1, 1] to absorb floating-point
/// drift at the boundaries.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.is_empty() || x.len() != y.len() {
        return 0.0;
    }

    let n = x.len() as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y.iter()).map(|(a, b)| a * b).sum();
    let sum_x2: f64 = x.iter().map(|a| a * a).sum();
    let sum_y2: f64 = y.iter().map(|b| b * b).sum();

    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }

    ((n * sum_xy - sum_x * sum_y) / denominator).clamp(-1.0, 1.0)
}

/// Best lag found by [`lead_lag`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeadLagResult {
    /// Positive lag means x leads y by that many steps
    pub lag: i64,
    /// Signed correlation at the best lag
    pub strength: f64,
}

/// Overlapping windows of `x` and `y` at a given lag. Positive lag shifts x
/// forward relative to y (x leads y). Empty slices when the shift exhausts
/// the overlap.
fn shifted_windows<'a>(x: &'a [f64], y: &'a [f64], lag: i64) -> (&'a [f64], &'a [f64]) {
    let n = x.len().min(y.len());
    let k = lag.unsigned_abs() as usize;
    if k >= n {
        return (&[], &[]);
    }
    if lag >= 0 {
        (&x[..n - k], &y[k..n])
    } else {
        (&x[k..n], &y[..n - k])
    }
}

/// Lead-lag cross-correlation: scans every integer lag in
/// `[-max_lag, +max_lag]` and keeps the one with the maximum absolute
/// correlation of the overlapping windows.
///
/// Ties resolve to the smallest |lag|, then to the lag encountered first in
/// scan order. Lags whose overlap window is empty are skipped entirely, so a
/// genuinely weak but defined correlation always beats an undefined one.
/// With no valid candidate at all the result is lag 0, strength 0.0.
pub fn lead_lag(x: &[f64], y: &[f64], max_lag: usize) -> LeadLagResult {
    let mut best: Option<LeadLagResult> = None;

    for lag in -(max_lag as i64)..=(max_lag as i64) {
        let (wx, wy) = shifted_windows(x, y, lag);
        if wx.is_empty() {
            continue;
        }
        let strength = pearson_correlation(wx, wy);
        let replace = match best {
            Some(b) => {
                strength.abs() > b.strength.abs()
                    || (strength.abs() == b.strength.abs() && lag.abs() < b.lag.abs())
            }
            None => true,
        };
        if replace {
            best = Some(LeadLagResult { lag, strength });
        }
    }

    best.unwrap_or(LeadLagResult {
        lag: 0,
        strength: 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_perfect_self_correlation() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((pearson_correlation(&x, &x) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_perfect_inverse_correlation() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [5.0, 4.0, 3.0, 2.0, 1.0];
        assert!((pearson_correlation(&x, &y) - (-1.0)).abs() < EPS);
    }

    #[test]
    fn test_symmetry() {
        let x = [1.0, 3.0, 2.0, 5.0, 4.0];
        let y = [2.0, 1.0, 4.0, 3.0, 6.0];
        assert_eq!(pearson_correlation(&x, &y), pearson_correlation(&y, &x));
    }

    #[test]
    fn test_result_bounded() {
        let x = [0.001, 12345.6, -42.0, 7.7, 0.0, 3.3];
        let y = [9.9, -0.004, 88.1, -3.2, 55.5, 1.0];
        let r = pearson_correlation(&x, &y);
        assert!((-1.0..=1.0).contains(&r));
    }

    #[test]
    fn test_degenerate_inputs_return_zero() {
        // Zero variance
        assert_eq!(pearson_correlation(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), 0.0);
        // Length mismatch
        assert_eq!(pearson_correlation(&[1.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
        // Empty
        assert_eq!(pearson_correlation(&[], &[]), 0.0);
    }

    #[test]
    fn test_lead_lag_zero_matches_pearson() {
        let x = [1.0, 2.0, 4.0, 3.0, 5.0];
        let y = [2.0, 3.0, 3.0, 5.0, 6.0];
        let result = lead_lag(&x, &y, 0);
        assert_eq!(result.lag, 0);
        assert_eq!(result.strength, pearson_correlation(&x, &y));
    }

    #[test]
    fn test_lead_lag_detects_shift() {
        // y is x delayed by 2 steps: x leads y, so the best lag is +2
        let x = [1.0, 4.0, 2.0, 8.0, 3.0, 9.0, 5.0, 7.0];
        let mut y = vec![0.0, 0.0];
        y.extend_from_slice(&x[..x.len() - 2]);
        let result = lead_lag(&x, &y, 3);
        assert_eq!(result.lag, 2);
        assert!((result.strength - 1.0).abs() < EPS);
    }

    #[test]
    fn test_lead_lag_negative_shift() {
        // x is y delayed by 2 steps: y leads, so the best lag is -2
        let y = [1.0, 4.0, 2.0, 8.0, 3.0, 9.0, 5.0, 7.0];
        let mut x = vec![0.0, 0.0];
        x.extend_from_slice(&y[..y.len() - 2]);
        let result = lead_lag(&x, &y, 3);
        assert_eq!(result.lag, -2);
        assert!((result.strength - 1.0).abs() < EPS);
    }

    #[test]
    fn test_lead_lag_oversized_max_lag() {
        // max_lag >= len: the out-of-range candidates are skipped, the
        // in-range ones still compete
        let x = [1.0, 2.0, 3.0];
        let y = [1.0, 2.0, 3.0];
        let result = lead_lag(&x, &y, 10);
        assert_eq!(result.lag, 0);
        assert!((result.strength - 1.0).abs() < EPS);
    }

    #[test]
    fn test_lead_lag_empty_input() {
        let result = lead_lag(&[], &[], 3);
        assert_eq!(result.lag, 0);
        assert_eq!(result.strength, 0.0);
    }

    #[test]
    fn test_lead_lag_all_zero_ties_resolve_to_zero_lag() {
        // Constant series: every candidate correlation is 0.0, so the
        // smallest |lag| wins and the pair reads as simultaneous
        let x = [1.0, 1.0, 1.0, 1.0, 1.0];
        let y = [2.0, 3.0, 2.0, 3.0, 2.0];
        let result = lead_lag(&x, &y, 2);
        assert_eq!(result.lag, 0);
        assert_eq!(result.strength, 0.0);
    }
}
