//! Rolling-window kernels over optional-valued series.
//!
//! A missing observation is `None`; every kernel propagates missingness
//! instead of producing partial results.

/// Replace each missing value with the nearest preceding present value.
/// A leading missing run stays missing; there is no backward fill.
pub fn forward_fill(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut filled = Vec::with_capacity(values.len());
    let mut last = None;
    for value in values {
        if value.is_some() {
            last = *value;
        }
        filled.push(last);
    }
    filled
}

/// Trailing arithmetic mean over `window` rows.
///
/// Positions with fewer than `window` rows available, or any missing value
/// inside the window, are `None`; there is no partial average.
pub fn trailing_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    assert!(window >= 1, "window must be >= 1");

    let mut result = vec![None; values.len()];
    for index in (window - 1)..values.len() {
        let sum: Option<f64> = values[index + 1 - window..=index].iter().copied().sum();
        result[index] = sum.map(|sum| sum / window as f64);
    }
    result
}

/// Fractional change versus the value `horizon` rows prior:
/// `(v[i] - v[i - horizon]) / v[i - horizon]` for `i >= horizon`.
///
/// Missing below the horizon, on a missing operand, and on a zero base.
pub fn horizon_return(values: &[Option<f64>], horizon: usize) -> Vec<Option<f64>> {
    assert!(horizon >= 1, "horizon must be >= 1");

    let mut result = vec![None; values.len()];
    for index in horizon..values.len() {
        result[index] = match (values[index - horizon], values[index]) {
            (Some(base), Some(current)) if base != 0.0 => Some((current - base) / base),
            _ => None,
        };
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_fill_propagates_last_known_value() {
        let filled = forward_fill(&[Some(10.0), None, None, Some(13.0)]);
        assert_eq!(filled, vec![Some(10.0), Some(10.0), Some(10.0), Some(13.0)]);
    }

    #[test]
    fn forward_fill_leaves_leading_gap_missing() {
        let filled = forward_fill(&[None, Some(10.0)]);
        assert_eq!(filled, vec![None, Some(10.0)]);
    }

    #[test]
    fn trailing_mean_boundary_on_constant_series() {
        let values = vec![Some(2.5); 8];
        let means = trailing_mean(&values, 5);
        for index in 0..4 {
            assert_eq!(means[index], None, "index {index} lacks a full window");
        }
        for index in 4..8 {
            assert_eq!(means[index], Some(2.5));
        }
    }

    #[test]
    fn trailing_mean_is_missing_when_window_has_a_gap() {
        let values = vec![Some(1.0), None, Some(3.0), Some(4.0), Some(5.0)];
        let means = trailing_mean(&values, 3);
        assert_eq!(means[2], None);
        assert_eq!(means[3], None);
        assert_eq!(means[4], Some(4.0));
    }

    #[test]
    fn trailing_mean_on_short_series_is_all_missing() {
        let values = vec![Some(1.0), Some(2.0)];
        assert!(trailing_mean(&values, 5).iter().all(Option::is_none));
    }

    #[test]
    fn horizon_return_is_exact_on_a_tenth_jump() {
        let mut values = vec![Some(100.0); 7];
        values.push(Some(110.0));
        let returns = horizon_return(&values, 7);
        assert!(returns[..7].iter().all(Option::is_none));
        assert_eq!(returns[7], Some(0.1));
    }

    #[test]
    fn horizon_return_is_missing_on_gap_or_zero_base() {
        let values = vec![Some(0.0), None, Some(2.0), Some(3.0)];
        let returns = horizon_return(&values, 2);
        assert_eq!(returns[2], None, "zero base");
        assert_eq!(returns[3], None, "missing base");
    }
}
