// src/data_analysis/signal_checks.rs
//
// Health checks on the raw (pre-normalization) channel data, in volts.
// Each check returns one verdict per column; `true` means the channel is
// flagged as faulty.

use ndarray::{Array2, ArrayView1};

use crate::constants::{
    RAIL_CHECK_MAX_FRACTION, RAIL_CHECK_MIN_LEVEL_V, STATIC_CHECK_MAX_DIFF_RMS_V,
    ZERO_CHECK_MAX_MEAN_ABS_V,
};

fn mean_abs(channel: &ArrayView1<f64>) -> f64 {
    if channel.is_empty() {
        return 0.0;
    }
    channel.iter().map(|v| v.abs()).sum::<f64>() / channel.len() as f64
}

fn diff_rms(channel: &ArrayView1<f64>) -> f64 {
    if channel.len() < 2 {
        return 0.0;
    }
    let sum_sq: f64 = (1..channel.len())
        .map(|i| {
            let d = channel[i] - channel[i - 1];
            d * d
        })
        .sum();
    (sum_sq / (channel.len() - 1) as f64).sqrt()
}

/// Flags channels flatlined near 0V (dead sensor or broken wiring).
pub fn zero_check(signals: &Array2<f64>) -> Vec<bool> {
    signals
        .columns()
        .into_iter()
        .map(|ch| mean_abs(&ch) < ZERO_CHECK_MAX_MEAN_ABS_V)
        .collect()
}

/// Flags channels pinned at the 5V supply rail (short to VCC).
pub fn supply_rail_check(signals: &Array2<f64>) -> Vec<bool> {
    signals
        .columns()
        .into_iter()
        .map(|ch| {
            if ch.is_empty() {
                return false;
            }
            let at_rail = ch.iter().filter(|&&v| v >= RAIL_CHECK_MIN_LEVEL_V).count();
            at_rail as f64 / ch.len() as f64 > RAIL_CHECK_MAX_FRACTION
        })
        .collect()
}

/// Flags channels with no signal activity: the RMS of successive sample
/// differences stays below the static threshold (stuck output).
pub fn static_check(signals: &Array2<f64>) -> Vec<bool> {
    signals
        .columns()
        .into_iter()
        .map(|ch| diff_rms(&ch) < STATIC_CHECK_MAX_DIFF_RMS_V)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{stack, Array1, Axis};
    use std::f64::consts::PI;

    fn test_matrix() -> Array2<f64> {
        let n = 200;
        let time = Array1::linspace(0.0, 1.0, n);
        let healthy = time.mapv(|t| 2.5 + 2.0 * (2.0 * PI * 10.0 * t).sin());
        let dead = Array1::<f64>::zeros(n);
        let shorted = Array1::from_elem(n, 4.97);
        stack(Axis(1), &[healthy.view(), dead.view(), shorted.view()]).unwrap()
    }

    #[test]
    fn test_zero_check_flags_dead_channel() {
        assert_eq!(zero_check(&test_matrix()), vec![false, true, false]);
    }

    #[test]
    fn test_supply_rail_check_flags_shorted_channel() {
        assert_eq!(supply_rail_check(&test_matrix()), vec![false, false, true]);
    }

    #[test]
    fn test_static_check_flags_both_stuck_channels() {
        // Zero and rail-pinned channels both carry no activity.
        assert_eq!(static_check(&test_matrix()), vec![false, true, true]);
    }

    #[test]
    fn test_static_check_too_short_channel_counts_as_static() {
        let signals = Array2::from_shape_vec((1, 1), vec![2.5]).unwrap();
        assert_eq!(static_check(&signals), vec![true]);
    }
}
