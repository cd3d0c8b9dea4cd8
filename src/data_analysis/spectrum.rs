// src/data_analysis/spectrum.rs
//
// Per-channel dominant frequency estimation from a one-sided amplitude
// spectrum. Each column of the signal matrix is an independent channel
// sampled at the shared time vector.

use ndarray::{Array1, Array2};
use ndarray_stats::QuantileExt;
use thiserror::Error;

use crate::data_analysis::fft_utils;

/// Input shape violations rejected at the estimator boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpectrumError {
    #[error("time vector length {time_len} does not match signal row count {rows}")]
    ShapeMismatch { time_len: usize, rows: usize },
    #[error("at least 2 samples required for a one-sided spectrum, got {0}")]
    InsufficientSamples(usize),
}

/// Estimates the sampling frequency as the reciprocal of the mean successive
/// timestamp delta. Assumes near-uniform spacing; with irregular spacing the
/// estimate silently degrades. Requires at least 2 timestamps.
pub fn sampling_frequency(time: &Array1<f64>) -> f64 {
    let n = time.len();
    let mut total_delta = 0.0;
    for i in 1..n {
        total_delta += time[i] - time[i - 1];
    }
    1.0 / (total_delta / (n - 1) as f64)
}

/// Calculates the frequency vector for the one-sided spectrum of an N-sample
/// signal: bin k maps to `sample_rate * k / n` for k in 0..floor(N/2)+1.
pub fn frequency_vector(n: usize, sample_rate: f64) -> Array1<f64> {
    let num_freqs = n / 2 + 1;
    Array1::from_iter((0..num_freqs).map(|k| sample_rate * k as f64 / n as f64))
}

/// Computes the one-sided amplitude spectrum of each column of `signals`.
///
/// The two-sided spectrum `|fft| / N` is folded into floor(N/2)+1 bins:
/// every bin except the first and the last is doubled to account for the
/// mirrored negative-frequency energy. The final bin is never doubled,
/// for odd N as well as even. The DC bin is then forced to zero so that a
/// constant offset can never win the peak search.
///
/// Returns a (floor(N/2)+1) x M matrix, one column per channel.
pub fn one_sided_amplitude_spectrum(signals: &Array2<f64>) -> Array2<f64> {
    let n = signals.nrows();
    let num_freqs = n / 2 + 1;
    let mut spectra = Array2::<f64>::zeros((num_freqs, signals.ncols()));

    for (ch, column) in signals.columns().into_iter().enumerate() {
        let spectrum = fft_utils::fft_forward(&column.to_owned());
        for (k, value) in spectrum.iter().enumerate() {
            let mut amplitude = value.norm() / n as f64;
            if k > 0 && k + 1 < num_freqs {
                amplitude *= 2.0;
            }
            spectra[[k, ch]] = amplitude;
        }
        spectra[[0, ch]] = 0.0;
    }

    spectra
}

/// Estimates the dominant oscillation frequency of each channel.
///
/// For each column the peak-amplitude bin of its one-sided spectrum (DC
/// excluded) is mapped onto the frequency axis. Ties resolve to the
/// lowest-index bin, so an all-zero or pure-DC channel reports 0 Hz.
/// The result always holds exactly one frequency per input column, and the
/// returned values are bin frequencies, never interpolated.
pub fn peak_frequencies(
    time: &Array1<f64>,
    signals: &Array2<f64>,
) -> Result<Vec<f64>, SpectrumError> {
    let n = signals.nrows();
    if time.len() != n {
        return Err(SpectrumError::ShapeMismatch {
            time_len: time.len(),
            rows: n,
        });
    }
    if n < 2 {
        return Err(SpectrumError::InsufficientSamples(n));
    }

    let spectra = one_sided_amplitude_spectrum(signals);
    let sample_rate = sampling_frequency(time);
    let freqs = frequency_vector(n, sample_rate);

    let mut frequencies = Vec::with_capacity(signals.ncols());
    for (col, column) in spectra.columns().into_iter().enumerate() {
        // First-occurrence argmax. A degenerate column (all amplitudes equal,
        // or non-finite values) falls back to the DC bin.
        let peak_bin = column.argmax().unwrap_or(0);

        // The real FFT of a constant channel leaves ~1e-16-relative residue
        // in the non-DC bins. A peak below this floor is numerical leakage,
        // not signal energy, and the channel reports 0 Hz.
        let signal_level =
            signals.column(col).iter().map(|v| v.abs()).sum::<f64>() / n as f64;
        let noise_floor = 1e-12 * signal_level.max(1.0);
        let peak_bin = if column[peak_bin] < noise_floor { 0 } else { peak_bin };

        frequencies.push(freqs[peak_bin]);
    }
    Ok(frequencies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_analysis::normalize::normalise_signal;
    use ndarray::{stack, Axis};
    use std::f64::consts::PI;

    fn sine_channel(time: &Array1<f64>, freq_hz: f64, phase: f64) -> Array1<f64> {
        time.mapv(|t| (2.0 * PI * freq_hz * t + phase).sin())
    }

    #[test]
    fn test_sine_recovered_within_one_bin() {
        let n = 1000;
        let time = Array1::linspace(0.0, 1.0, n);
        let fs = sampling_frequency(&time);
        let bin_width = fs / n as f64;

        let signal = sine_channel(&time, 50.0, 0.0);
        let signals = signal.insert_axis(Axis(1));

        let result = peak_frequencies(&time, &signals).unwrap();
        assert_eq!(result.len(), 1);
        assert!(
            (result[0] - 50.0).abs() <= bin_width,
            "expected ~50 Hz, got {} (bin width {})",
            result[0],
            bin_width
        );
    }

    #[test]
    fn test_sine_recovered_with_odd_sample_count() {
        let n = 101;
        let time = Array1::linspace(0.0, 1.0, n);
        let fs = sampling_frequency(&time);
        let bin_width = fs / n as f64;

        let signal = sine_channel(&time, 10.0, 0.0);
        let signals = signal.insert_axis(Axis(1));

        let result = peak_frequencies(&time, &signals).unwrap();
        assert!((result[0] - 10.0).abs() <= bin_width);
    }

    #[test]
    fn test_zero_and_dc_channels_report_zero() {
        let time = Array1::linspace(0.0, 1.0, 100);
        let zeros = Array1::<f64>::zeros(100);
        let dc = Array1::from_elem(100, 2.5);
        let signals = stack(Axis(1), &[zeros.view(), dc.view()]).unwrap();

        let result = peak_frequencies(&time, &signals).unwrap();
        assert_eq!(result, vec![0.0, 0.0]);
    }

    #[test]
    fn test_large_dc_offset_leakage_does_not_become_a_peak() {
        // FFT rounding residue on a constant channel scales with its level;
        // the no-energy floor must scale with it too.
        let time = Array1::linspace(0.0, 1.0, 100);
        let dc = Array1::from_elem(100, 1.0e6);
        let signals = dc.insert_axis(Axis(1));

        let result = peak_frequencies(&time, &signals).unwrap();
        assert_eq!(result, vec![0.0]);
    }

    #[test]
    fn test_faint_oscillation_is_still_detected() {
        // A genuinely oscillating channel far above the leakage floor must
        // not be mistaken for a dead one.
        let time = Array1::linspace(0.0, 1.0, 500);
        let faint = time.mapv(|t| 1.0e-6 * (2.0 * PI * 40.0 * t).sin());
        let signals = faint.insert_axis(Axis(1));

        let fs = sampling_frequency(&time);
        let bin_width = fs / 500.0;
        let result = peak_frequencies(&time, &signals).unwrap();
        assert!((result[0] - 40.0).abs() <= bin_width);
    }

    #[test]
    fn test_result_length_matches_channel_count() {
        let time = Array1::linspace(0.0, 1.0, 200);
        let channels: Vec<Array1<f64>> = (1..=5)
            .map(|i| sine_channel(&time, 10.0 * i as f64, 0.0))
            .collect();
        let views: Vec<_> = channels.iter().map(|c| c.view()).collect();
        let signals = stack(Axis(1), &views).unwrap();

        let result = peak_frequencies(&time, &signals).unwrap();
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn test_estimate_is_always_a_bin_frequency() {
        let n = 128;
        let time = Array1::linspace(0.0, 0.5, n);
        let fs = sampling_frequency(&time);
        let freqs = frequency_vector(n, fs);

        // Off-bin input frequency: the estimate must still land on a bin.
        let signal = sine_channel(&time, 33.3, 0.0);
        let signals = signal.insert_axis(Axis(1));
        let result = peak_frequencies(&time, &signals).unwrap();

        assert!(freqs.iter().any(|&f| (f - result[0]).abs() < 1e-9));
    }

    #[test]
    fn test_phase_shifted_channels_agree() {
        let time = Array1::linspace(0.0, 1.0, 500);
        let sin = sine_channel(&time, 40.0, 0.0);
        let cos = sine_channel(&time, 40.0, PI / 2.0);
        let signals = stack(Axis(1), &[sin.view(), cos.view()]).unwrap();

        let result = peak_frequencies(&time, &signals).unwrap();
        assert_eq!(result[0], result[1]);
    }

    #[test]
    fn test_normalization_does_not_change_estimate() {
        let time = Array1::linspace(0.0, 1.0, 400);
        // Amplitude and offset differ; the recovered frequency must not.
        let raw = time.mapv(|t| 3.7 * (2.0 * PI * 25.0 * t).sin() + 1.2);
        let normalized = normalise_signal(&raw);
        let signals = stack(Axis(1), &[raw.view(), normalized.view()]).unwrap();

        let result = peak_frequencies(&time, &signals).unwrap();
        assert_eq!(result[0], result[1]);
    }

    #[test]
    fn test_adjacent_bins_differ_by_fs_over_n() {
        let n = 250;
        let fs = 1000.0;
        let freqs = frequency_vector(n, fs);
        assert_eq!(freqs.len(), n / 2 + 1);
        for k in 1..freqs.len() {
            assert!((freqs[k] - freqs[k - 1] - fs / n as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn test_one_sided_doubling_excludes_dc_and_last_bin() {
        // Cosine at the Nyquist frequency of an even-length signal puts all
        // its energy in the final bin, which must not be doubled.
        let n = 8;
        let nyquist = Array1::from_iter((0..n).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }));
        let signals = nyquist.insert_axis(Axis(1));
        let spectra = one_sided_amplitude_spectrum(&signals);

        assert_eq!(spectra.nrows(), n / 2 + 1);
        assert_eq!(spectra[[0, 0]], 0.0);
        assert!((spectra[[n / 2, 0]] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let time = Array1::linspace(0.0, 1.0, 50);
        let signals = Array2::<f64>::zeros((60, 2));
        assert_eq!(
            peak_frequencies(&time, &signals),
            Err(SpectrumError::ShapeMismatch {
                time_len: 50,
                rows: 60
            })
        );
    }

    #[test]
    fn test_insufficient_samples_rejected() {
        let time = Array1::from(vec![0.0]);
        let signals = Array2::<f64>::zeros((1, 3));
        assert_eq!(
            peak_frequencies(&time, &signals),
            Err(SpectrumError::InsufficientSamples(1))
        );
    }

    #[test]
    fn test_sampling_frequency_from_mean_delta() {
        let time = Array1::linspace(25.0, 25.01, 100);
        let fs = sampling_frequency(&time);
        // 99 intervals over 0.01 s
        assert!((fs - 9900.0).abs() < 1.0);
    }
}
