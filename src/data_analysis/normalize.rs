// src/data_analysis/normalize.rs

use ndarray::Array1;
use ndarray_stats::QuantileExt;

/// Scales a signal into the range [-1, 1]: centered on the midrange and
/// divided by the half-range. A constant (or empty) signal maps to all zeros.
///
/// Frequency estimation does not depend on this scaling; it only puts the
/// quadrature channels on a common amplitude for plotting and comparison.
pub fn normalise_signal(signal: &Array1<f64>) -> Array1<f64> {
    let (min, max) = match (signal.min(), signal.max()) {
        (Ok(&min), Ok(&max)) => (min, max),
        _ => return Array1::zeros(signal.len()),
    };

    let half_range = (max - min) / 2.0;
    if half_range <= f64::EPSILON {
        return Array1::zeros(signal.len());
    }
    let midrange = (max + min) / 2.0;
    signal.mapv(|v| (v - midrange) / half_range)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise_spans_unit_range() {
        let signal = Array1::from(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let normalized = normalise_signal(&signal);
        assert!((normalized[0] - -1.0).abs() < 1e-12);
        assert!((normalized[4] - 1.0).abs() < 1e-12);
        assert!(normalized[2].abs() < 1e-12);
    }

    #[test]
    fn test_normalise_removes_offset() {
        let signal = Array1::from(vec![2.0, 4.0]);
        let normalized = normalise_signal(&signal);
        assert_eq!(normalized.to_vec(), vec![-1.0, 1.0]);
    }

    #[test]
    fn test_normalise_constant_signal_is_zeroed() {
        let signal = Array1::from_elem(10, 5.0);
        assert!(normalise_signal(&signal).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_normalise_empty_signal() {
        let signal = Array1::<f64>::zeros(0);
        assert!(normalise_signal(&signal).is_empty());
    }
}
