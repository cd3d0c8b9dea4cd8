// src/data_analysis/fft_utils.rs

use ndarray::Array1;
use num_complex::Complex64;
use realfft::RealFftPlanner;

/// Computes the Fast Fourier Transform (FFT) of a real-valued signal.
/// Returns the complex half-spectrum (floor(N/2)+1 bins). Handles empty input.
pub fn fft_forward(data: &Array1<f64>) -> Array1<Complex64> {
    if data.is_empty() {
        return Array1::zeros(0);
    }
    let n = data.len();
    let mut input = data.to_vec();
    let planner = RealFftPlanner::<f64>::new().plan_fft_forward(n);
    let mut output = planner.make_output_vec();
    if planner.process(&mut input, &mut output).is_err() {
        eprintln!("Warning: FFT forward processing failed.");
        return Array1::zeros(n / 2 + 1);
    }
    Array1::from(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fft_forward_half_spectrum_length() {
        let even = Array1::from(vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(fft_forward(&even).len(), 3);

        let odd = Array1::from(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(fft_forward(&odd).len(), 3);
    }

    #[test]
    fn test_fft_forward_dc_bin_is_sum() {
        let data = Array1::from(vec![1.0, 1.0, 1.0, 1.0]);
        let spectrum = fft_forward(&data);
        assert!((spectrum[0].re - 4.0).abs() < 1e-12);
        assert!(spectrum[0].im.abs() < 1e-12);
    }

    #[test]
    fn test_fft_forward_empty_input() {
        let data = Array1::<f64>::zeros(0);
        assert!(fft_forward(&data).is_empty());
    }
}
