/// Peak absolute amplitude of a sample buffer.
/// Returns 0.0 for empty input.
pub fn peak_amplitude(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0_f32, |max, &s| max.max(s.abs()))
}

/// Arithmetic mean. Returns 0.0 for empty input.
pub fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

/// Population standard deviation (divides by N, not N-1).
/// Returns 0.0 for empty input.
pub fn std_dev(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|&v| (v - m).powi(2)).sum::<f32>() / values.len() as f32;
    variance.sqrt()
}

/// Round to a fixed number of decimal places.
/// Report fields carry a documented precision (score 1 decimal, pitch
/// deviation 2 decimals), so rounding happens once at assembly time.
pub fn round_to(value: f32, decimals: u32) -> f32 {
    let factor = 10_f32.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_of_mixed_signs() {
        let samples = vec![0.2, -0.9, 0.5];
        assert!((peak_amplitude(&samples) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn peak_of_empty() {
        assert_eq!(peak_amplitude(&[]), 0.0);
    }

    #[test]
    fn mean_basic() {
        assert!((mean(&[1.0, 2.0, 3.0]) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn std_dev_constant_is_zero() {
        assert!(std_dev(&[5.0, 5.0, 5.0]) < 1e-6);
    }

    #[test]
    fn std_dev_population() {
        // Population std of [1, 3] is 1.0 (sample std would be ~1.414)
        assert!((std_dev(&[1.0, 3.0]) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn std_dev_empty() {
        assert_eq!(std_dev(&[]), 0.0);
    }

    #[test]
    fn round_one_decimal() {
        assert_eq!(round_to(73.46, 1), 73.5);
    }

    #[test]
    fn round_two_decimals() {
        assert_eq!(round_to(12.345, 2), 12.35);
    }

    #[test]
    fn round_zero_decimals() {
        assert_eq!(round_to(0.5, 0), 1.0);
    }
}
