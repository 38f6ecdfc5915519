use std::f32::consts::PI;

/// Apply a Hanning window to a slice of samples, returning a new Vec.
///
/// The Hanning (also called Hann) window smoothly tapers a frame of audio
/// to zero at both edges. This prevents spectral leakage — the artifacts you'd
/// get from abruptly chopping a signal in the middle of a cycle.
///
/// Formula: w(n) = 0.5 * (1 - cos(2π * n / (N - 1)))
pub fn hanning(samples: &[f32]) -> Vec<f32> {
    let n = samples.len();
    if n <= 1 {
        return samples.to_vec();
    }

    let scale = 2.0 * PI / (n - 1) as f32;

    samples
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let w = 0.5 * (1.0 - (scale * i as f32).cos());
            s * w
        })
        .collect()
}
