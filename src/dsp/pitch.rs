use super::stft::Spectrogram;
use crate::util;

/// Pitch candidates below this are rejected as spurious (hum harmonics, DC).
const MIN_PITCH_HZ: f32 = 50.0;

/// Median filter window applied to tracks longer than the window itself.
const MEDIAN_WINDOW: usize = 5;

/// Configuration for spectral-peak pitch estimation.
pub struct PitchConfig {
    /// Lower edge of the plausible human-voice band in Hz.
    pub floor_hz: f32,
    /// Upper edge of the plausible human-voice band in Hz.
    pub ceiling_hz: f32,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            floor_hz: 80.0,
            ceiling_hz: 600.0,
        }
    }
}

/// Pitch statistics over a waveform.
pub struct PitchStats {
    /// Retained per-frame estimates (Hz), median-filtered. May be empty.
    /// Used in tests and by callers inspecting the track.
    #[allow(dead_code)]
    pub track: Vec<f32>,
    /// Mean of the track, 0.0 if empty.
    pub mean_hz: f32,
    /// Population standard deviation of the track, 0.0 if empty.
    pub std_hz: f32,
}

/// Estimate a pitch track from a spectrogram and summarize it.
///
/// Per frame: pick the magnitude peak within the voice band, refine it with
/// parabolic interpolation across the neighboring bins, and keep the result
/// only above the 50 Hz confidence floor. Low-confidence frames are omitted
/// from the track rather than zero-filled. Tracks longer than the median
/// window are median-filtered to suppress octave errors.
pub fn analyze(spec: &Spectrogram, config: &PitchConfig) -> PitchStats {
    let mut track: Vec<f32> = spec
        .magnitudes
        .iter()
        .filter_map(|frame| frame_pitch(frame, spec, config))
        .filter(|&hz| hz > MIN_PITCH_HZ)
        .collect();

    if track.len() > MEDIAN_WINDOW {
        track = median_filter(&track, MEDIAN_WINDOW);
    }

    let mean_hz = util::mean(&track);
    let std_hz = util::std_dev(&track);

    PitchStats {
        track,
        mean_hz,
        std_hz,
    }
}

/// Pitch candidate for one frame: the refined frequency of the strongest
/// bin inside the voice band. None when the band holds no usable bin or
/// the frame is pure silence.
fn frame_pitch(magnitudes: &[f32], spec: &Spectrogram, config: &PitchConfig) -> Option<f32> {
    let bin_width = spec.bin_width_hz();
    let lo = (config.floor_hz / bin_width).ceil() as usize;
    let hi = ((config.ceiling_hz / bin_width).floor() as usize).min(magnitudes.len() - 1);

    if lo > hi {
        return None;
    }

    let (peak_bin, peak_mag) = magnitudes[lo..=hi]
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
        .map(|(i, &m)| (lo + i, m))?;

    if peak_mag <= 0.0 {
        return None;
    }

    Some(refine_peak(magnitudes, peak_bin) * bin_width)
}

/// Parabolic interpolation of a spectral peak.
///
/// Fits a parabola through the peak bin and its neighbors and returns the
/// fractional bin of the vertex. This recovers frequencies between bin
/// centers, which matters at 2048-point resolution (~10.8 Hz per bin).
fn refine_peak(magnitudes: &[f32], bin: usize) -> f32 {
    if bin == 0 || bin + 1 >= magnitudes.len() {
        return bin as f32;
    }

    let a = magnitudes[bin - 1];
    let b = magnitudes[bin];
    let c = magnitudes[bin + 1];

    let denom = a - 2.0 * b + c;
    if denom.abs() < 1e-12 {
        return bin as f32;
    }

    let delta = (0.5 * (a - c) / denom).clamp(-0.5, 0.5);
    bin as f32 + delta
}

/// Sliding median filter with reflected boundaries.
/// Output has the same length as the input.
pub fn median_filter(values: &[f32], window: usize) -> Vec<f32> {
    let n = values.len();
    let half = window / 2;

    (0..n)
        .map(|i| {
            let mut neighborhood: Vec<f32> = (0..window)
                .map(|w| {
                    let idx = i as isize + w as isize - half as isize;
                    values[reflect(idx, n)]
                })
                .collect();
            neighborhood.sort_by(|a, b| a.partial_cmp(b).unwrap());
            neighborhood[window / 2]
        })
        .collect()
}

/// Reflect an index into [0, n): -1 maps to 0, n maps to n-1, and so on.
fn reflect(idx: isize, n: usize) -> usize {
    let n = n as isize;
    let mut i = idx;
    if i < 0 {
        i = -i - 1;
    }
    if i >= n {
        i = 2 * n - i - 1;
    }
    i.clamp(0, n - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::stft::{self, StftConfig};
    use std::f32::consts::PI;

    fn sine_wave(freq_hz: f32, sample_rate: u32, duration_secs: f32) -> Vec<f32> {
        let num_samples = (sample_rate as f32 * duration_secs) as usize;
        (0..num_samples)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                (2.0 * PI * freq_hz * t).sin()
            })
            .collect()
    }

    fn analyze_samples(samples: &[f32]) -> PitchStats {
        let spec = stft::compute(samples, 22050, &StftConfig::default());
        analyze(&spec, &PitchConfig::default())
    }

    #[test]
    fn pure_tone_220hz() {
        let stats = analyze_samples(&sine_wave(220.0, 22050, 2.0));

        assert!(!stats.track.is_empty(), "Tone should produce a pitch track");
        assert!(
            (stats.mean_hz - 220.0).abs() < 10.0,
            "Mean pitch should be ~220 Hz, got {:.1} Hz",
            stats.mean_hz
        );
        assert!(
            stats.std_hz < 5.0,
            "Steady tone should have near-zero deviation, got {:.2}",
            stats.std_hz
        );
    }

    #[test]
    fn tone_outside_band_still_yields_band_peak() {
        // A 1200 Hz tone sits above the band; the estimator still picks the
        // strongest in-band bin, which is just leakage. The point is it never
        // reports a frequency outside [80, 600].
        let stats = analyze_samples(&sine_wave(1200.0, 22050, 1.0));
        for &hz in &stats.track {
            assert!((50.0..=610.0).contains(&hz), "out-of-band pitch {hz:.1}");
        }
    }

    #[test]
    fn empty_track_gives_zero_stats() {
        // Shorter than one analysis frame: no spectral frames at all.
        let stats = analyze_samples(&vec![0.1; 500]);
        assert!(stats.track.is_empty());
        assert_eq!(stats.mean_hz, 0.0);
        assert_eq!(stats.std_hz, 0.0);
    }

    #[test]
    fn median_filter_removes_outlier() {
        let values = vec![100.0, 100.0, 400.0, 100.0, 100.0, 100.0, 100.0];
        let filtered = median_filter(&values, 5);
        assert!(
            filtered.iter().all(|&v| (v - 100.0).abs() < 1e-6),
            "Octave spike should be suppressed, got {filtered:?}"
        );
    }

    #[test]
    fn median_filter_preserves_length() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert_eq!(median_filter(&values, 5).len(), values.len());
    }

    #[test]
    fn short_track_is_not_filtered() {
        // 5 entries or fewer skip the filter entirely.
        let samples = sine_wave(220.0, 22050, 0.15);
        let spec = stft::compute(&samples, 22050, &StftConfig::default());
        let stats = analyze(&spec, &PitchConfig::default());
        assert!(stats.track.len() <= 5);
    }

    #[test]
    fn refine_peak_centers_on_symmetric_neighbors() {
        let mags = vec![0.0, 1.0, 2.0, 1.0, 0.0];
        assert!((refine_peak(&mags, 2) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn refine_peak_leans_toward_stronger_neighbor() {
        let mags = vec![0.0, 0.5, 2.0, 1.5, 0.0];
        let refined = refine_peak(&mags, 2);
        assert!(refined > 2.0 && refined < 2.5, "got {refined}");
    }

    #[test]
    fn reflect_boundaries() {
        assert_eq!(reflect(-1, 5), 0);
        assert_eq!(reflect(-2, 5), 1);
        assert_eq!(reflect(5, 5), 4);
        assert_eq!(reflect(6, 5), 3);
        assert_eq!(reflect(2, 5), 2);
    }
}
