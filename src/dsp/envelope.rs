/// Moving-average smoothing window over the amplitude envelope, in samples.
const SMOOTHING_WINDOW: usize = 1000;

/// Minimum envelope height for a peak to register.
const MIN_PEAK_HEIGHT: f32 = 0.01;

/// Minimum separation between retained peaks, in samples.
const MIN_PEAK_DISTANCE: usize = 1000;

/// Envelope peaks per reported filler event.
const PEAKS_PER_FILLER: usize = 30;

/// Result of the filler-event heuristic.
pub struct FillerStats {
    /// Retained envelope peaks. Used in tests and by callers inspecting
    /// the raw peak count before the divisor is applied.
    #[allow(dead_code)]
    pub peak_count: usize,
    /// peak_count / 30, floored.
    pub filler_count: usize,
}

/// Estimate filler events from the amplitude envelope.
///
/// This is an amplitude heuristic, not a verbalized-filler detector: it
/// smooths |y| with a 1000-sample moving average, picks local peaks at
/// least 0.01 high and 1000 samples apart, and reports one filler per 30
/// peaks. No phoneme or word modeling is involved. The constants are
/// behavioral-parity values; changing any of them changes scores.
pub fn analyze(samples: &[f32]) -> FillerStats {
    let envelope = smoothed_envelope(samples);
    let peaks = find_peaks(&envelope, MIN_PEAK_HEIGHT, MIN_PEAK_DISTANCE);

    FillerStats {
        peak_count: peaks.len(),
        filler_count: peaks.len() / PEAKS_PER_FILLER,
    }
}

/// Absolute-amplitude envelope smoothed by a moving average.
///
/// Valid-convolution mode: the output covers only fully-overlapping window
/// positions, so its length is input − window + 1. Input shorter than the
/// window yields an empty envelope.
pub fn smoothed_envelope(samples: &[f32]) -> Vec<f32> {
    if samples.len() < SMOOTHING_WINDOW {
        return Vec::new();
    }

    // Prefix sums in f64 keep the sliding sums from drifting over long
    // recordings.
    let mut prefix = Vec::with_capacity(samples.len() + 1);
    prefix.push(0.0_f64);
    let mut acc = 0.0_f64;
    for &s in samples {
        acc += s.abs() as f64;
        prefix.push(acc);
    }

    (0..=samples.len() - SMOOTHING_WINDOW)
        .map(|i| ((prefix[i + SMOOTHING_WINDOW] - prefix[i]) / SMOOTHING_WINDOW as f64) as f32)
        .collect()
}

/// Find local maxima at least `min_height` tall, then prune until all
/// retained peaks are at least `min_distance` apart, dropping lower peaks
/// first.
pub fn find_peaks(values: &[f32], min_height: f32, min_distance: usize) -> Vec<usize> {
    let candidates = local_maxima(values);
    let tall: Vec<usize> = candidates
        .into_iter()
        .filter(|&i| values[i] >= min_height)
        .collect();

    if tall.len() <= 1 {
        return tall;
    }

    // Process candidates from tallest to shortest; each kept peak knocks
    // out its unclaimed neighbors within the distance.
    let mut order: Vec<usize> = (0..tall.len()).collect();
    order.sort_by(|&a, &b| values[tall[b]].partial_cmp(&values[tall[a]]).unwrap());

    let mut keep = vec![true; tall.len()];
    for &idx in &order {
        if !keep[idx] {
            continue;
        }
        let pos = tall[idx];

        let mut j = idx;
        while j > 0 && pos - tall[j - 1] < min_distance {
            j -= 1;
            keep[j] = false;
        }
        let mut j = idx;
        while j + 1 < tall.len() && tall[j + 1] - pos < min_distance {
            j += 1;
            keep[j] = false;
        }
    }

    tall.into_iter()
        .zip(keep)
        .filter_map(|(pos, k)| k.then_some(pos))
        .collect()
}

/// Indices of strict local maxima. A flat-topped peak reports its middle.
fn local_maxima(values: &[f32]) -> Vec<usize> {
    let n = values.len();
    let mut peaks = Vec::new();
    let mut i = 1;

    while n >= 3 && i < n - 1 {
        if values[i] > values[i - 1] {
            // Walk across a possible plateau.
            let mut j = i;
            while j + 1 < n && values[j + 1] == values[i] {
                j += 1;
            }
            if j + 1 < n && values[j + 1] < values[i] {
                peaks.push((i + j) / 2);
            }
            i = j + 1;
        } else {
            i += 1;
        }
    }

    peaks
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Square bursts of the given amplitude, `count` of them, `width`
    /// samples wide, starting every `spacing` samples. Leading silence keeps
    /// the first envelope bump away from the boundary.
    fn burst_train(count: usize, width: usize, spacing: usize, amplitude: f32) -> Vec<f32> {
        let lead = 2 * SMOOTHING_WINDOW;
        let mut samples = vec![0.0; lead + count * spacing + SMOOTHING_WINDOW];
        for b in 0..count {
            let start = lead + b * spacing;
            for s in &mut samples[start..start + width] {
                *s = amplitude;
            }
        }
        samples
    }

    #[test]
    fn one_peak_per_burst() {
        // 300-sample bursts every 2300 samples: each smears into one
        // envelope bump, well separated from its neighbors.
        let samples = burst_train(40, 300, 2300, 0.5);
        let stats = analyze(&samples);
        assert_eq!(stats.peak_count, 40);
        assert_eq!(stats.filler_count, 1);
    }

    #[test]
    fn below_thirty_peaks_is_zero_fillers() {
        let samples = burst_train(5, 300, 2300, 0.5);
        let stats = analyze(&samples);
        assert_eq!(stats.peak_count, 5);
        assert_eq!(stats.filler_count, 0);
    }

    #[test]
    fn quiet_bursts_below_height_threshold() {
        // Envelope peak = 0.005 * 300 / 1000 = 0.0015, under the 0.01 floor.
        let samples = burst_train(10, 300, 2300, 0.005);
        let stats = analyze(&samples);
        assert_eq!(stats.peak_count, 0);
        assert_eq!(stats.filler_count, 0);
    }

    #[test]
    fn silence_has_no_peaks() {
        let stats = analyze(&vec![0.0; 30000]);
        assert_eq!(stats.peak_count, 0);
    }

    #[test]
    fn short_input_has_empty_envelope() {
        assert!(smoothed_envelope(&vec![0.5; 500]).is_empty());
        let stats = analyze(&vec![0.5; 500]);
        assert_eq!(stats.peak_count, 0);
    }

    #[test]
    fn envelope_is_valid_mode_length() {
        let samples = vec![0.5; 5000];
        let env = smoothed_envelope(&samples);
        assert_eq!(env.len(), 5000 - SMOOTHING_WINDOW + 1);
    }

    #[test]
    fn envelope_of_constant_signal() {
        let env = smoothed_envelope(&vec![-0.25; 3000]);
        assert!(env.iter().all(|&v| (v - 0.25).abs() < 1e-5));
    }

    #[test]
    fn taller_peak_wins_distance_pruning() {
        let mut values = vec![0.0; 2000];
        values[400] = 0.3;
        values[900] = 0.5; // 500 samples away: too close, taller one stays
        let peaks = find_peaks(&values, 0.01, 1000);
        assert_eq!(peaks, vec![900]);
    }

    #[test]
    fn distant_peaks_both_survive() {
        let mut values = vec![0.0; 3000];
        values[400] = 0.3;
        values[1900] = 0.5;
        let peaks = find_peaks(&values, 0.01, 1000);
        assert_eq!(peaks, vec![400, 1900]);
    }

    #[test]
    fn plateau_reports_middle() {
        let mut values = vec![0.0; 100];
        for v in &mut values[40..=50] {
            *v = 1.0;
        }
        // Ramp up so the plateau is a proper maximum.
        values[39] = 0.5;
        values[51] = 0.5;
        let peaks = find_peaks(&values, 0.01, 10);
        assert_eq!(peaks, vec![45]);
    }
}
