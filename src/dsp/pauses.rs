use super::energy;

/// Configuration for energy-threshold pause segmentation.
pub struct PauseConfig {
    /// Silence threshold, in dB below the peak frame RMS.
    pub top_db: f32,
    /// Minimum gap duration (seconds) for a gap to count as a pause.
    pub min_gap_secs: f32,
    /// Segmentation frame, in samples. Frames are non-overlapping so that
    /// interval edges stay tight around the audio (~23ms at 22050 Hz).
    pub frame_size: usize,
}

impl Default for PauseConfig {
    fn default() -> Self {
        Self {
            top_db: 30.0,
            min_gap_secs: 0.25,
            frame_size: 512,
        }
    }
}

/// A half-open [start, end) sample range above the silence threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoicedInterval {
    pub start: usize,
    pub end: usize,
}

/// Result of pause segmentation.
pub struct PauseAnalysis {
    /// Ordered, non-overlapping non-silent intervals.
    /// Used in tests and by callers inspecting the segmentation.
    #[allow(dead_code)]
    pub intervals: Vec<VoicedInterval>,
    /// Gaps between adjacent intervals longer than the minimum.
    pub pause_count: usize,
    /// Sum of qualifying gap durations only. Sub-threshold gaps are
    /// ignored entirely, not summed.
    pub total_silence_secs: f32,
}

/// Split a waveform into non-silent intervals and count the pauses between
/// them.
///
/// A frame is non-silent when its RMS is within `top_db` of the loudest
/// frame. Runs of non-silent frames become sample intervals; the gap between
/// each adjacent pair counts as a pause iff it exceeds `min_gap_secs`.
/// Zero or one interval yields pause_count = 0.
pub fn analyze(samples: &[f32], sample_rate: u32, config: &PauseConfig) -> PauseAnalysis {
    let intervals = split_non_silent(samples, config);

    let mut pause_count = 0;
    let mut total_silence_secs = 0.0;

    for pair in intervals.windows(2) {
        let gap = pair[1].start.saturating_sub(pair[0].end) as f32 / sample_rate as f32;
        if gap > config.min_gap_secs {
            pause_count += 1;
            total_silence_secs += gap;
        }
    }

    PauseAnalysis {
        intervals,
        pause_count,
        total_silence_secs,
    }
}

/// Find the non-silent sample intervals of a waveform.
pub fn split_non_silent(samples: &[f32], config: &PauseConfig) -> Vec<VoicedInterval> {
    let rms = energy::rms_track(samples, config.frame_size, config.frame_size);

    let peak = rms.iter().fold(0.0_f32, |max, &v| max.max(v));
    if peak <= 0.0 {
        return Vec::new();
    }

    // threshold = peak attenuated by top_db
    let threshold = peak * 10.0_f32.powf(-config.top_db / 20.0);

    let mut intervals = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, &value) in rms.iter().enumerate() {
        let loud = value > threshold;
        match (loud, run_start) {
            (true, None) => run_start = Some(i),
            (true, Some(_)) => {}
            (false, Some(s)) => {
                intervals.push(frame_run_to_samples(s, i, config.frame_size, samples.len()));
                run_start = None;
            }
            (false, None) => {}
        }
    }

    if let Some(s) = run_start {
        intervals.push(frame_run_to_samples(
            s,
            rms.len(),
            config.frame_size,
            samples.len(),
        ));
    }

    intervals
}

/// Convert a run of frames [start_frame, end_frame) into a sample interval.
fn frame_run_to_samples(
    start_frame: usize,
    end_frame: usize,
    frame_size: usize,
    total_samples: usize,
) -> VoicedInterval {
    VoicedInterval {
        start: start_frame * frame_size,
        end: (end_frame * frame_size).min(total_samples),
    }
}
