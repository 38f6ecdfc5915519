use crate::util;

/// Peak amplitude below which a recording counts as having no voice at all.
/// Checked against the pre-normalization waveform: after peak scaling any
/// non-zero recording would pass trivially.
const PRESENCE_THRESHOLD: f32 = 0.005;

/// Mean absolute amplitude below which the opening seconds count as silent.
const INITIAL_SILENCE_THRESHOLD: f32 = 0.01;

/// How much of the opening to inspect for the silence warning.
const INITIAL_SILENCE_SECS: f32 = 5.0;

/// Warning issued when the speaker stays quiet at the start.
pub const INITIAL_SILENCE_WARNING: &str =
    "You remained silent in the first few seconds. Try starting promptly.";

/// Whether a voice signal is present at all.
///
/// `raw_peak` is the peak absolute amplitude measured before
/// peak-normalization (the loader records it).
pub fn has_voice(raw_peak: f32) -> bool {
    raw_peak >= PRESENCE_THRESHOLD
}

/// Warn when the opening seconds of the recording are near-silent.
///
/// Inspects the first 5 seconds of the (normalized) waveform, or whatever
/// is available when the recording is shorter.
pub fn initial_silence_warning(samples: &[f32], sample_rate: u32) -> Option<&'static str> {
    let check_samples = ((sample_rate as f32 * INITIAL_SILENCE_SECS) as usize).min(samples.len());
    let opening: Vec<f32> = samples[..check_samples].iter().map(|s| s.abs()).collect();

    if util::mean(&opening) < INITIAL_SILENCE_THRESHOLD {
        Some(INITIAL_SILENCE_WARNING)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const SR: u32 = 22050;

    fn tone(duration_secs: f32, amplitude: f32) -> Vec<f32> {
        let num_samples = (SR as f32 * duration_secs) as usize;
        (0..num_samples)
            .map(|i| {
                let t = i as f32 / SR as f32;
                amplitude * (2.0 * PI * 220.0 * t).sin()
            })
            .collect()
    }

    #[test]
    fn loud_peak_has_voice() {
        assert!(has_voice(0.5));
        assert!(has_voice(0.005)); // threshold is inclusive
    }

    #[test]
    fn near_silent_peak_has_no_voice() {
        assert!(!has_voice(0.004));
        assert!(!has_voice(0.0));
    }

    #[test]
    fn silent_opening_warns() {
        let mut samples = vec![0.0; (SR as f32 * 6.0) as usize];
        samples.extend(tone(1.0, 0.8));
        assert!(initial_silence_warning(&samples, SR).is_some());
    }

    #[test]
    fn prompt_start_does_not_warn() {
        let samples = tone(6.0, 0.8);
        assert!(initial_silence_warning(&samples, SR).is_none());
    }

    #[test]
    fn short_recording_checks_available_samples() {
        // 1 second of solid speech: shorter than the 5s window, no warning.
        let samples = tone(1.0, 0.8);
        assert!(initial_silence_warning(&samples, SR).is_none());

        // 1 second of silence: warning.
        let silence = vec![0.0; SR as usize];
        assert!(initial_silence_warning(&silence, SR).is_some());
    }

    #[test]
    fn quiet_opening_then_speech_warns() {
        // Quiet 5s opening below the 0.01 mean-amplitude threshold.
        let mut samples = tone(5.0, 0.005);
        samples.extend(tone(2.0, 0.8));
        assert!(initial_silence_warning(&samples, SR).is_some());
    }
}
