use crate::util;

/// Frame and hop for the RMS track, matching the spectral analysis framing.
pub const FRAME_SIZE: usize = 2048;
pub const HOP_SIZE: usize = 512;

/// Short-time RMS energy of a waveform.
///
/// Unlike the pitch track, this covers the entire signal: the final frame is
/// computed over whatever samples remain rather than dropped.
pub struct EnergyTrack {
    /// One RMS value per analysis frame.
    /// Used in tests and by callers inspecting the track.
    #[allow(dead_code)]
    pub rms: Vec<f32>,
    /// Mean of the track, 0.0 if empty.
    pub mean: f32,
    /// Population standard deviation of the track, 0.0 if empty.
    pub std: f32,
}

/// Compute the RMS energy track with the default framing.
pub fn analyze(samples: &[f32]) -> EnergyTrack {
    let rms = rms_track(samples, FRAME_SIZE, HOP_SIZE);
    let mean = util::mean(&rms);
    let std = util::std_dev(&rms);

    EnergyTrack { rms, mean, std }
}

/// Per-frame RMS values covering the full waveform.
///
/// Frames advance by `hop_size`; a frame that would run past the end of the
/// signal shrinks to the remaining samples, so no tail audio is omitted.
pub fn rms_track(samples: &[f32], frame_size: usize, hop_size: usize) -> Vec<f32> {
    if samples.is_empty() || frame_size == 0 || hop_size == 0 {
        return Vec::new();
    }

    let mut track = Vec::new();
    let mut pos = 0;

    while pos < samples.len() {
        let end = (pos + frame_size).min(samples.len());
        track.push(frame_rms(&samples[pos..end]));
        pos += hop_size;
    }

    track
}

/// RMS of a sample buffer (linear, not dB).
pub fn frame_rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|&s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}
