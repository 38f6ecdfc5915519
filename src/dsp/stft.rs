use rustfft::{num_complex::Complex, FftPlanner};

use super::windowing;

/// Default analysis frame: 2048 samples (~93ms at 22050 Hz).
pub const FRAME_SIZE: usize = 2048;

/// Default hop between frames: 512 samples (4x overlap).
pub const HOP_SIZE: usize = 512;

/// Configuration for the short-time Fourier transform.
pub struct StftConfig {
    /// Samples per analysis frame (also the FFT size).
    pub frame_size: usize,
    /// How far to advance between frames, in samples.
    pub hop_size: usize,
}

impl Default for StftConfig {
    fn default() -> Self {
        Self {
            frame_size: FRAME_SIZE,
            hop_size: HOP_SIZE,
        }
    }
}

/// Short-time spectral magnitudes of a waveform.
///
/// One row per analysis frame, one column per frequency bin
/// (0 through frame_size/2 inclusive — the non-redundant half of the
/// spectrum for a real signal). This feeds both the pitch estimator and
/// the visualization collaborator.
pub struct Spectrogram {
    /// magnitudes[frame][bin]
    pub magnitudes: Vec<Vec<f32>>,
    pub frame_size: usize,
    pub hop_size: usize,
    pub sample_rate: u32,
}

impl Spectrogram {
    /// Number of analysis frames.
    pub fn frames(&self) -> usize {
        self.magnitudes.len()
    }

    /// Number of frequency bins per frame.
    pub fn bins(&self) -> usize {
        self.frame_size / 2 + 1
    }

    /// Center frequency of a bin in Hz.
    pub fn bin_hz(&self, bin: usize) -> f32 {
        bin as f32 * self.sample_rate as f32 / self.frame_size as f32
    }

    /// Width of one frequency bin in Hz.
    pub fn bin_width_hz(&self) -> f32 {
        self.sample_rate as f32 / self.frame_size as f32
    }

    /// Start time of a frame in seconds.
    pub fn frame_time(&self, frame: usize) -> f32 {
        (frame * self.hop_size) as f32 / self.sample_rate as f32
    }

    /// Duration covered by one hop, in seconds.
    pub fn hop_secs(&self) -> f32 {
        self.hop_size as f32 / self.sample_rate as f32
    }
}

/// Compute the magnitude spectrogram of a waveform.
///
/// Slides a Hanning-windowed frame across the signal and takes the FFT of
/// each. Frames that would run past the end of the signal are dropped, so a
/// waveform shorter than one frame yields zero frames.
pub fn compute(samples: &[f32], sample_rate: u32, config: &StftConfig) -> Spectrogram {
    let frame_size = config.frame_size;
    let hop_size = config.hop_size;
    let num_bins = frame_size / 2 + 1;

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(frame_size);

    let mut magnitudes = Vec::new();
    let mut pos = 0;

    while pos + frame_size <= samples.len() {
        let windowed = windowing::hanning(&samples[pos..pos + frame_size]);

        let mut buf: Vec<Complex<f32>> =
            windowed.iter().map(|&s| Complex::new(s, 0.0)).collect();
        fft.process(&mut buf);

        let mags: Vec<f32> = buf[..num_bins].iter().map(|c| c.norm()).collect();
        magnitudes.push(mags);

        pos += hop_size;
    }

    Spectrogram {
        magnitudes,
        frame_size,
        hop_size,
        sample_rate,
    }
}
