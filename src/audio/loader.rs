use std::path::Path;

use hound::{SampleFormat, WavReader};
use rubato::{FftFixedIn, Resampler};

use crate::error::AnalysisError;
use crate::util;

/// Every waveform entering the analysis pipeline is resampled to this rate.
pub const TARGET_SAMPLE_RATE: u32 = 22050;

/// Guards the peak-normalization divisor against near-silent input.
const NORMALIZE_EPSILON: f32 = 1e-5;

/// A decoded, mono, peak-normalized waveform at the pipeline sample rate.
pub struct Waveform {
    /// Samples in approximately [-1, 1] after normalization. Never empty.
    pub samples: Vec<f32>,
    /// Always `TARGET_SAMPLE_RATE`.
    pub sample_rate: u32,
    /// Peak absolute amplitude measured *before* normalization.
    /// The presence check reads this; post-normalization the peak of any
    /// non-zero signal is ~1.0 and the check would be meaningless.
    pub raw_peak: f32,
}

/// Decode an audio file into a normalized mono waveform.
///
/// Multi-channel input is downmixed by channel averaging, a differing source
/// rate is resampled to 22050 Hz, and the result is peak-normalized by
/// dividing by max(|sample|) + epsilon. Any decoding problem is a
/// `DecodeError`; no partial waveform is ever returned.
pub fn load(path: &Path) -> Result<Waveform, AnalysisError> {
    let (interleaved, channels, source_rate) = decode_wav(path)?;

    let mono = downmix(&interleaved, channels);
    if mono.is_empty() {
        return Err(AnalysisError::Decode(format!(
            "{}: audio stream contains no samples",
            path.display()
        )));
    }

    let resampled = if source_rate == TARGET_SAMPLE_RATE {
        mono
    } else {
        resample(&mono, source_rate)?
    };

    if resampled.is_empty() {
        return Err(AnalysisError::Decode(format!(
            "{}: audio stream too short to resample",
            path.display()
        )));
    }

    let raw_peak = util::peak_amplitude(&resampled);
    let samples = peak_normalize(resampled, raw_peak);

    Ok(Waveform {
        samples,
        sample_rate: TARGET_SAMPLE_RATE,
        raw_peak,
    })
}

/// Read a WAV file as interleaved f32 samples in [-1.0, 1.0].
fn decode_wav(path: &Path) -> Result<(Vec<f32>, u16, u32), AnalysisError> {
    let mut reader = WavReader::open(path)
        .map_err(|e| AnalysisError::Decode(format!("{}: {e}", path.display())))?;

    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Int => {
            let max_val = (1_i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<hound::Result<Vec<_>>>()
                .map_err(|e| AnalysisError::Decode(format!("{}: {e}", path.display())))?
        }
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<hound::Result<Vec<_>>>()
            .map_err(|e| AnalysisError::Decode(format!("{}: {e}", path.display())))?,
    };

    Ok((samples, spec.channels, spec.sample_rate))
}

/// Average interleaved channels down to mono.
pub fn downmix(interleaved: &[f32], channels: u16) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }

    interleaved
        .chunks(channels as usize)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

/// Resample mono audio to the target rate with an FFT-based resampler.
fn resample(samples: &[f32], source_rate: u32) -> Result<Vec<f32>, AnalysisError> {
    let mut resampler = FftFixedIn::<f32>::new(
        source_rate as usize,
        TARGET_SAMPLE_RATE as usize,
        1024, // chunk size
        1,    // sub chunks
        1,    // channels
    )
    .map_err(|e| AnalysisError::Decode(format!("resampler setup failed: {e}")))?;

    let input_frames = resampler.input_frames_next();
    let mut output = Vec::new();

    for chunk in samples.chunks(input_frames) {
        // Pad the last chunk to a full input block.
        let input = if chunk.len() < input_frames {
            let mut padded = chunk.to_vec();
            padded.resize(input_frames, 0.0);
            vec![padded]
        } else {
            vec![chunk.to_vec()]
        };

        let resampled = resampler
            .process(&input, None)
            .map_err(|e| AnalysisError::Decode(format!("resampling failed: {e}")))?;
        if let Some(channel) = resampled.first() {
            output.extend_from_slice(channel);
        }
    }

    Ok(output)
}

/// Scale so the peak sits at ~1.0. The epsilon keeps near-silent input from
/// blowing up to garbage.
fn peak_normalize(mut samples: Vec<f32>, raw_peak: f32) -> Vec<f32> {
    let divisor = raw_peak + NORMALIZE_EPSILON;
    for s in &mut samples {
        *s /= divisor;
    }
    samples
}
