use std::path::Path;

use anyhow::{Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use tempfile::NamedTempFile;

/// A per-request scratch WAV handed to the transcription collaborator.
///
/// Each request gets a unique temp path, so concurrent analyses never
/// collide, and the file is removed on every exit path when the value
/// drops, including early returns and panics.
pub struct ScratchWav {
    file: NamedTempFile,
}

impl ScratchWav {
    /// Write a mono 16-bit PCM WAV of the given samples to a fresh temp
    /// file.
    pub fn write(samples: &[f32], sample_rate: u32) -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix("vocaledge-")
            .suffix(".wav")
            .tempfile()
            .context("Failed to create scratch WAV file")?;

        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let mut writer = WavWriter::create(file.path(), spec)
            .with_context(|| format!("Failed to open scratch WAV: {}", file.path().display()))?;
        for &s in samples {
            writer.write_sample((s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)?;
        }
        writer.finalize().context("Failed to finalize scratch WAV")?;

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn scratch_wav_roundtrip() {
        let samples = vec![0.0, 0.5, -0.5, 0.25];
        let scratch = ScratchWav::write(&samples, 22050).unwrap();

        let mut reader = hound::WavReader::open(scratch.path()).unwrap();
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.spec().sample_rate, 22050);

        let loaded: Vec<f32> = reader
            .samples::<i16>()
            .map(|s| s.unwrap() as f32 / i16::MAX as f32)
            .collect();
        assert_eq!(loaded.len(), samples.len());
        for (orig, got) in samples.iter().zip(loaded.iter()) {
            assert!((orig - got).abs() < 0.001);
        }
    }

    #[test]
    fn removed_on_drop() {
        let path: PathBuf;
        {
            let scratch = ScratchWav::write(&[0.1, 0.2], 22050).unwrap();
            path = scratch.path().to_path_buf();
            assert!(path.exists());
        }
        assert!(!path.exists(), "scratch file should be gone after drop");
    }

    #[test]
    fn unique_per_request() {
        let a = ScratchWav::write(&[0.1], 22050).unwrap();
        let b = ScratchWav::write(&[0.1], 22050).unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn out_of_range_samples_are_clamped() {
        let scratch = ScratchWav::write(&[2.0, -2.0], 22050).unwrap();
        let mut reader = hound::WavReader::open(scratch.path()).unwrap();
        let loaded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(loaded, vec![i16::MAX, i16::MIN + 1]);
    }
}
