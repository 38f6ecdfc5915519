use std::path::Path;

pub use crate::error::TranscriptionUnavailable;

/// Boundary to the external speech-to-text collaborator.
///
/// The pipeline hands the collaborator a scratch WAV of the normalized
/// waveform and consumes whatever transcript comes back. Unavailability is
/// an expected outcome, not a failure: the caller degrades to an empty
/// transcript and skips use-case enrichment.
pub trait Transcriber {
    fn transcribe(&self, audio: &Path) -> Result<String, TranscriptionUnavailable>;
}

/// No transcription service configured. Always unavailable.
pub struct NoTranscriber;

impl Transcriber for NoTranscriber {
    fn transcribe(&self, _audio: &Path) -> Result<String, TranscriptionUnavailable> {
        Err(TranscriptionUnavailable)
    }
}

/// A transcript supplied up front (e.g. on the command line), standing in
/// for an external service that already ran.
pub struct FixedTranscript(pub String);

impl Transcriber for FixedTranscript {
    fn transcribe(&self, _audio: &Path) -> Result<String, TranscriptionUnavailable> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_transcriber_is_unavailable() {
        let t = NoTranscriber;
        assert!(t.transcribe(Path::new("unused.wav")).is_err());
    }

    #[test]
    fn fixed_transcript_ignores_audio() {
        let t = FixedTranscript("tell me about yourself".into());
        let got = t.transcribe(Path::new("unused.wav")).unwrap();
        assert_eq!(got, "tell me about yourself");
    }
}
