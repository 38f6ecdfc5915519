use thiserror::Error;

/// Fatal analysis failures.
///
/// Only decoding can abort a request; every other failure mode degrades into
/// a partial result. The orchestrator converts these into an "Error"-level
/// report, so callers never see a raw fault.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The audio file could not be decoded into a usable waveform.
    #[error("failed to decode audio: {0}")]
    Decode(String),
}

/// The external transcription collaborator failed or is unreachable.
///
/// Recovered locally: analysis proceeds without transcript-derived
/// suggestions, and no error reaches the user.
#[derive(Debug, Error)]
#[error("transcription service unavailable")]
pub struct TranscriptionUnavailable;
