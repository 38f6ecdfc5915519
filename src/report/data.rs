use serde::{Deserialize, Serialize};

use crate::analysis::score::ConfidenceLevel;
use crate::util;

pub const SUGGEST_SPEAK_CLOSER: &str = "Please speak clearly and close to the mic.";
pub const SUGGEST_RETRY: &str = "Technical error occurred. Please try again.";

/// The terminal artifact of one analysis request.
///
/// Constructed once by the orchestrator and immutable from the caller's
/// point of view. Numeric fields carry their documented precision:
/// confidence_score and pitch_mean to 1 decimal, pitch_std to 2.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub confidence_level: ConfidenceLevel,
    pub confidence_score: f32,
    pub pitch_mean: f32,
    pub pitch_std: f32,
    pub energy_mean: f32,
    pub energy_std: f32,
    pub pause_count: usize,
    pub filler_count: usize,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<DebugInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcribed_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spectrogram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Human-readable snapshot of the raw metrics, for the report footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugInfo {
    pub pitch_mean: String,
    pub pitch_std: String,
    pub energy_mean: String,
    pub energy_std: String,
    pub pauses: usize,
    pub total_silence: String,
    pub filler_count: usize,
}

impl DebugInfo {
    pub fn new(
        pitch_mean_hz: f32,
        pitch_std_hz: f32,
        energy_mean: f32,
        energy_std: f32,
        pauses: usize,
        total_silence_secs: f32,
        filler_count: usize,
    ) -> Self {
        Self {
            pitch_mean: format!("{pitch_mean_hz:.1} Hz"),
            pitch_std: format!("{pitch_std_hz:.2}"),
            energy_mean: format!("{energy_mean:.5}"),
            energy_std: format!("{energy_std:.5}"),
            pauses,
            total_silence: format!("{total_silence_secs:.2}s"),
            filler_count,
        }
    }
}

impl AnalysisReport {
    /// The short-circuit shape for a recording with no detectable voice.
    pub fn no_voice(warning: Option<&str>) -> Self {
        Self {
            confidence_level: ConfidenceLevel::NoVoice,
            confidence_score: 0.0,
            pitch_mean: 0.0,
            pitch_std: 0.0,
            energy_mean: 0.0,
            energy_std: 0.0,
            pause_count: 0,
            filler_count: 0,
            warnings: warning.into_iter().map(String::from).collect(),
            suggestions: vec![SUGGEST_SPEAK_CLOSER.to_string()],
            debug_info: None,
            transcribed_text: None,
            spectrogram: None,
            error: None,
        }
    }

    /// The shape for a fatal failure (decode error or unanticipated fault).
    pub fn error(message: String) -> Self {
        Self {
            confidence_level: ConfidenceLevel::Error,
            confidence_score: 0.0,
            pitch_mean: 0.0,
            pitch_std: 0.0,
            energy_mean: 0.0,
            energy_std: 0.0,
            pause_count: 0,
            filler_count: 0,
            warnings: Vec::new(),
            suggestions: vec![SUGGEST_RETRY.to_string()],
            debug_info: None,
            transcribed_text: None,
            spectrogram: None,
            error: Some(message),
        }
    }

    /// Apply the documented rounding to the metric fields.
    pub fn rounded(mut self) -> Self {
        self.confidence_score = util::round_to(self.confidence_score, 1);
        self.pitch_mean = util::round_to(self.pitch_mean, 1);
        self.pitch_std = util::round_to(self.pitch_std, 2);
        self
    }
}
