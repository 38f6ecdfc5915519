use std::fmt;

use serde::{Deserialize, Serialize};

// Penalty weights. The four maximum penalties sum to 100, so the score
// spans the full 0-100 range. Filler words carry the heaviest weight,
// pitch variability the lightest.
const PITCH_WEIGHT: f32 = 20.0;
const ENERGY_WEIGHT: f32 = 25.0;
const FILLER_WEIGHT: f32 = 30.0;
const PAUSE_WEIGHT: f32 = 25.0;

// Normalization ranges for the raw metrics.
const PITCH_STD_RANGE: f32 = 50.0;
const ENERGY_SCALE: f32 = 50.0;
const FILLER_RANGE: f32 = 10.0;
const PAUSE_RANGE: f32 = 5.0;

// Rule-based suggestion thresholds.
const LOW_PITCH_VARIATION: f32 = 20.0;
const LOW_ENERGY: f32 = 0.02;
const MANY_FILLERS: usize = 3;
const MANY_PAUSES: usize = 3;

pub const SUGGEST_PITCH_VARIATION: &str = "Increase pitch variation to sound more engaging.";
pub const SUGGEST_MORE_VOLUME: &str = "Speak with more volume and energy.";
pub const SUGGEST_FEWER_FILLERS: &str = "Practice reducing filler words like 'um' and 'uh'.";
pub const SUGGEST_FEWER_PAUSES: &str = "Minimize long pauses for smoother delivery.";

/// Categorical confidence level derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    #[serde(rename = "No Voice")]
    NoVoice,
    Confident,
    Moderate,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
    Error,
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::NoVoice => "No Voice",
            ConfidenceLevel::Confident => "Confident",
            ConfidenceLevel::Moderate => "Moderate",
            ConfidenceLevel::NeedsImprovement => "Needs Improvement",
            ConfidenceLevel::Error => "Error",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four raw signals the scorer consumes, plus the means reported
/// alongside them.
#[derive(Debug, Clone, Copy)]
pub struct RawMetrics {
    pub pitch_mean_hz: f32,
    pub pitch_std_hz: f32,
    pub energy_mean: f32,
    pub energy_std: f32,
    pub pause_count: usize,
    pub filler_count: usize,
}

/// Raw metrics mapped onto [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct Normalized {
    pub pitch_std: f32,
    pub energy: f32,
    pub fillers: f32,
    pub pauses: f32,
}

/// Map the raw metrics onto [0, 1]. Extreme inputs clamp rather than
/// escape the range.
pub fn normalize(metrics: &RawMetrics) -> Normalized {
    Normalized {
        pitch_std: (metrics.pitch_std_hz / PITCH_STD_RANGE).clamp(0.0, 1.0),
        energy: (metrics.energy_mean * ENERGY_SCALE).clamp(0.0, 1.0),
        fillers: (metrics.filler_count as f32 / FILLER_RANGE).clamp(0.0, 1.0),
        pauses: (metrics.pause_count as f32 / PAUSE_RANGE).clamp(0.0, 1.0),
    }
}

/// Score the metrics: start at 100 and subtract weighted penalties,
/// flooring at 0. Low energy is penalized (1 - normalized), the other
/// three penalize high values.
///
/// Returns the unrounded score; the orchestrator rounds for the report and
/// derives the level from the rounded value, so the level stays a pure
/// function of the score the caller actually sees.
pub fn confidence_score(metrics: &RawMetrics) -> f32 {
    let n = normalize(metrics);

    let mut score = 100.0;
    score -= n.pitch_std * PITCH_WEIGHT;
    score -= (1.0 - n.energy) * ENERGY_WEIGHT;
    score -= n.fillers * FILLER_WEIGHT;
    score -= n.pauses * PAUSE_WEIGHT;
    score.max(0.0)
}

/// Level thresholds: 75 and 50, closed on the upper side of each bucket.
pub fn level_for_score(score: f32) -> ConfidenceLevel {
    if score >= 75.0 {
        ConfidenceLevel::Confident
    } else if score >= 50.0 {
        ConfidenceLevel::Moderate
    } else {
        ConfidenceLevel::NeedsImprovement
    }
}

/// Rule-based acoustic suggestions, each independently triggered, in
/// fixed order.
pub fn rule_suggestions(metrics: &RawMetrics) -> Vec<String> {
    let mut suggestions = Vec::new();

    if metrics.pitch_std_hz < LOW_PITCH_VARIATION {
        suggestions.push(SUGGEST_PITCH_VARIATION.to_string());
    }
    if metrics.energy_mean < LOW_ENERGY {
        suggestions.push(SUGGEST_MORE_VOLUME.to_string());
    }
    if metrics.filler_count >= MANY_FILLERS {
        suggestions.push(SUGGEST_FEWER_FILLERS.to_string());
    }
    if metrics.pause_count >= MANY_PAUSES {
        suggestions.push(SUGGEST_FEWER_PAUSES.to_string());
    }

    suggestions
}
