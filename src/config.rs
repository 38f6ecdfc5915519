use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::dsp::pauses::PauseConfig;
use crate::dsp::pitch::PitchConfig;
use crate::paths;

/// Application configuration, loaded from config.toml.
///
/// serde's `default` attribute means: if a field is missing from the TOML
/// file, use the value from the Default implementation instead of failing
/// to parse. This makes the config file optional — every field has a
/// sensible default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Lower edge of the pitch search band (Hz).
    pub pitch_floor_hz: f32,
    /// Upper edge of the pitch search band (Hz).
    pub pitch_ceiling_hz: f32,
    /// Silence threshold for pause segmentation, dB below peak.
    pub pause_top_db: f32,
    /// Minimum gap duration that counts as a pause (seconds).
    pub min_pause_gap_secs: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Render the waveform/spectrogram chart alongside the report.
    pub charts: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pitch_floor_hz: 80.0,
            pitch_ceiling_hz: 600.0,
            pause_top_db: 30.0,
            min_pause_gap_secs: 0.25,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { charts: true }
    }
}

/// Bridge between the user-facing config format and the DSP parameters.
impl From<&AnalysisConfig> for PitchConfig {
    fn from(cfg: &AnalysisConfig) -> Self {
        PitchConfig {
            floor_hz: cfg.pitch_floor_hz,
            ceiling_hz: cfg.pitch_ceiling_hz,
        }
    }
}

impl From<&AnalysisConfig> for PauseConfig {
    fn from(cfg: &AnalysisConfig) -> Self {
        PauseConfig {
            top_db: cfg.pause_top_db,
            min_gap_secs: cfg.min_pause_gap_secs,
            ..PauseConfig::default()
        }
    }
}

/// Load the application config from $XDG_CONFIG_HOME/vocaledge/config.toml.
/// If the file doesn't exist, returns defaults.
pub fn load_config() -> Result<AppConfig> {
    let path = paths::config_file();

    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}
