use std::path::{Path, PathBuf};

use chrono::Local;

use crate::audio::loader::{self, Waveform};
use crate::audio::scratch::ScratchWav;
use crate::config::AppConfig;
use crate::dsp::{energy, envelope, pauses, pitch, presence, stft};
use crate::error::AnalysisError;
use crate::paths;
use crate::report::chart;
use crate::report::data::{AnalysisReport, DebugInfo};
use crate::transcribe::Transcriber;
use crate::util;

use super::score::{self, RawMetrics};
use super::use_case;

/// Per-request options for the orchestrator.
pub struct AnalyzeOptions {
    /// Render the waveform/spectrogram chart artifact.
    pub render_chart: bool,
    /// Where to place artifacts; defaults to the XDG reports directory.
    pub output_dir: Option<PathBuf>,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            render_chart: true,
            output_dir: None,
        }
    }
}

/// The analysis orchestrator.
///
/// Owns its configuration and the transcription collaborator; nothing is
/// read from ambient global state. One call to `analyze` is one complete,
/// synchronous request.
pub struct Analyzer {
    config: AppConfig,
    transcriber: Box<dyn Transcriber>,
}

impl Analyzer {
    pub fn new(config: AppConfig, transcriber: Box<dyn Transcriber>) -> Self {
        Self {
            config,
            transcriber,
        }
    }

    /// Analyze a recording and always produce a report.
    ///
    /// Decode failures and any unanticipated fault come back as an
    /// "Error"-level report with a diagnostic message, never as a raw
    /// error the caller has to handle.
    pub fn analyze(&self, path: &Path, opts: &AnalyzeOptions) -> AnalysisReport {
        match self.run(path, opts) {
            Ok(report) => report,
            Err(e) => AnalysisReport::error(e.to_string()),
        }
    }

    fn run(&self, path: &Path, opts: &AnalyzeOptions) -> Result<AnalysisReport, AnalysisError> {
        let wave = loader::load(path)?;
        let warning = presence::initial_silence_warning(&wave.samples, wave.sample_rate);

        let spectrogram = stft::compute(&wave.samples, wave.sample_rate, &Default::default());

        // Below the presence threshold, skip all feature extraction and
        // report the dedicated "No Voice" shape.
        let mut report = if presence::has_voice(wave.raw_peak) {
            self.measure(&wave, &spectrogram, warning)
        } else {
            AnalysisReport::no_voice(warning)
        };

        // The chart is a best-effort collaborator: a rendering failure
        // leaves the artifact absent, nothing more.
        if opts.render_chart && self.config.report.charts {
            report.spectrogram = self.render_chart(&wave, &spectrogram, opts);
        }

        Ok(report)
    }

    /// Extract the four feature tracks, score them, and assemble the full
    /// report.
    fn measure(
        &self,
        wave: &Waveform,
        spectrogram: &stft::Spectrogram,
        warning: Option<&'static str>,
    ) -> AnalysisReport {
        let pitch = pitch::analyze(spectrogram, &(&self.config.analysis).into());
        let energy = energy::analyze(&wave.samples);
        let pauses = pauses::analyze(
            &wave.samples,
            wave.sample_rate,
            &(&self.config.analysis).into(),
        );
        let fillers = envelope::analyze(&wave.samples);

        let metrics = RawMetrics {
            pitch_mean_hz: pitch.mean_hz,
            pitch_std_hz: pitch.std_hz,
            energy_mean: energy.mean,
            energy_std: energy.std,
            pause_count: pauses.pause_count,
            filler_count: fillers.filler_count,
        };

        let confidence_score = util::round_to(score::confidence_score(&metrics), 1);
        let confidence_level = score::level_for_score(confidence_score);

        let mut suggestions = score::rule_suggestions(&metrics);

        // Transcript-driven enrichment degrades silently when the
        // collaborator is unavailable.
        let transcribed_text = self.request_transcript(wave);
        if let Some(uc) = transcribed_text.as_deref().and_then(use_case::detect) {
            suggestions.extend(uc.suggestions.iter().map(|s| s.to_string()));
        }

        let debug_info = DebugInfo::new(
            metrics.pitch_mean_hz,
            metrics.pitch_std_hz,
            metrics.energy_mean,
            metrics.energy_std,
            pauses.pause_count,
            pauses.total_silence_secs,
            fillers.filler_count,
        );

        AnalysisReport {
            confidence_level,
            confidence_score,
            pitch_mean: metrics.pitch_mean_hz,
            pitch_std: metrics.pitch_std_hz,
            energy_mean: metrics.energy_mean,
            energy_std: metrics.energy_std,
            pause_count: pauses.pause_count,
            filler_count: fillers.filler_count,
            warnings: warning.into_iter().map(String::from).collect(),
            suggestions,
            debug_info: Some(debug_info),
            transcribed_text,
            spectrogram: None,
            error: None,
        }
        .rounded()
    }

    /// Hand the collaborator a scratch WAV and collect the transcript.
    /// Every failure path (scratch I/O or the service itself) degrades
    /// to "no transcript".
    fn request_transcript(&self, wave: &Waveform) -> Option<String> {
        let scratch = ScratchWav::write(&wave.samples, wave.sample_rate).ok()?;
        self.transcriber.transcribe(scratch.path()).ok()
    }

    /// Render the chart artifact, returning its file name on success.
    fn render_chart(
        &self,
        wave: &Waveform,
        spectrogram: &stft::Spectrogram,
        opts: &AnalyzeOptions,
    ) -> Option<String> {
        let dir = opts
            .output_dir
            .clone()
            .unwrap_or_else(paths::reports_dir);
        let name = format!(
            "spectrogram_{}.png",
            Local::now().format("%Y%m%d_%H%M%S")
        );

        chart::render(&wave.samples, wave.sample_rate, spectrogram, &dir.join(&name))
            .ok()
            .map(|_| name)
    }
}
