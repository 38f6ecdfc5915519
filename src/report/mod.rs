pub mod chart;
pub mod data;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;

use crate::analysis::score::ConfidenceLevel;
use self::data::AnalysisReport;

/// Print a styled summary of the report to the terminal.
pub fn print_report(report: &AnalysisReport) {
    let level = match report.confidence_level {
        ConfidenceLevel::Confident => style(report.confidence_level.as_str()).green(),
        ConfidenceLevel::Moderate => style(report.confidence_level.as_str()).yellow(),
        _ => style(report.confidence_level.as_str()).red(),
    };

    println!();
    println!(
        "  Confidence: {} ({}/100)",
        level,
        style(report.confidence_score).bold()
    );

    if let Some(error) = &report.error {
        println!("  {} {error}", style("ERROR").red());
    }

    if report.debug_info.is_some() {
        println!();
        println!("  Pitch:   {:.1} Hz (std {:.2})", report.pitch_mean, report.pitch_std);
        println!("  Energy:  {:.5} (std {:.5})", report.energy_mean, report.energy_std);
        println!("  Pauses:  {}", report.pause_count);
        println!("  Fillers: {}", report.filler_count);
    }

    if let Some(text) = &report.transcribed_text {
        if !text.is_empty() {
            println!();
            println!("  Transcript: {}", style(text).dim());
        }
    }

    for warning in &report.warnings {
        println!();
        println!("  {} {warning}", style("!").yellow());
    }

    if !report.suggestions.is_empty() {
        println!();
        println!("  Suggestions:");
        for (i, suggestion) in report.suggestions.iter().enumerate() {
            println!("    {}. {suggestion}", i + 1);
        }
    }

    if let Some(info) = &report.debug_info {
        println!();
        println!(
            "  {}",
            style(format!(
                "raw: pitch {} / {} · energy {} / {} · pauses {} · silence {} · fillers {}",
                info.pitch_mean,
                info.pitch_std,
                info.energy_mean,
                info.energy_std,
                info.pauses,
                info.total_silence,
                info.filler_count
            ))
            .dim()
        );
    }
}

/// Write the report as pretty-printed JSON into `dir`, creating it as
/// needed. Returns the path written.
pub fn save_report(report: &AnalysisReport, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create report directory: {}", dir.display()))?;

    let path = dir.join(format!(
        "report_{}.json",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ));

    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;

    Ok(path)
}
