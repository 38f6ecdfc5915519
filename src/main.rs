mod analysis;
mod audio;
mod cli;
mod config;
mod dsp;
mod error;
mod paths;
mod report;
mod transcribe;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use analysis::pipeline::{AnalyzeOptions, Analyzer};
use cli::{Cli, Command};
use transcribe::{FixedTranscript, NoTranscriber, Transcriber};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            file,
            transcript,
            transcript_file,
            json,
            no_chart,
            output,
        } => {
            let app_config = config::load_config()?;

            let transcript = match (transcript, transcript_file) {
                (Some(text), _) => Some(text),
                (None, Some(path)) => Some(
                    std::fs::read_to_string(&path)
                        .with_context(|| {
                            format!("Failed to read transcript file: {}", path.display())
                        })?
                        .trim()
                        .to_string(),
                ),
                (None, None) => None,
            };

            let transcriber: Box<dyn Transcriber> = match transcript {
                Some(text) => Box::new(FixedTranscript(text)),
                None => Box::new(NoTranscriber),
            };

            let opts = AnalyzeOptions {
                render_chart: !no_chart,
                output_dir: output,
            };

            let analyzer = Analyzer::new(app_config, transcriber);
            let report = analyzer.analyze(&file, &opts);

            let out_dir = opts.output_dir.clone().unwrap_or_else(paths::reports_dir);
            let saved = report::save_report(&report, &out_dir)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                report::print_report(&report);
                println!();
                println!("Report saved to {}", style(saved.display()).green());
                if let Some(name) = &report.spectrogram {
                    println!(
                        "Chart saved to {}",
                        style(out_dir.join(name).display()).green()
                    );
                }
            }
        }

        Command::Suggestions { use_case } => match analysis::use_case::find(&use_case) {
            Some(uc) => {
                println!("Suggestions for {}:", style(uc.key).cyan());
                for suggestion in uc.suggestions {
                    println!("  - {suggestion}");
                }
            }
            None => anyhow::bail!(
                "Unknown use case: {use_case}. Use interview, singing, or public_speaking."
            ),
        },

        Command::Paths => {
            println!("Config file: {}", paths::config_file().display());
            println!("Data dir:    {}", paths::data_dir().display());
            println!("Reports dir: {}", paths::reports_dir().display());
        }
    }

    Ok(())
}
