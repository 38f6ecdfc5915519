use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vocaledge")]
#[command(about = "Assess speaking confidence from a recorded speech sample")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze a recording and produce a confidence report
    Analyze {
        /// Path to the audio file (WAV)
        file: PathBuf,

        /// Transcript text from an external transcription service
        #[arg(long, conflicts_with = "transcript_file")]
        transcript: Option<String>,

        /// Read the transcript from a file instead
        #[arg(long)]
        transcript_file: Option<PathBuf>,

        /// Print the report as JSON instead of the styled summary
        #[arg(long)]
        json: bool,

        /// Skip rendering the waveform/spectrogram chart
        #[arg(long)]
        no_chart: bool,

        /// Directory for report artifacts (defaults to the XDG reports dir)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the coaching suggestions for a speaking context
    Suggestions {
        /// One of: interview, singing, public_speaking
        use_case: String,
    },

    /// Show where data and config files are stored
    Paths,
}
