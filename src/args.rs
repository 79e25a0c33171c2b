use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use yield_brochure::BrochureTone;

#[derive(Parser, Debug)]
#[command(name = "yield-brochure")]
#[command(about = "Writes a company brochure from its website with an LLM")]
#[command(version)]
pub struct Args {
    /// Company name used in the brochure
    pub company: String,

    /// Landing page URL including http:// or https://
    pub url: String,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the model
    #[arg(short, long)]
    pub model: Option<String>,

    /// Brochure tone
    #[arg(short, long, value_enum)]
    pub tone: Option<ToneArg>,

    /// Maximum characters of website content sent to the writer
    #[arg(long)]
    pub max_chars: Option<usize>,

    /// Write the finished brochure to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the finished brochure to <dir>/<company>.md
    #[arg(long)]
    pub save_dir: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ToneArg {
    Professional,
    Humorous,
}

/// Convert from CLI argument tone to the library tone
pub fn convert_tone(arg: ToneArg) -> BrochureTone {
    match arg {
        ToneArg::Professional => BrochureTone::Professional,
        ToneArg::Humorous => BrochureTone::Humorous,
    }
}
