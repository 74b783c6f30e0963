use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use semvtt::annotate;
use semvtt::segmentation;
use semvtt::transcript;
use semvtt::types::{Language, SegmenterConfig};
use semvtt::vtt;

/// semvtt - Semantic subtitle generator
///
/// Converts Whisper-style JSON transcripts with word-level timestamps into
/// WEBVTT subtitles, breaking long sentences at linguistically natural
/// points.
#[derive(Parser, Debug)]
#[command(name = "semvtt")]
#[command(version = "0.1.0")]
#[command(about = "Semantic subtitle generator", long_about = None)]
struct Args {
    /// Input transcript JSON with word-level timestamps
    #[arg(value_name = "INPUT")]
    input_file: PathBuf,

    /// Output VTT file (default: input path with .vtt extension)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Maximum words per subtitle line
    #[arg(long, default_value_t = 7)]
    max_words: usize,

    /// Minimum words on each side of a split point
    #[arg(long, default_value_t = 3)]
    min_words: usize,

    /// Inter-word gap in seconds that forces a line break
    #[arg(long, default_value_t = 0.5)]
    pause_threshold: f64,

    /// Language for linguistic analysis (en, fr)
    #[arg(short, long, default_value = "en")]
    language: String,
}

impl Args {
    /// Validate CLI arguments
    fn validate(&self) -> Result<()> {
        if !self.input_file.exists() {
            anyhow::bail!("Input file does not exist: {:?}", self.input_file);
        }

        if !self.input_file.is_file() {
            anyhow::bail!("Input path is not a file: {:?}", self.input_file);
        }

        self.config().validate()
    }

    fn config(&self) -> SegmenterConfig {
        let mut config = SegmenterConfig::new(self.max_words);
        config.min_words = self.min_words;
        config.pause_threshold = self.pause_threshold;
        config
    }

    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input_file.with_extension("vtt"))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    args.validate()
        .context("Failed to validate command-line arguments")?;
    let mut config = args.config();

    println!("semvtt v0.1.0 - Semantic Subtitle Generator");
    println!("Input:  {:?}", args.input_file);
    println!("Output: {:?}", args.output_path());
    println!(
        "Window: {}-{} words, pause threshold {:.2}s",
        config.min_words, config.max_words, config.pause_threshold
    );

    println!("\n1. Loading transcript...");
    let loaded =
        transcript::load_words(&args.input_file).context("Failed to load input transcript")?;
    println!("   Extracted {} words", loaded.words.len());

    // Prefer the language the transcriber detected over the CLI default.
    let language_code = loaded
        .language
        .filter(|code| annotate::annotator_for(code).is_some())
        .unwrap_or_else(|| args.language.clone());
    if let Some(language) = Language::from_code(&language_code) {
        config.language = language;
    }
    let annotator = annotate::annotator_for(&language_code);
    match &annotator {
        Some(_) => println!("   Language: {}", language_code),
        None => println!(
            "   Language '{}' has no annotation provider; using punctuation rules only",
            language_code
        ),
    }

    println!("\n2. Segmenting into subtitle chunks...");
    let chunks = segmentation::segment_words(&loaded.words, &config, annotator.as_deref());
    println!("   Created {} chunks", chunks.len());

    println!("\n3. Writing VTT output...");
    let cues = vtt::assemble_cues(&chunks);
    let output_path = args.output_path();
    vtt::write_vtt(&output_path, &cues).context("Failed to write subtitle output")?;
    println!("   Wrote {} cues to {:?}", cues.len(), output_path);

    annotate::shutdown();
    println!("\n✓ Processing complete!");

    Ok(())
}
