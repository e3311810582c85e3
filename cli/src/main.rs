//! takeoff CLI - callout takeoff extraction from drawing PDFs

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use takeoff::render::{write_json, JsonFormat};
use takeoff::{
    ChatNormalizer, CollectedDiagnostics, NormalizerConfig, PdfSource, Pipeline, TakeoffOptions,
};

const DEFAULT_OUTPUT: &str = "sample_output.json";

#[derive(Parser, Debug)]
#[command(name = "takeoff")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract equipment callouts and abbreviations from drawing PDFs", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output JSON file
    #[arg(value_name = "OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Clean the abbreviation dictionary with a chat model
    #[arg(long)]
    normalize: bool,

    /// API key for the normalizer
    #[arg(long, env = "TAKEOFF_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "TAKEOFF_BASE_URL", default_value = NormalizerConfig::DEFAULT_BASE_URL)]
    base_url: String,

    /// Model used by the normalizer
    #[arg(long, env = "TAKEOFF_MODEL", default_value = NormalizerConfig::DEFAULT_MODEL)]
    model: String,

    /// Normalizer request timeout in seconds
    #[arg(long, env = "TAKEOFF_TIMEOUT_SECS", value_name = "SECS")]
    timeout: Option<u64>,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    /// Fail if any page's text cannot be extracted
    #[arg(long)]
    strict: bool,

    /// Scan page text as extracted, without folding quote and diameter marks
    #[arg(long)]
    no_cleanup: bool,
}

impl Cli {
    fn options(&self) -> TakeoffOptions {
        let options = TakeoffOptions::new().with_text_cleanup(!self.no_cleanup);
        if self.strict {
            options.strict()
        } else {
            options.lenient()
        }
    }

    fn normalizer_config(&self) -> NormalizerConfig {
        let mut config = NormalizerConfig::new()
            .with_base_url(&self.base_url)
            .with_model(&self.model);
        if let Some(ref key) = self.api_key {
            config = config.with_api_key(key);
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let diagnostics = Arc::new(CollectedDiagnostics::new());
    let mut pipeline = Pipeline::new(cli.options()).with_diagnostics(diagnostics.clone());

    if cli.normalize {
        match ChatNormalizer::new(cli.normalizer_config()) {
            Ok(normalizer) => pipeline = pipeline.with_normalizer(normalizer),
            Err(e) => warn(&format!("normalization disabled: {}", e)),
        }
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Reading PDF...");
    let source = PdfSource::open(&cli.input)?;

    pb.set_message("Extracting callouts...");
    let result = pipeline.run_with_stats(&source);
    pb.finish_and_clear();
    let (takeoff, stats) = result?;

    for diagnostic in diagnostics.drain() {
        if diagnostic.level() <= log::Level::Warn {
            warn(&diagnostic.to_string());
        } else {
            println!("{} {}", "Note:".cyan(), diagnostic);
        }
    }

    let format = if cli.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    write_json(&takeoff, &cli.output, format)?;

    println!(
        "Parsed {} pages in {:.2}s: {} unique items, {} abbreviations{}",
        stats.page_count,
        stats.elapsed_ms as f64 / 1000.0,
        stats.item_count,
        stats.abbreviation_count,
        if stats.normalized { " (normalized)" } else { "" }
    );
    print_saved(&cli.output, takeoff.items.len(), takeoff.abbreviations.len());

    Ok(())
}

fn warn(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}

fn print_saved(path: &Path, items: usize, abbreviations: usize) {
    println!(
        "{} {} items + {} abbreviations to {}",
        "Wrote".green(),
        items,
        abbreviations,
        path.display()
    );
}
