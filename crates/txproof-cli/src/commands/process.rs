//! Process command - verify a single document file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use txproof_core::{DocumentVerifier, ResponseEnvelope, TransactionVerifier};

use super::{format_report, load_config, read_document, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF, PNG/JPEG image or .txt)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// OCR model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(model_dir) = &args.model_dir {
        config.models.model_dir = model_dir.clone();
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Reading document...");

    let text = match read_document(&args.input, &config) {
        Ok(text) => text,
        Err(e) => {
            pb.finish_and_clear();
            if let OutputFormat::Json = args.format {
                let envelope = serde_json::to_string(&ResponseEnvelope::failed(&e))?;
                write_output(&envelope, args.output.as_deref())?;
            }
            return Err(e.into());
        }
    };

    pb.set_message("Verifying...");
    let verifier = DocumentVerifier::from_config(&config.verification);
    let report = verifier.verify(&text);
    pb.finish_and_clear();

    let output = format_report(&report, args.format, Some(&args.input))?;
    write_output(&output, args.output.as_deref())?;

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn write_output(output: &str, path: Option<&Path>) -> anyhow::Result<()> {
    if let Some(path) = path {
        fs::write(path, output)?;
        println!("{} Output written to {}", style("✓").green(), path.display());
    } else {
        println!("{}", output);
    }
    Ok(())
}
