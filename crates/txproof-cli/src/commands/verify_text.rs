//! Verify-text command - run the verifier on text that has already been extracted.

use std::io::Read;

use clap::Args;
use rust_decimal::Decimal;

use txproof_core::{DocumentVerifier, TransactionVerifier};

use super::{format_report, load_config, OutputFormat};

/// Arguments for the verify-text command.
#[derive(Args)]
pub struct VerifyTextArgs {
    /// Document text, or "-" to read from stdin
    #[arg(required = true)]
    text: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Largest qualifying statement row amount (overrides config)
    #[arg(long)]
    cap: Option<Decimal>,
}

pub async fn run(args: VerifyTextArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let text = if args.text == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        args.text
    };

    let mut verifier = DocumentVerifier::from_config(&config.verification);
    if let Some(cap) = args.cap {
        verifier = verifier.with_subsidy_max_amount(cap);
    }

    let report = verifier.verify(&text);
    println!("{}", format_report(&report, args.format, None)?);

    Ok(())
}
