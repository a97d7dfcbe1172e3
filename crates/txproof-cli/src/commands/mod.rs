//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod process;
pub mod verify_text;

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use txproof_core::{PureOcrEngine, SourceKind, TextSource, TxProofConfig, VerificationReport};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON response envelope
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("txproof")
        .join("config.json")
}

/// Load the configuration from `-c`, the default file, or built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<TxProofConfig> {
    if let Some(path) = config_path {
        return Ok(TxProofConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(TxProofConfig::from_file(&default_path)?)
    } else {
        Ok(TxProofConfig::default())
    }
}

/// Read a document into text, loading the OCR engine only when it may be needed.
pub fn read_document(path: &Path, config: &TxProofConfig) -> txproof_core::Result<String> {
    let kind = SourceKind::from_path(path)?;

    let engine = match kind {
        SourceKind::PlainText => None,
        SourceKind::Image | SourceKind::Pdf => load_ocr_engine(config),
    };

    let mut source = TextSource::new(config);
    if let Some(engine) = &engine {
        source = source.with_ocr(engine);
    }
    source.read_text(path)
}

fn load_ocr_engine(config: &TxProofConfig) -> Option<PureOcrEngine> {
    if !config.has_ocr_models() {
        debug!("No OCR models in {}", config.models.model_dir.display());
        return None;
    }

    match PureOcrEngine::from_config(config) {
        Ok(engine) => Some(engine),
        Err(e) => {
            warn!("Failed to load OCR engine: {}", e);
            None
        }
    }
}

/// Render a report in the requested format.
pub fn format_report(
    report: &VerificationReport,
    format: OutputFormat,
    source: Option<&Path>,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(&txproof_core::ResponseEnvelope::ok(
            report.clone(),
        ))?),
        OutputFormat::Csv => format_csv(report, source),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

fn format_csv(report: &VerificationReport, source: Option<&Path>) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "file",
        "document_type",
        "amount",
        "transaction_id",
        "date",
        "mode",
        "bank",
        "is_transaction",
        "confidence_score",
        "missing_fields",
        "final_status",
        "reason",
    ])?;

    let fields = &report.extracted_data;
    let validation = &report.validation_result;

    wtr.write_record([
        source.map(|p| p.display().to_string()).unwrap_or_default().as_str(),
        report.document_type.as_str(),
        fields.amount.as_deref().unwrap_or_default(),
        fields.transaction_id.as_deref().unwrap_or_default(),
        fields.date.as_deref().unwrap_or_default(),
        fields.mode.map(|m| m.as_str()).unwrap_or_default(),
        fields.bank.as_deref().unwrap_or_default(),
        &validation.is_transaction().to_string(),
        &validation
            .confidence_score()
            .map(|s| format!("{:.2}", s))
            .unwrap_or_default(),
        &validation.missing_fields().join(";"),
        report.final_decision.final_status.as_str(),
        &report.final_decision.reason,
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &VerificationReport) -> String {
    let fields = &report.extracted_data;
    let validation = &report.validation_result;
    let or_dash = |v: Option<&str>| v.unwrap_or("-").to_string();

    let mut output = String::new();

    output.push_str(&format!("Document type: {}\n", report.document_type));
    output.push_str(&format!(
        "Status: {} ({})\n",
        report.final_decision.final_status, report.final_decision.reason
    ));
    match validation.confidence_score() {
        Some(score) => output.push_str(&format!("Confidence: {:.2}\n", score)),
        None => output.push_str("Confidence: n/a\n"),
    }
    output.push('\n');

    output.push_str("Extracted:\n");
    output.push_str(&format!("  Amount:         {}\n", or_dash(fields.amount.as_deref())));
    output.push_str(&format!("  Transaction ID: {}\n", or_dash(fields.transaction_id.as_deref())));
    output.push_str(&format!("  Date:           {}\n", or_dash(fields.date.as_deref())));
    output.push_str(&format!("  Mode:           {}\n", or_dash(fields.mode.map(|m| m.as_str()))));
    output.push_str(&format!("  Bank:           {}\n", or_dash(fields.bank.as_deref())));

    if !validation.missing_fields().is_empty() {
        output.push_str(&format!("\nMissing: {}\n", validation.missing_fields().join(", ")));
    }

    if let Some(rows) = &report.statement_rows {
        output.push_str(&format!("\nQualifying rows: {}\n", rows.len()));
        for row in rows {
            output.push_str(&format!("  {}  {}\n", row.date, row.amount));
        }
    }

    output
}
