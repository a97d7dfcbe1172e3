//! Document, evidence and decision data models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Closed set of document kinds the classifier can assign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    /// Ledger-style bank statement.
    BankStatement,
    /// NEFT transfer acknowledgment.
    NeftAck,
    /// UPI payment receipt (Google Pay, PhonePe, ...).
    UpiReceipt,
    /// Nothing recognizable.
    #[default]
    Unknown,
}

impl DocumentType {
    /// Wire tag, e.g. `BANK_STATEMENT`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::BankStatement => "BANK_STATEMENT",
            DocumentType::NeftAck => "NEFT_ACK",
            DocumentType::UpiReceipt => "UPI_RECEIPT",
            DocumentType::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment rail named in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMode {
    Upi,
    Imps,
    Neft,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Upi => "UPI",
            PaymentMode::Imps => "IMPS",
            PaymentMode::Neft => "NEFT",
        }
    }
}

/// Fields pulled from the normalized text.
///
/// `amount` and `date` hold the matched text verbatim, not parsed values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    /// Raw amount match, e.g. `rs.500`.
    pub amount: Option<String>,

    /// Digit run following a UTR/RRN/transaction-id label.
    pub transaction_id: Option<String>,

    /// Raw date match, e.g. `12/01/2024` or `5 jan 2024`.
    pub date: Option<String>,

    /// Payment mode.
    pub mode: Option<PaymentMode>,

    /// Known issuer or app name.
    pub bank: Option<String>,
}

/// One (date, amount) pair found in a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRow {
    /// Raw date text.
    pub date: String,
    /// Amount with grouping commas removed.
    pub amount: Decimal,
}

/// Validation outcome of a document.
///
/// The two arms correspond to the two validation paths. Only the scored arm
/// carries a confidence value; the statement arm serializes without a
/// `confidence_score` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidationResult {
    Scored(ScoredValidation),
    Statement(StatementValidation),
}

/// Result of weighted evidence scoring (non-statement documents).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredValidation {
    pub is_transaction: bool,
    pub confidence_score: f64,
    pub missing_fields: Vec<String>,
    pub is_valid_structure: bool,
}

/// Result of the statement short-circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementValidation {
    pub is_transaction: bool,
    pub missing_fields: Vec<String>,
    pub is_valid_structure: bool,
}

impl ValidationResult {
    pub fn is_transaction(&self) -> bool {
        match self {
            ValidationResult::Scored(v) => v.is_transaction,
            ValidationResult::Statement(v) => v.is_transaction,
        }
    }

    pub fn is_valid_structure(&self) -> bool {
        match self {
            ValidationResult::Scored(v) => v.is_valid_structure,
            ValidationResult::Statement(v) => v.is_valid_structure,
        }
    }

    /// Confidence score, absent on the statement path.
    pub fn confidence_score(&self) -> Option<f64> {
        match self {
            ValidationResult::Scored(v) => Some(v.confidence_score),
            ValidationResult::Statement(_) => None,
        }
    }

    pub fn missing_fields(&self) -> &[String] {
        match self {
            ValidationResult::Scored(v) => &v.missing_fields,
            ValidationResult::Statement(v) => &v.missing_fields,
        }
    }
}

/// Externally visible outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinalStatus {
    Valid,
    #[serde(rename = "Needs Review")]
    NeedsReview,
    Invalid,
}

impl FinalStatus {
    /// Fixed human-readable reason for this status.
    pub fn reason(&self) -> &'static str {
        match self {
            FinalStatus::Valid => "High confidence transaction proof",
            FinalStatus::NeedsReview => "Partial transaction evidence",
            FinalStatus::Invalid => "Insufficient transaction evidence",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FinalStatus::Valid => "Valid",
            FinalStatus::NeedsReview => "Needs Review",
            FinalStatus::Invalid => "Invalid",
        }
    }
}

impl std::fmt::Display for FinalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final status with its reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalDecision {
    pub final_status: FinalStatus,
    pub reason: String,
}

impl From<FinalStatus> for FinalDecision {
    fn from(status: FinalStatus) -> Self {
        Self {
            final_status: status,
            reason: status.reason().to_string(),
        }
    }
}

/// Complete verification record for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub document_type: DocumentType,
    pub extracted_data: ExtractedFields,
    pub validation_result: ValidationResult,
    pub final_decision: FinalDecision,

    /// Statement rows at or below the cap (statement path only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement_rows: Option<Vec<TransactionRow>>,
}

/// Response payload wrapping a report or a processing failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<VerificationReport>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ResponseEnvelope {
    pub fn ok(report: VerificationReport) -> Self {
        Self {
            success: true,
            data: Some(report),
            error: None,
            details: None,
        }
    }

    pub fn failed(details: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            data: None,
            error: Some("Document processing failed".to_string()),
            details: Some(details.to_string()),
        }
    }
}
