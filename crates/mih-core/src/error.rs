//! # Error Types
//!
//! Domain-specific error types for mih-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mih-core errors (this file)                                           │
//! │  ├── CoreError         - Quote computation failures                    │
//! │  ├── ValidationError   - One field failing one rule                    │
//! │  └── ValidationErrors  - Every failing field of a submission           │
//! │                                                                         │
//! │  quote-cli (app)                                                       │
//! │  └── anyhow::Error     - I/O context around CoreError                  │
//! │                                                                         │
//! │  Flow: ValidationErrors → CoreError → anyhow → stderr / exit code      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Retry Semantics
//! None of these errors are transient. The calculator is pure, so a failure
//! reproduces identically until the form data or the price table is fixed.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Quote computation errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The price table has no entry for a requested tier or catalogue key.
    ///
    /// ## When This Occurs
    /// - A stand surface outside the published surface tiers
    /// - A `puissance` value that is not a known electricity tier
    /// - A price table fixture missing a catalogue item
    ///
    /// Billing zero here would under-bill the exhibitor, so the whole
    /// computation is rejected instead.
    #[error("No price for {table} entry '{key}'")]
    MissingPrice { table: &'static str, key: String },

    /// The price table lists a negative amount.
    ///
    /// ## When This Occurs
    /// - A hand-edited price table file with a sign typo
    ///
    /// A negative unit price would credit the exhibitor and pull every
    /// section total down, so the table is refused at load.
    #[error("Negative price for {table} entry '{key}': {price}")]
    NegativePrice {
        table: &'static str,
        key: String,
        price: Money,
    },

    /// An amount left the representable range while computing a line or a sum.
    #[error("Amount overflow while computing {context}")]
    AmountOverflow { context: String },

    /// The form snapshot could not be decoded (negative quantity,
    /// unknown stand type literal, wrong JSON type, ...).
    #[error("Malformed form data: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The submission failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid e-mail, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A checkbox that must be ticked was not.
    #[error("{field} must be accepted")]
    MustBeAccepted { field: String },

    /// An amount is negative or above the accepted ceiling.
    #[error("{field} must be between 0 and {max}")]
    AmountOutOfRange { field: String, max: Money },
}

impl ValidationError {
    /// The wire name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::MustBeAccepted { field }
            | ValidationError::AmountOutOfRange { field, .. } => field,
        }
    }
}

/// Every validation failure of one submission, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    /// Returns true when nothing failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Records a failure.
    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// Iterates over the failures.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// `Ok(())` when empty, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
