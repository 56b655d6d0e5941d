//! Error types for the redaction engine.

use thiserror::Error;

/// Result type for redaction operations.
pub type Result<T> = std::result::Result<T, RedactionError>;

/// Errors that can occur while building redaction rules.
///
/// Applying rules never fails; only compiling them can.
#[derive(Error, Debug)]
pub enum RedactionError {
    /// Failed to compile the match pattern for a field.
    #[error("pattern error for field `{field}`: {reason}")]
    PatternError {
        /// Field whose rule could not be built.
        field: String,
        /// Compiler diagnostic.
        reason: String,
    },
}

impl RedactionError {
    /// Name of the field whose rule failed to compile.
    pub fn field(&self) -> &str {
        match self {
            RedactionError::PatternError { field, .. } => field,
        }
    }
}
