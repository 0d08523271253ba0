//! Unified error hierarchy for RecoveryRS
//!
//! The scoring functions themselves are total over well-typed input. The only
//! errors they surface are contract violations caught at the boundary
//! (malformed records, wrong window shape), plus the I/O and import errors of
//! the surrounding CLI glue.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all RecoveryRS operations
#[derive(Debug, Error)]
pub enum RecoveryRsError {
    /// Caller passed data the engine's contract does not allow
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Loading daily log rows failed
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Contract violations detected at the engine boundary
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Raw value outside the domain the source representation can hold
    #[error("{field} out of range: {value} (expected {expected})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    /// NaN or infinite raw value
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    /// Window does not have the required number of days
    #[error("Window length mismatch: expected {expected} days, got {actual}")]
    WindowLength { expected: usize, actual: usize },

    /// Window dates are not in the order the window type requires
    #[error("Window out of order at position {position}")]
    WindowOrder { position: usize },

    /// Two rows of the same record kind share a date
    #[error("Duplicate {record_kind} record for {date}")]
    DuplicateDate {
        record_kind: &'static str,
        date: NaiveDate,
    },
}

/// Errors raised while loading manual or automatic log rows
#[derive(Debug, Error)]
pub enum ImportError {
    /// File extension not recognised
    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    /// Row could not be parsed
    #[error("Parse error in {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    /// Input file missing
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },
}

/// Result type alias for RecoveryRS operations
pub type Result<T> = std::result::Result<T, RecoveryRsError>;

impl RecoveryRsError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RecoveryRsError::Validation(_) => ErrorSeverity::Warning,
            RecoveryRsError::Import(ImportError::FileNotFound { .. }) => ErrorSeverity::Warning,
            RecoveryRsError::Import(_) => ErrorSeverity::Error,
            RecoveryRsError::Io(_) => ErrorSeverity::Error,
            RecoveryRsError::Internal(_) => ErrorSeverity::Critical,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            RecoveryRsError::Import(ImportError::FileNotFound { path }) => {
                format!("Could not find log file: {}", path.display())
            }
            RecoveryRsError::Validation(ValidationError::WindowLength { expected, actual }) => {
                format!(
                    "Expected {} days of logs but received {}. Check the requested date range.",
                    expected, actual
                )
            }
            RecoveryRsError::Validation(ValidationError::DuplicateDate { record_kind, date }) => {
                format!("More than one {} entry was found for {}.", record_kind, date)
            }
            _ => self.to_string(),
        }
    }

    /// Emit the error as a tracing event at its severity level
    pub fn log(&self) {
        let severity = self.severity();
        if severity.to_tracing_level() == tracing::Level::ERROR {
            tracing::error!(?severity, error = %self, "Operation failed");
        } else {
            tracing::warn!(?severity, error = %self, "Operation failed");
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical system error requiring immediate attention
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = RecoveryRsError::Validation(ValidationError::NotFinite { field: "hrv_ms" });
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert_eq!(err.severity().to_tracing_level(), tracing::Level::WARN);

        let err = RecoveryRsError::Internal("test".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_severity_levels_for_cli_failures() {
        let err = RecoveryRsError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(err.severity().to_tracing_level(), tracing::Level::ERROR);

        let err = RecoveryRsError::Import(ImportError::FileNotFound {
            path: PathBuf::from("wearable.json"),
        });
        assert_eq!(err.severity().to_tracing_level(), tracing::Level::WARN);

        let err = RecoveryRsError::Import(ImportError::UnsupportedFormat {
            format: "xlsx".to_string(),
        });
        assert_eq!(err.severity(), ErrorSeverity::Error);

        // no subscriber installed, must still be callable
        err.log();
    }

    #[test]
    fn test_validation_message_names_field() {
        let err = ValidationError::OutOfRange {
            field: "energy_focus",
            value: 6.0,
            expected: "1-5",
        };
        let message = err.to_string();
        assert!(message.contains("energy_focus"));
        assert!(message.contains("1-5"));
    }

    #[test]
    fn test_user_messages() {
        let err = RecoveryRsError::Import(ImportError::FileNotFound {
            path: PathBuf::from("manual.csv"),
        });
        assert!(err.user_message().contains("Could not find"));

        let err: RecoveryRsError = ValidationError::WindowLength {
            expected: 7,
            actual: 5,
        }
        .into();
        assert!(err.user_message().contains("Expected 7 days"));
    }
}
