//! Custom error types for the wallet ledger
//!
//! Every fallible ledger, storage, and history operation returns a
//! [`LedgerError`]. Callers that only care about the broad category of a
//! failure can collapse it with [`LedgerError::kind`].

use std::fmt;

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Entity not found errors (wallets, files)
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// An argument was out of range or otherwise unusable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A wallet does not hold enough money for the requested movement
    #[error("Insufficient funds in wallet '{wallet}': need {needed}, have {available}")]
    InsufficientFunds {
        wallet: String,
        needed: u64,
        available: u64,
    },

    /// A ledger-wide invariant does not hold for the requested operation
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// The process is not allowed to touch a backing file
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// A persisted record could not be parsed
    #[error("Malformed record: {0}")]
    Malformed(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Broad classification of a [`LedgerError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidArgument,
    InvariantViolation,
    IoFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::InvariantViolation => write!(f, "invariant violation"),
            Self::IoFailure => write!(f, "I/O failure"),
        }
    }
}

impl LedgerError {
    /// Create a "not found" error for wallets
    pub fn wallet_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Wallet",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for files
    pub fn file_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "File",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for wallets
    pub fn wallet_exists(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Wallet",
            identifier: identifier.into(),
        }
    }

    /// Collapse this error onto its broad kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidArgument(_) | Self::InsufficientFunds { .. } => {
                ErrorKind::InvalidArgument
            }
            Self::Duplicate { .. } | Self::InvariantViolation(_) => ErrorKind::InvariantViolation,
            Self::Io(_)
            | Self::PermissionDenied(_)
            | Self::Malformed(_)
            | Self::Json(_)
            | Self::Config(_) => ErrorKind::IoFailure,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a malformed-record error
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    /// Check if this is a permission error
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::file_not_found(err.to_string()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(err.to_string()),
            _ => Self::Io(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::Io(io) => match io.kind() {
                std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(err.to_string()),
                _ => Self::Io(err.to_string()),
            },
            _ => Self::Malformed(err.to_string()),
        }
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
