//! Error types for the trip planning library.
//!
//! All failures are expressed through [`TripError`]. Validation failures are
//! aggregates: every violated field is collected into one
//! [`TripError::Validation`] carrying the complete list of
//! [`ValidationError`] entries, so callers can surface all problems from a
//! single pass instead of fixing them one at a time.
//!
//! Every error also classifies into a fixed [`ErrorCode`] taxonomy, which
//! drives the user-facing message table and lets callers decide log-level or
//! retry policy by category rather than by variant.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field-level validation violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Name of the field that violated a rule
    pub field: String,
    /// Human-readable description of the violation
    pub message: String,
}

impl ValidationError {
    /// Create a validation error for a field.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Fixed taxonomy of error codes used for classification and user messaging.
///
/// The codes partition into disjoint behavioral categories (validation,
/// database, business-rule, network, generic) checked via
/// [`ErrorCode::is_validation`], [`ErrorCode::is_database`], and
/// [`ErrorCode::is_network`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors
    ValidationError,
    InvalidDateRange,
    InvalidTimeFormat,
    RequiredField,

    // Database errors
    DatabaseError,
    RecordNotFound,
    DuplicateRecord,
    ForeignKeyConstraint,

    // Business logic errors
    TripDateConflict,
    ActivityOutsideTripRange,
    PackingListNotEmpty,

    // Network/API errors
    NetworkError,
    ServerError,
    Unauthorized,
    Forbidden,

    // Generic errors
    UnknownError,
    InternalError,
}

impl ErrorCode {
    /// True for codes in the validation category.
    pub fn is_validation(self) -> bool {
        matches!(
            self,
            ErrorCode::ValidationError
                | ErrorCode::InvalidDateRange
                | ErrorCode::InvalidTimeFormat
                | ErrorCode::RequiredField
        )
    }

    /// True for codes in the database category.
    pub fn is_database(self) -> bool {
        matches!(
            self,
            ErrorCode::DatabaseError
                | ErrorCode::RecordNotFound
                | ErrorCode::DuplicateRecord
                | ErrorCode::ForeignKeyConstraint
        )
    }

    /// True for codes in the network category.
    pub fn is_network(self) -> bool {
        matches!(self, ErrorCode::NetworkError)
    }

    /// Short user-facing message for well-known codes.
    ///
    /// Returns `None` for codes without a canonical message; callers fall
    /// back to the error's own message text.
    pub fn user_message(self) -> Option<&'static str> {
        match self {
            ErrorCode::RecordNotFound => Some("The requested item could not be found"),
            ErrorCode::DuplicateRecord => Some("This item already exists"),
            ErrorCode::ForeignKeyConstraint => {
                Some("Cannot perform this operation due to related data")
            }
            ErrorCode::NetworkError => Some("Network connection failed. Please try again."),
            ErrorCode::ServerError => Some("Server error occurred. Please try again later."),
            ErrorCode::TripDateConflict => Some("Trip dates overlap with an existing trip"),
            ErrorCode::ActivityOutsideTripRange => {
                Some("Activity date must be within the trip date range")
            }
            ErrorCode::InvalidDateRange => Some("End date must be after start date"),
            ErrorCode::PackingListNotEmpty => {
                Some("Cannot delete a packing list that contains items")
            }
            _ => None,
        }
    }
}

/// Comprehensive error type for all trip planner operations.
#[derive(Error, Debug)]
pub enum TripError {
    /// Aggregate validation failure carrying every violated field
    #[error("Validation failed: {}", format_errors(.errors))]
    Validation { errors: Vec<ValidationError> },
    /// Trip not found for the given ID
    #[error("Trip with ID {id} not found")]
    TripNotFound { id: u64 },
    /// Activity not found for the given ID
    #[error("Activity with ID {id} not found")]
    ActivityNotFound { id: u64 },
    /// Packing list not found for the given ID
    #[error("Packing list with ID {id} not found")]
    PackingListNotFound { id: u64 },
    /// Packing item not found for the given ID
    #[error("Packing item with ID {id} not found")]
    PackingItemNotFound { id: u64 },
    /// Refusing to delete a packing list that still contains items
    #[error("Packing list {id} still contains {count} item(s)")]
    PackingListNotEmpty { id: u64, count: u32 },
    /// Database connection or query errors, classified by constraint sniffing
    #[error("Database error: {message}")]
    Database {
        message: String,
        code: ErrorCode,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl TripError {
    /// Creates an aggregate validation failure from collected field errors.
    pub fn validation(errors: Vec<ValidationError>) -> Self {
        Self::Validation { errors }
    }

    /// Creates a database error, classifying the underlying SQLite error by
    /// pattern-matching its message against known constraint-violation
    /// substrings.
    ///
    /// This is a best-effort string-sniffing translation layer inherited
    /// from the storage engine's reporting: unique, foreign-key, and
    /// not-null violations are remapped to their taxonomy codes; anything
    /// else becomes a generic [`ErrorCode::DatabaseError`]. The raw error is
    /// always preserved as the source.
    pub fn from_sqlite(message: impl Into<String>, source: rusqlite::Error) -> Self {
        let text = source.to_string();
        let code = if text.contains("UNIQUE constraint failed") {
            ErrorCode::DuplicateRecord
        } else if text.contains("FOREIGN KEY constraint failed") {
            ErrorCode::ForeignKeyConstraint
        } else if text.contains("NOT NULL constraint failed") {
            ErrorCode::ValidationError
        } else {
            ErrorCode::DatabaseError
        };

        Self::Database {
            message: message.into(),
            code,
            source,
        }
    }

    /// Classifies this error into the [`ErrorCode`] taxonomy.
    pub fn code(&self) -> ErrorCode {
        match self {
            TripError::Validation { .. } => ErrorCode::ValidationError,
            TripError::TripNotFound { .. }
            | TripError::ActivityNotFound { .. }
            | TripError::PackingListNotFound { .. }
            | TripError::PackingItemNotFound { .. } => ErrorCode::RecordNotFound,
            TripError::PackingListNotEmpty { .. } => ErrorCode::PackingListNotEmpty,
            TripError::Database { code, .. } => *code,
            TripError::FileSystem { .. }
            | TripError::XdgDirectory(_)
            | TripError::Serialization { .. }
            | TripError::Configuration { .. } => ErrorCode::InternalError,
        }
    }

    /// Resolves the short user-facing message for this error.
    ///
    /// Known codes map through the code→message table; unmapped codes fall
    /// back to the error's own display text.
    pub fn user_message(&self) -> String {
        self.code()
            .user_message()
            .map(String::from)
            .unwrap_or_else(|| self.to_string())
    }

    /// Returns the collected field errors for aggregate validation failures.
    pub fn field_errors(&self) -> Option<&[ValidationError]> {
        match self {
            TripError::Validation { errors } => Some(errors),
            _ => None,
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message, classifying constraint failures.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| TripError::from_sqlite(message, e))
    }
}

/// Result type alias for trip planner operations
pub type Result<T> = std::result::Result<T, TripError>;
