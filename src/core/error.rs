//! Typed error handling for the inventory core
//!
//! Every failure path in the core has a defined recovered state; nothing here
//! is fatal. Callers match on the category enums rather than on strings.
//!
//! # Error Categories
//!
//! - [`EntityError`]: a record lookup or insert conflicted with the collection
//! - [`ValidationError`]: a draft broke one or more field rules
//! - [`StorageError`]: the persistence adapter failed to read or write
//! - [`ConfigError`]: configuration could not be parsed or is out of range
//!
//! # Example
//!
//! ```rust,ignore
//! match store.update(record) {
//!     Ok(saved) => println!("saved {}", saved.id),
//!     Err(InventoryError::Entity(EntityError::NotFound { id })) => {
//!         // edit target vanished, go back to the list
//!     }
//!     Err(e) => eprintln!("{} ({})", e, e.error_code()),
//! }
//! ```

use serde::Serialize;
use thiserror::Error;

/// The main error type for the inventory core
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Record-related errors
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Draft validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Persistence adapter errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// The state the application falls back to after an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Errors stay inline on the form; submission remains blocked
    StayOnForm,
    /// The edit target is gone; show the list instead
    RedirectToList,
    /// Storage could not be read; continue with an empty collection
    TreatAsEmpty,
    /// The store is in the error status until the user retries
    ShowErrorWithRetry,
}

impl InventoryError {
    /// Get the error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            InventoryError::Entity(e) => e.error_code(),
            InventoryError::Validation(e) => e.error_code(),
            InventoryError::Storage(e) => e.error_code(),
            InventoryError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Get the recovered state for this error
    pub fn recovery(&self) -> Recovery {
        match self {
            InventoryError::Entity(EntityError::NotFound { .. }) => Recovery::RedirectToList,
            InventoryError::Entity(EntityError::AlreadyExists { .. })
            | InventoryError::Entity(EntityError::IdsExhausted { .. }) => Recovery::StayOnForm,
            InventoryError::Validation(_) => Recovery::StayOnForm,
            InventoryError::Storage(StorageError::ReadFailed { .. }) => Recovery::TreatAsEmpty,
            InventoryError::Storage(_) => Recovery::ShowErrorWithRetry,
            InventoryError::Config(_) => Recovery::ShowErrorWithRetry,
        }
    }

    /// Field violations carried by a validation error, if any
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            InventoryError::Validation(ValidationError::FieldErrors(errors)) => errors,
            _ => &[],
        }
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to records in the collection
#[derive(Debug, Error)]
pub enum EntityError {
    /// No record carries this id
    #[error("product with id '{id}' not found")]
    NotFound { id: String },

    /// A record with this id is already in the collection
    #[error("product with id '{id}' already exists")]
    AlreadyExists { id: String },

    /// The highest stored id has no successor
    #[error("no id follows '{last}'")]
    IdsExhausted { last: String },
}

impl EntityError {
    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
            EntityError::IdsExhausted { .. } => "ENTITY_IDS_EXHAUSTED",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// The rule a field broke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ViolationKind {
    /// Field is empty or not one of the allowed choices
    RequiredField,
    /// Number is absent or outside its allowed range
    InvalidRange,
    /// Date is earlier than today
    InvalidDate,
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub kind: ViolationKind,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }
}

/// Errors related to draft validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// One or more fields broke their rules
    #[error("Validation errors: {}", format_violations(.0))]
    FieldErrors(Vec<FieldViolation>),

    /// Commit was called without a submission in progress
    #[error("no submission is in progress")]
    NotSubmitting,
}

fn format_violations(errors: &[FieldViolation]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::FieldErrors(_) => "VALIDATION_ERROR",
            ValidationError::NotSubmitting => "NOT_SUBMITTING",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to the persistence adapter
#[derive(Debug, Error)]
pub enum StorageError {
    /// The blob could not be read
    #[error("failed to read '{key}': {message}")]
    ReadFailed { key: String, message: String },

    /// The blob could not be written
    #[error("failed to write '{key}': {message}")]
    WriteFailed { key: String, message: String },

    /// The collection could not be encoded or decoded
    #[error("serialization error: {message}")]
    Serialization { message: String },
}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::ReadFailed { .. } => "PERSISTENCE_READ_ERROR",
            StorageError::WriteFailed { .. } => "PERSISTENCE_WRITE_ERROR",
            StorageError::Serialization { .. } => "PERSISTENCE_SERIALIZATION_ERROR",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("failed to parse config: {message}")]
    ParseError { message: String },

    /// Configuration file not found
    #[error("configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Invalid value in configuration
    #[error("invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for InventoryError {
    fn from(err: serde_json::Error) -> Self {
        InventoryError::Storage(StorageError::Serialization {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for InventoryError {
    fn from(err: serde_yaml::Error) -> Self {
        InventoryError::Config(ConfigError::ParseError {
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for InventoryError {
    fn from(err: std::io::Error) -> Self {
        InventoryError::Storage(StorageError::WriteFailed {
            key: String::new(),
            message: err.to_string(),
        })
    }
}

/// A specialized Result type for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_redirects_to_list() {
        let err: InventoryError = EntityError::NotFound { id: "7".into() }.into();
        assert_eq!(err.recovery(), Recovery::RedirectToList);
        assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");
        assert!(err.to_string().contains("'7'"));
    }

    #[test]
    fn test_validation_error_lists_fields() {
        let err = ValidationError::FieldErrors(vec![
            FieldViolation::new("name", ViolationKind::RequiredField, "Name is required"),
            FieldViolation::new(
                "discount",
                ViolationKind::InvalidRange,
                "Discount must be between 0-90%",
            ),
        ]);
        let display = err.to_string();
        assert!(display.contains("name: Name is required"));
        assert!(display.contains("discount"));

        let err: InventoryError = err.into();
        assert_eq!(err.violations().len(), 2);
        assert_eq!(err.recovery(), Recovery::StayOnForm);
    }

    #[test]
    fn test_storage_errors_recovery() {
        let read: InventoryError = StorageError::ReadFailed {
            key: "products".into(),
            message: "boom".into(),
        }
        .into();
        assert_eq!(read.recovery(), Recovery::TreatAsEmpty);
        assert_eq!(read.error_code(), "PERSISTENCE_READ_ERROR");

        let write: InventoryError = StorageError::WriteFailed {
            key: "products".into(),
            message: "disk full".into(),
        }
        .into();
        assert_eq!(write.recovery(), Recovery::ShowErrorWithRetry);
        assert!(write.to_string().contains("disk full"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: InventoryError = json_err.into();
        assert!(matches!(
            err,
            InventoryError::Storage(StorageError::Serialization { .. })
        ));
    }
}
