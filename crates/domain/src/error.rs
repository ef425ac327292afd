//! Unified error types for the domain layer
//!
//! Provides a common error type usable across all domain operations, so
//! adapters are not forced into String or anyhow errors.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Business rule violation
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// A tuning table is malformed. Never user-actionable; indicates a
    /// corrupted configuration and must be surfaced loudly.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
}

impl DomainError {
    /// Creates a validation error for out-of-range or malformed values.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Creates a configuration error for broken tuning tables.
    ///
    /// Use this when a lookup that must succeed in valid configuration
    /// fails: a missing reward entry, a non-increasing cost schedule, a
    /// negative weight. Callers treat it as fatal for the request.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("rod level out of range");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: rod level out of range");
    }

    #[test]
    fn test_configuration_error_display() {
        let err = DomainError::configuration("no reward for tier epic");
        assert_eq!(err.to_string(), "Configuration error: no reward for tier epic");
    }

    #[test]
    fn test_not_found_error() {
        let err = DomainError::not_found("Player", "123e4567");
        assert!(err.to_string().contains("Player"));
        assert!(err.to_string().contains("123e4567"));
    }
}
