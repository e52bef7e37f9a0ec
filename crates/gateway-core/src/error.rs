//! Error types for the gateway schema core.
//!
//! Every error raised here is a caller-input problem: it is reported
//! synchronously, carries enough detail to correct the input, and is never
//! retried.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised while validating payloads, deriving content identities, or
/// assembling evaluation records.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatewayError {
    /// A canonical field failed validation.
    #[error("Validation failed for field `{field}`: {constraint}")]
    Validation {
        /// Path of the offending field (e.g. `candidates[0].metadata.finish_reason`).
        field: String,
        /// The constraint that was violated.
        constraint: FieldConstraint,
    },

    /// An inputs mapping could not be canonically serialized.
    #[error("Cannot derive content identity: {message}")]
    IdentityDerivation {
        /// Description of the serialization failure.
        message: String,
    },

    /// A persisted record was requested without a required identifier.
    #[error("Cannot assemble evaluation record: `{field}` was not supplied")]
    AssemblyPrecondition {
        /// The identifier that was missing (`run_id` or `evaluation_id`).
        field: String,
    },
}

impl GatewayError {
    /// Creates a validation error for a field.
    #[must_use]
    pub fn validation(field: impl Into<String>, constraint: FieldConstraint) -> Self {
        Self::Validation {
            field: field.into(),
            constraint,
        }
    }

    /// Creates a missing-field validation error.
    #[must_use]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::validation(field, FieldConstraint::Required)
    }

    /// Creates an identity derivation error.
    #[must_use]
    pub fn identity(message: impl Into<String>) -> Self {
        Self::IdentityDerivation {
            message: message.into(),
        }
    }

    /// Creates an assembly precondition error.
    #[must_use]
    pub fn assembly_precondition(field: impl Into<String>) -> Self {
        Self::AssemblyPrecondition {
            field: field.into(),
        }
    }

    /// Returns the offending field, if this error names one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } | Self::AssemblyPrecondition { field } => Some(field),
            Self::IdentityDerivation { .. } => None,
        }
    }

    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::IdentityDerivation { .. } => "IDENTITY_DERIVATION_ERROR",
            Self::AssemblyPrecondition { .. } => "ASSEMBLY_PRECONDITION",
        }
    }
}

/// The constraint a field violated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldConstraint {
    /// The field is required but was absent.
    Required,
    /// The field held a value of the wrong JSON type.
    Type {
        /// Expected type description.
        expected: String,
        /// JSON type actually found.
        found: String,
    },
    /// The field's value fell outside its allowed range.
    Range {
        /// Human readable bound, e.g. `between 0.0 and 2.0`.
        bound: String,
    },
    /// An enumerated field held a value outside its closed set.
    OneOf {
        /// Allowed values.
        allowed: Vec<String>,
        /// Value actually found.
        found: String,
    },
    /// A string or list field was empty.
    NonEmpty,
}

impl fmt::Display for FieldConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "field is required"),
            Self::Type { expected, found } => write!(f, "expected {expected}, found {found}"),
            Self::Range { bound } => write!(f, "value must be {bound}"),
            Self::OneOf { allowed, found } => {
                write!(f, "`{found}` is not one of [{}]", allowed.join(", "))
            }
            Self::NonEmpty => write!(f, "value must not be empty"),
        }
    }
}

/// Result type for schema operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
