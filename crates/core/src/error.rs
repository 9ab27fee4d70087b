//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// lifecycle rules, referential constraints). Infrastructure concerns belong
/// elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (malformed input, unique-constraint hit).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A status change was attempted out of the allowed order, or a
    /// prerequisite actor/timestamp for the target state is missing.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// The caller lacks a required capability.
    #[error("permission denied: missing '{0}'")]
    PermissionDenied(String),

    /// A referenced entity id does not exist.
    #[error("not found")]
    NotFound,

    /// A deletion was attempted on a row still referenced by another.
    #[error("referential protection: {0}")]
    ReferentialProtection(String),

    /// A conflict occurred (e.g. racing writers, repeated one-shot action).
    #[error("conflict: {0}")]
    Conflict(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition(msg.into())
    }

    pub fn permission_denied(permission: impl Into<String>) -> Self {
        Self::PermissionDenied(permission.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn protected(msg: impl Into<String>) -> Self {
        Self::ReferentialProtection(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
