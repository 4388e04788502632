//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::MemberId;

/// Domain errors represent business logic violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("root member not found in graph: {0}")]
    RootNotFound(MemberId),

    #[error("invalid date for member {member}: {value}")]
    InvalidDate { member: String, value: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
