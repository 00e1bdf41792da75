//! Ordering context errors.

use std::fmt;

use crate::domain::shared::DomainError;

/// Errors that can occur while creating, modifying, or reviewing orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Bad input, rejected before any write. When several failures apply the
    /// message aggregates all of them.
    Validation {
        /// Human-readable message.
        message: String,
    },

    /// The acting user is not allowed to perform the operation.
    Forbidden {
        /// Reason for the refusal.
        reason: String,
    },

    /// A referenced entity does not resolve.
    NotFound {
        /// Entity type (e.g. "order", "product").
        entity: String,
        /// Entity identifier.
        id: String,
    },

    /// Another order already carries this number.
    DuplicateNumber {
        /// The conflicting number.
        number: String,
    },

    /// The unique-number retry budget is exhausted.
    NumberExhausted {
        /// How many inserts were attempted.
        attempts: u32,
    },

    /// A collaborator lookup failed; surfaced as a validation-style error.
    Upstream {
        /// Human-readable message.
        message: String,
    },
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { message } => write!(f, "{message}"),
            Self::Forbidden { reason } => write!(f, "Operation not allowed: {reason}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::DuplicateNumber { number } => {
                write!(f, "Order number already in use: {number}")
            }
            Self::NumberExhausted { attempts } => {
                write!(
                    f,
                    "Could not assign a unique order number after {attempts} attempts, please retry"
                )
            }
            Self::Upstream { message } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for OrderError {}

impl From<DomainError> for OrderError {
    fn from(err: DomainError) -> Self {
        Self::Validation {
            message: err.to_string(),
        }
    }
}
