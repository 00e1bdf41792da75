//! Objectives context errors.

use std::fmt;

/// Errors that can occur while managing or evaluating sales objectives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectiveError {
    /// Bad input, rejected before any write.
    Validation {
        /// Human-readable message.
        message: String,
    },

    /// A referenced entity does not resolve.
    NotFound {
        /// Entity type (e.g. "objective", "user").
        entity: String,
        /// Entity identifier.
        id: String,
    },

    /// A collaborator lookup failed; surfaced as a validation-style error.
    Upstream {
        /// Human-readable message.
        message: String,
    },
}

impl fmt::Display for ObjectiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { message } => write!(f, "{message}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Upstream { message } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ObjectiveError {}
