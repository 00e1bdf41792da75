//! Application ports: interfaces to external collaborators.
//!
//! The catalog, promotion, user, and client services live outside this
//! engine; use cases consume them through these read-only ports. Port
//! failures are translated into validation-style errors at the boundary
//! rather than leaked as raw transport failures.

mod catalog;
mod directory;

use thiserror::Error;

use crate::domain::objectives::ObjectiveError;
use crate::domain::ordering::OrderError;

pub use catalog::{CatalogPort, Product, Promotion};
pub use directory::{Client, DirectoryPort, User, UserRole};

/// Error from a collaborator lookup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PortError {
    /// The collaborator could not serve the lookup.
    #[error("reference data lookup failed: {0}")]
    Lookup(String),
}

impl From<PortError> for OrderError {
    fn from(err: PortError) -> Self {
        Self::Upstream {
            message: err.to_string(),
        }
    }
}

impl From<PortError> for ObjectiveError {
    fn from(err: PortError) -> Self {
        Self::Upstream {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_error_translates_to_order_validation_style() {
        let err: OrderError = PortError::Lookup("geocoding timed out".to_string()).into();
        assert!(matches!(err, OrderError::Upstream { .. }));
        assert!(err.to_string().contains("geocoding timed out"));
    }

    #[test]
    fn port_error_translates_to_objective_error() {
        let err: ObjectiveError = PortError::Lookup("directory unavailable".to_string()).into();
        assert!(matches!(err, ObjectiveError::Upstream { .. }));
    }
}
