//! Directory port: user and client lookups.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::PortError;
use crate::domain::shared::{ClientId, UserId};

/// Back-office user role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Sales representative; owns clients and orders.
    SalesRep,
    /// Administrator; reviews and modifies orders.
    Admin,
}

/// User read model as served by the directory collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: UserId,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Role.
    pub role: UserRole,
    /// Whether the account is active.
    pub active: bool,
}

impl User {
    /// Whether this user may create orders.
    #[must_use]
    pub const fn is_sales_rep(&self) -> bool {
        matches!(self.role, UserRole::SalesRep)
    }
}

/// Client read model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Client identifier.
    pub id: ClientId,
    /// Company or last name.
    pub name: String,
    /// Contact first name, if an individual.
    pub first_name: Option<String>,
    /// Fiscal registration code, for printable summaries.
    pub fiscal_code: Option<String>,
}

/// Read-only access to users and clients.
#[async_trait]
pub trait DirectoryPort: Send + Sync {
    /// Look up a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`PortError`] if the collaborator fails.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, PortError>;

    /// Look up a client by id.
    ///
    /// # Errors
    ///
    /// Returns [`PortError`] if the collaborator fails.
    async fn find_client(&self, id: &ClientId) -> Result<Option<Client>, PortError>;

    /// All active sales reps, for fleet-wide objective evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`PortError`] if the collaborator fails.
    async fn list_active_sales_reps(&self) -> Result<Vec<User>, PortError>;
}
