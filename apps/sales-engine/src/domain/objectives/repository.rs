//! Objective Repository Trait

use async_trait::async_trait;

use super::errors::ObjectiveError;
use super::objective::SalesObjective;
use crate::domain::shared::{ObjectiveId, Timestamp, UserId};

/// Repository trait for sales objective persistence.
#[async_trait]
pub trait ObjectiveRepository: Send + Sync {
    /// Insert a new objective.
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails.
    async fn insert(&self, objective: &SalesObjective) -> Result<(), ObjectiveError>;

    /// Persist changes to an existing objective.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectiveError::NotFound`] if the objective does not exist.
    async fn update(&self, objective: &SalesObjective) -> Result<(), ObjectiveError>;

    /// Find an objective by id.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_id(&self, id: &ObjectiveId) -> Result<Option<SalesObjective>, ObjectiveError>;

    /// All objectives.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn list_all(&self) -> Result<Vec<SalesObjective>, ObjectiveError>;

    /// All objectives assigned to a rep.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn list_for_rep(&self, rep: &UserId) -> Result<Vec<SalesObjective>, ObjectiveError>;

    /// A rep's active objectives whose window has not ended at `now`.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn list_active_for_rep(
        &self,
        rep: &UserId,
        now: Timestamp,
    ) -> Result<Vec<SalesObjective>, ObjectiveError>;

    /// Active fleet-wide objectives (no assigned rep).
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn list_active_global(&self) -> Result<Vec<SalesObjective>, ObjectiveError>;

    /// Delete an objective.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectiveError::NotFound`] if the objective does not exist.
    async fn delete(&self, id: &ObjectiveId) -> Result<(), ObjectiveError>;
}
