//! Objective DTOs for API boundaries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::objectives::SalesObjective;
use crate::domain::shared::Timestamp;

/// Request to create an objective (individual or global).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateObjectiveRequest {
    /// Assigned rep; required for individual objectives, absent for global.
    #[serde(default)]
    pub sales_rep: Option<String>,
    /// Target amount.
    pub target_amount: Decimal,
    /// Bonus paid on attainment.
    #[serde(default)]
    pub bonus: Decimal,
    /// Mission description; defaults to a description of the target.
    #[serde(default)]
    pub mission: Option<String>,
    /// Window start.
    pub starts_at: Timestamp,
    /// Window end.
    pub ends_at: Timestamp,
    /// Product category for category goals.
    #[serde(default)]
    pub category: Option<String>,
    /// Percentage target for category goals.
    #[serde(default)]
    pub target_percentage: Option<Decimal>,
}

/// Request to revise an objective; absent fields are kept as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateObjectiveRequest {
    /// New target amount.
    #[serde(default)]
    pub target_amount: Option<Decimal>,
    /// New bonus.
    #[serde(default)]
    pub bonus: Option<Decimal>,
    /// New mission description.
    #[serde(default)]
    pub mission: Option<String>,
    /// New window start.
    #[serde(default)]
    pub starts_at: Option<Timestamp>,
    /// New window end.
    #[serde(default)]
    pub ends_at: Option<Timestamp>,
}

/// Objective representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveDto {
    /// Objective id.
    pub id: String,
    /// Assigned rep, if individual.
    pub sales_rep: Option<String>,
    /// Target amount.
    pub target_amount: Decimal,
    /// Bonus.
    pub bonus: Decimal,
    /// Mission description.
    pub mission: String,
    /// Window start.
    pub starts_at: Timestamp,
    /// Window end.
    pub ends_at: Timestamp,
    /// Active flag.
    pub active: bool,
    /// Category for category goals.
    pub category: Option<String>,
    /// Percentage target for category goals.
    pub target_percentage: Option<Decimal>,
}

impl ObjectiveDto {
    /// Build from a domain objective.
    #[must_use]
    pub fn from_objective(objective: &SalesObjective) -> Self {
        Self {
            id: objective.id().to_string(),
            sales_rep: objective.sales_rep().map(ToString::to_string),
            target_amount: objective.target_amount().amount(),
            bonus: objective.bonus().amount(),
            mission: objective.mission().to_string(),
            starts_at: objective.window().starts_at,
            ends_at: objective.window().ends_at,
            active: objective.is_active(),
            category: objective.category().map(str::to_string),
            target_percentage: objective.target_percentage(),
        }
    }
}

/// Progress on one of a rep's own objectives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepProgressDto {
    /// Objective id.
    pub objective: String,
    /// Mission description.
    pub mission: String,
    /// Window start.
    pub starts_at: Timestamp,
    /// Window end.
    pub ends_at: Timestamp,
    /// Bonus paid on attainment.
    pub bonus: Decimal,
    /// Target amount.
    pub target: Decimal,
    /// Realized amount over the window.
    pub realized: Decimal,
    /// Whether the target is met.
    pub attained: bool,
}

/// One rep's standing against a fleet-wide objective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetProgressDto {
    /// Rep id.
    pub rep: String,
    /// Rep display name.
    pub rep_name: String,
    /// Objective id.
    pub objective: String,
    /// Mission description.
    pub mission: String,
    /// Target amount.
    pub target: Decimal,
    /// The rep's all-time order total.
    pub realized: Decimal,
    /// Bonus paid on attainment.
    pub bonus: Decimal,
    /// Whether the target is met.
    pub attained: bool,
}

/// Progress on a category goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProgressDto {
    /// Objective id.
    pub objective: String,
    /// Rep id.
    pub rep: String,
    /// Category being measured.
    pub category: String,
    /// Percentage target, if set.
    pub target_percent: Option<Decimal>,
    /// Share of the rep's quantity sold in the category, in `[0, 100]`.
    pub realized_percent: Decimal,
    /// Whether the percentage target is met.
    pub attained: bool,
}

/// A year of objectives, for the grouped listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectivesByYearDto {
    /// Calendar year of the window start.
    pub year: i32,
    /// Objectives starting that year.
    pub objectives: Vec<ObjectiveDto>,
}
