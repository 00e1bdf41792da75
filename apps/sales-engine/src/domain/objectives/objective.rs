//! Sales objective entity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::objectives::errors::ObjectiveError;
use crate::domain::shared::{DateWindow, Money, ObjectiveId, Timestamp, UserId};

/// A sales target assigned to one rep, or globally to the whole fleet.
///
/// Realized amounts and attainment are always derived from order data at
/// query time; they are never persisted on the objective itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesObjective {
    id: ObjectiveId,
    sales_rep: Option<UserId>,
    target_amount: Money,
    bonus: Money,
    mission: String,
    window: DateWindow,
    active: bool,
    category: Option<String>,
    target_percentage: Option<Decimal>,
}

impl SalesObjective {
    /// Create an objective for one sales rep.
    ///
    /// An empty mission defaults to a description of the target.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the window is inverted or the target
    /// is not positive.
    pub fn individual(
        sales_rep: UserId,
        target_amount: Money,
        bonus: Money,
        mission: Option<String>,
        window: DateWindow,
    ) -> Result<Self, ObjectiveError> {
        Self::build(Some(sales_rep), target_amount, bonus, mission, window)
    }

    /// Create a fleet-wide objective with no specific rep.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the window is inverted or the target
    /// is not positive.
    pub fn global(
        target_amount: Money,
        bonus: Money,
        mission: Option<String>,
        window: DateWindow,
    ) -> Result<Self, ObjectiveError> {
        Self::build(None, target_amount, bonus, mission, window)
    }

    fn build(
        sales_rep: Option<UserId>,
        target_amount: Money,
        bonus: Money,
        mission: Option<String>,
        window: DateWindow,
    ) -> Result<Self, ObjectiveError> {
        if window.ends_at < window.starts_at {
            return Err(ObjectiveError::Validation {
                message: "objective window ends before it starts".to_string(),
            });
        }
        if !target_amount.is_positive() {
            return Err(ObjectiveError::Validation {
                message: "target amount must be positive".to_string(),
            });
        }

        let mission = mission
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Sell for {target_amount}"));

        Ok(Self {
            id: ObjectiveId::generate(),
            sales_rep,
            target_amount,
            bonus,
            mission,
            window,
            active: true,
            category: None,
            target_percentage: None,
        })
    }

    /// Turn this objective into a category goal: attainment is measured as
    /// the share of the rep's quantity sold in the category, against a
    /// percentage target.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the percentage is outside `[0, 100]`.
    pub fn set_category_target(
        &mut self,
        category: impl Into<String>,
        percentage: Decimal,
    ) -> Result<(), ObjectiveError> {
        if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
            return Err(ObjectiveError::Validation {
                message: format!("percentage target must be between 0 and 100, got {percentage}"),
            });
        }
        self.category = Some(category.into());
        self.target_percentage = Some(percentage);
        Ok(())
    }

    /// Get the objective id.
    #[must_use]
    pub const fn id(&self) -> &ObjectiveId {
        &self.id
    }

    /// Get the assigned rep; `None` for fleet-wide objectives.
    #[must_use]
    pub const fn sales_rep(&self) -> Option<&UserId> {
        self.sales_rep.as_ref()
    }

    /// Whether this objective targets the whole fleet.
    #[must_use]
    pub const fn is_global(&self) -> bool {
        self.sales_rep.is_none()
    }

    /// Get the target amount.
    #[must_use]
    pub const fn target_amount(&self) -> Money {
        self.target_amount
    }

    /// Get the bonus paid on attainment.
    #[must_use]
    pub const fn bonus(&self) -> Money {
        self.bonus
    }

    /// Get the mission description.
    #[must_use]
    pub fn mission(&self) -> &str {
        &self.mission
    }

    /// Get the date window.
    #[must_use]
    pub const fn window(&self) -> DateWindow {
        self.window
    }

    /// Whether the objective is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Get the category for category goals.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Get the percentage target for category goals.
    #[must_use]
    pub const fn target_percentage(&self) -> Option<Decimal> {
        self.target_percentage
    }

    /// Whether the window has already ended.
    #[must_use]
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.window.is_expired(now)
    }

    /// Flip the active flag.
    pub fn toggle_active(&mut self) {
        self.active = !self.active;
    }

    /// Revise target, bonus, mission, or window; `None` keeps a field as-is.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the revised window is inverted or the
    /// revised target is not positive.
    pub fn revise(
        &mut self,
        target_amount: Option<Money>,
        bonus: Option<Money>,
        mission: Option<String>,
        window: Option<DateWindow>,
    ) -> Result<(), ObjectiveError> {
        let target = target_amount.unwrap_or(self.target_amount);
        let window = window.unwrap_or(self.window);

        if window.ends_at < window.starts_at {
            return Err(ObjectiveError::Validation {
                message: "objective window ends before it starts".to_string(),
            });
        }
        if !target.is_positive() {
            return Err(ObjectiveError::Validation {
                message: "target amount must be positive".to_string(),
            });
        }

        self.target_amount = target;
        self.window = window;
        if let Some(bonus) = bonus {
            self.bonus = bonus;
        }
        if let Some(mission) = mission.filter(|m| !m.trim().is_empty()) {
            self.mission = mission;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn window() -> DateWindow {
        DateWindow::new(
            Timestamp::parse("2025-01-01T00:00:00Z").unwrap(),
            Timestamp::parse("2025-03-31T23:59:59Z").unwrap(),
        )
    }

    #[test]
    fn individual_objective_defaults() {
        let obj = SalesObjective::individual(
            UserId::new("rep-1"),
            Money::new(dec!(5000)),
            Money::new(dec!(250)),
            None,
            window(),
        )
        .unwrap();

        assert!(!obj.is_global());
        assert!(obj.is_active());
        assert_eq!(obj.mission(), "Sell for 5000.00");
        assert!(obj.category().is_none());
    }

    #[test]
    fn explicit_mission_is_kept() {
        let obj = SalesObjective::individual(
            UserId::new("rep-1"),
            Money::new(dec!(5000)),
            Money::ZERO,
            Some("Q1 push".to_string()),
            window(),
        )
        .unwrap();

        assert_eq!(obj.mission(), "Q1 push");
    }

    #[test]
    fn blank_mission_falls_back() {
        let obj = SalesObjective::global(
            Money::new(dec!(20000)),
            Money::ZERO,
            Some("   ".to_string()),
            window(),
        )
        .unwrap();

        assert_eq!(obj.mission(), "Sell for 20000.00");
    }

    #[test]
    fn global_objective_has_no_rep() {
        let obj =
            SalesObjective::global(Money::new(dec!(20000)), Money::ZERO, None, window()).unwrap();
        assert!(obj.is_global());
        assert!(obj.sales_rep().is_none());
    }

    #[test]
    fn inverted_window_is_rejected() {
        let result = SalesObjective::global(
            Money::new(dec!(100)),
            Money::ZERO,
            None,
            DateWindow::new(
                Timestamp::parse("2025-03-31T00:00:00Z").unwrap(),
                Timestamp::parse("2025-01-01T00:00:00Z").unwrap(),
            ),
        );
        assert!(matches!(result, Err(ObjectiveError::Validation { .. })));
    }

    #[test]
    fn non_positive_target_is_rejected() {
        let result = SalesObjective::global(Money::ZERO, Money::ZERO, None, window());
        assert!(result.is_err());
    }

    #[test]
    fn category_target_bounds() {
        let mut obj = SalesObjective::individual(
            UserId::new("rep-1"),
            Money::new(dec!(5000)),
            Money::ZERO,
            None,
            window(),
        )
        .unwrap();

        assert!(obj.set_category_target("dairy", dec!(101)).is_err());
        obj.set_category_target("dairy", dec!(40)).unwrap();
        assert_eq!(obj.category(), Some("dairy"));
        assert_eq!(obj.target_percentage(), Some(dec!(40)));
    }

    #[test]
    fn toggle_active() {
        let mut obj =
            SalesObjective::global(Money::new(dec!(100)), Money::ZERO, None, window()).unwrap();
        obj.toggle_active();
        assert!(!obj.is_active());
        obj.toggle_active();
        assert!(obj.is_active());
    }

    #[test]
    fn revise_updates_named_fields_only() {
        let mut obj = SalesObjective::individual(
            UserId::new("rep-1"),
            Money::new(dec!(5000)),
            Money::new(dec!(100)),
            Some("Q1 push".to_string()),
            window(),
        )
        .unwrap();

        obj.revise(Some(Money::new(dec!(6000))), None, None, None).unwrap();
        assert_eq!(obj.target_amount(), Money::new(dec!(6000)));
        assert_eq!(obj.bonus(), Money::new(dec!(100)));
        assert_eq!(obj.mission(), "Q1 push");

        // A non-positive revised target is rejected and nothing changes.
        assert!(obj.revise(Some(Money::ZERO), None, None, None).is_err());
        assert_eq!(obj.target_amount(), Money::new(dec!(6000)));

        let inverted = DateWindow::new(
            Timestamp::parse("2025-03-31T00:00:00Z").unwrap(),
            Timestamp::parse("2025-01-01T00:00:00Z").unwrap(),
        );
        assert!(obj.revise(None, None, None, Some(inverted)).is_err());
        assert_eq!(obj.window(), window());
    }

    #[test]
    fn expiry_follows_window() {
        let obj =
            SalesObjective::global(Money::new(dec!(100)), Money::ZERO, None, window()).unwrap();
        assert!(!obj.is_expired(Timestamp::parse("2025-02-01T00:00:00Z").unwrap()));
        assert!(obj.is_expired(Timestamp::parse("2025-04-01T00:00:00Z").unwrap()));
    }
}
