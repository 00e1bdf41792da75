//! Objective Progress Use Case
//!
//! Derives realized amounts and attainment from order data at query time.
//! Nothing computed here is ever written back to the objectives.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::application::dto::{CategoryProgressDto, FleetProgressDto, RepProgressDto};
use crate::application::ports::{CatalogPort, DirectoryPort};
use crate::domain::objectives::{ObjectiveError, ObjectiveRepository};
use crate::domain::ordering::aggregate::Order;
use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::repository::{DateCriterion, OrderRepository};
use crate::domain::shared::{Money, Timestamp, UserId};

/// Use case evaluating sales objectives against order data.
pub struct ObjectiveProgressUseCase<B, O, C, D>
where
    B: ObjectiveRepository,
    O: OrderRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    objectives: Arc<B>,
    orders: Arc<O>,
    catalog: Arc<C>,
    directory: Arc<D>,
}

/// Order-store failures surface as evaluator upstream errors.
fn store_err(err: OrderError) -> ObjectiveError {
    ObjectiveError::Upstream {
        message: err.to_string(),
    }
}

impl<B, O, C, D> ObjectiveProgressUseCase<B, O, C, D>
where
    B: ObjectiveRepository,
    O: OrderRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    /// Create a new use case.
    pub const fn new(objectives: Arc<B>, orders: Arc<O>, catalog: Arc<C>, directory: Arc<D>) -> Self {
        Self {
            objectives,
            orders,
            catalog,
            directory,
        }
    }

    /// Progress on a rep's own active, unexpired objectives.
    ///
    /// Realized amounts sum the gross totals of the rep's validated orders
    /// whose validation date falls in the objective window. When that query
    /// matches nothing, a second pass matches on creation date instead,
    /// tolerating orders validated without a recorded validation timestamp.
    /// The two passes are never summed together.
    ///
    /// # Errors
    ///
    /// Returns error if a store or collaborator query fails.
    pub async fn rep_progress(&self, rep: &str) -> Result<Vec<RepProgressDto>, ObjectiveError> {
        let rep = UserId::new(rep);
        let active = self
            .objectives
            .list_active_for_rep(&rep, Timestamp::now())
            .await?;

        let mut result = Vec::with_capacity(active.len());
        for objective in active {
            let window = objective.window();
            let mut matched = self
                .orders
                .find_validated_in_window(&rep, &window, DateCriterion::ValidationDate)
                .await
                .map_err(store_err)?;
            if matched.is_empty() {
                debug!(
                    objective = %objective.id(),
                    "no orders matched on validation date, degrading to creation date"
                );
                matched = self
                    .orders
                    .find_validated_in_window(&rep, &window, DateCriterion::CreationDate)
                    .await
                    .map_err(store_err)?;
            }

            let realized: Money = matched.iter().map(|o| o.totals().gross).sum();
            result.push(RepProgressDto {
                objective: objective.id().to_string(),
                mission: objective.mission().to_string(),
                starts_at: window.starts_at,
                ends_at: window.ends_at,
                bonus: objective.bonus().amount(),
                target: objective.target_amount().amount(),
                realized: realized.amount(),
                attained: realized >= objective.target_amount(),
            });
        }
        Ok(result)
    }

    /// Every active rep's standing against every active fleet-wide objective.
    ///
    /// Fleet objectives are measured against each rep's all-time order total,
    /// independently per rep.
    ///
    /// # Errors
    ///
    /// Returns error if a store or collaborator query fails.
    pub async fn fleet_progress(&self) -> Result<Vec<FleetProgressDto>, ObjectiveError> {
        let globals = self.objectives.list_active_global().await?;
        if globals.is_empty() {
            return Ok(Vec::new());
        }

        let reps = self.directory.list_active_sales_reps().await?;
        let mut result = Vec::with_capacity(globals.len() * reps.len());
        for rep in reps {
            let orders = self.orders.list_by_rep(&rep.id).await.map_err(store_err)?;
            let total: Money = orders.iter().map(|o| o.totals().gross).sum();

            for objective in &globals {
                result.push(FleetProgressDto {
                    rep: rep.id.to_string(),
                    rep_name: format!("{} {}", rep.first_name, rep.last_name),
                    objective: objective.id().to_string(),
                    mission: objective.mission().to_string(),
                    target: objective.target_amount().amount(),
                    realized: total.amount(),
                    bonus: objective.bonus().amount(),
                    attained: total >= objective.target_amount(),
                });
            }
        }
        Ok(result)
    }

    /// Progress on every category goal assigned to a rep.
    ///
    /// The realized figure is the share of the rep's quantity sold falling in
    /// the goal's category, as a percentage of their total quantity sold. A
    /// rep with nothing sold scores 0%, never an error.
    ///
    /// # Errors
    ///
    /// Returns error if a store or collaborator query fails.
    pub async fn category_progress(&self) -> Result<Vec<CategoryProgressDto>, ObjectiveError> {
        let objectives = self.objectives.list_all().await?;
        let mut categories: HashMap<String, Option<String>> = HashMap::new();

        let mut result = Vec::new();
        for objective in objectives {
            let (Some(rep), Some(category)) = (objective.sales_rep(), objective.category()) else {
                continue;
            };

            let orders = self.orders.list_by_rep(rep).await.map_err(store_err)?;
            let (category_qty, total_qty) = self
                .quantities_in_category(&orders, category, &mut categories)
                .await?;

            let realized = if total_qty.is_zero() {
                Decimal::ZERO
            } else {
                (category_qty / total_qty * Decimal::ONE_HUNDRED).round_dp(1)
            };

            result.push(CategoryProgressDto {
                objective: objective.id().to_string(),
                rep: rep.to_string(),
                category: category.to_string(),
                target_percent: objective.target_percentage(),
                realized_percent: realized,
                attained: objective
                    .target_percentage()
                    .is_some_and(|target| realized >= target),
            });
        }
        Ok(result)
    }

    /// Sum line quantities in the given category and overall, resolving each
    /// product's category through the catalog at most once.
    async fn quantities_in_category(
        &self,
        orders: &[Order],
        category: &str,
        cache: &mut HashMap<String, Option<String>>,
    ) -> Result<(Decimal, Decimal), ObjectiveError> {
        let mut category_qty = Decimal::ZERO;
        let mut total_qty = Decimal::ZERO;

        for order in orders {
            for line in order.lines() {
                let quantity = line.quantity().as_decimal();
                total_qty += quantity;

                let key = line.product().to_string();
                let product_category = match cache.get(&key) {
                    Some(cached) => cached.clone(),
                    None => {
                        let found = self
                            .catalog
                            .find_product(line.product())
                            .await?
                            .and_then(|p| p.category);
                        cache.insert(key, found.clone());
                        found
                    }
                };
                if product_category.as_deref() == Some(category) {
                    category_qty += quantity;
                }
            }
        }
        Ok((category_qty, total_qty))
    }
}
