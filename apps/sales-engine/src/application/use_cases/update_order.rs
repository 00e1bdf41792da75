//! Update Order Use Case
//!
//! Admin-driven quantity changes with recomputation and an audit trail.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::dto::{OrderDto, UpdateOrderRequest};
use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::history::HistoryEntry;
use crate::domain::ordering::repository::OrderRepository;
use crate::domain::ordering::services::pricing;
use crate::domain::shared::{LineId, OrderId, Quantity, UserId};

/// Use case applying post-creation line edits to an order.
///
/// All requested quantities are validated before any write; one bad quantity
/// rejects the whole request. Line ids that no longer exist on the order are
/// skipped silently, tolerating stale client state. A request that changes
/// nothing returns the order untouched: no audit entries, no recompute.
pub struct UpdateOrderUseCase<O>
where
    O: OrderRepository,
{
    orders: Arc<O>,
}

impl<O> UpdateOrderUseCase<O>
where
    O: OrderRepository,
{
    /// Create a new use case.
    pub const fn new(orders: Arc<O>) -> Self {
        Self { orders }
    }

    /// Execute the use case.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] if the order does not exist and
    /// [`OrderError::Validation`] if any requested quantity is not strictly
    /// positive (aggregating every such failure into one message).
    pub async fn execute(
        &self,
        order_id: &str,
        request: UpdateOrderRequest,
    ) -> Result<OrderDto, OrderError> {
        let order_id = OrderId::new(order_id);
        let mut order =
            self.orders
                .find_by_id(&order_id)
                .await?
                .ok_or_else(|| OrderError::NotFound {
                    entity: "order".to_string(),
                    id: order_id.to_string(),
                })?;

        let modified_by = UserId::new(request.modified_by.as_str());

        let mut failures = Vec::new();
        let mut requested = Vec::with_capacity(request.lines.len());
        for update in &request.lines {
            match Quantity::try_new(update.quantity) {
                Ok(quantity) => requested.push((LineId::new(update.line.as_str()), quantity)),
                Err(err) => failures.push(format!("line {}: {err}", update.line)),
            }
        }
        if !failures.is_empty() {
            return Err(OrderError::Validation {
                message: failures.join("; "),
            });
        }

        let mut changed = false;
        for (line_id, quantity) in requested {
            let Some(line) = order.line(&line_id) else {
                debug!(order = %order_id, line = %line_id, "requested line not on order, skipping");
                continue;
            };
            if line.quantity() == quantity {
                continue;
            }

            let old = line.quantity();
            let mut updated = line.clone();
            updated.set_quantity(quantity);
            self.orders.update_line(&order_id, &updated).await?;
            self.orders
                .append_history(&HistoryEntry::quantity_change(
                    order_id.clone(),
                    updated.product_name(),
                    old,
                    quantity,
                    modified_by.clone(),
                ))
                .await?;
            changed = true;
        }

        if !changed {
            return Ok(OrderDto::from_order(&order));
        }

        // Aggregates are recomputed from lines read back from the store,
        // strictly after every line write has landed.
        let lines = self.orders.find_lines(&order_id).await?;
        let totals = pricing::order_totals(&lines);
        order.apply_recompute(lines, totals);
        self.orders.update(&order).await?;

        info!(
            order = %order_id,
            by = %modified_by,
            gross = %order.totals().gross,
            "order recomputed after admin change"
        );
        Ok(OrderDto::from_order(&order))
    }
}
