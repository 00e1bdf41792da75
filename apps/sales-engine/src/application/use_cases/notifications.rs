//! Notifications Use Case
//!
//! Rep-facing view over the audit trail: every unseen history entry on a
//! rep's orders is one pending notification. Marking entries seen is always
//! rep-initiated, one by one or in bulk.

use std::sync::Arc;

use tracing::info;

use crate::application::dto::{HistoryEntryDto, ModifiedOrderDto, OrderDto};
use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::repository::OrderRepository;
use crate::domain::shared::{EntryId, OrderId, UserId};

/// Use case for the audit-trail notification surface.
pub struct NotificationsUseCase<O>
where
    O: OrderRepository,
{
    orders: Arc<O>,
}

impl<O> NotificationsUseCase<O>
where
    O: OrderRepository,
{
    /// Create a new use case.
    pub const fn new(orders: Arc<O>) -> Self {
        Self { orders }
    }

    /// Count the unseen entries across a rep's orders.
    ///
    /// # Errors
    ///
    /// Returns error if the store query fails.
    pub async fn unseen_count(&self, rep: &str) -> Result<u64, OrderError> {
        self.orders.count_unseen_for_rep(&UserId::new(rep)).await
    }

    /// Mark one entry as seen.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] if the entry does not exist.
    pub async fn mark_seen(&self, entry: &str) -> Result<(), OrderError> {
        self.orders.mark_entry_seen(&EntryId::new(entry)).await
    }

    /// Mark every unseen entry of a rep's orders as seen, returning how many
    /// entries were flipped.
    ///
    /// # Errors
    ///
    /// Returns error if the store query fails.
    pub async fn mark_all_seen(&self, rep: &str) -> Result<u64, OrderError> {
        let flipped = self.orders.mark_all_seen_for_rep(&UserId::new(rep)).await?;
        info!(rep, flipped, "notifications marked seen");
        Ok(flipped)
    }

    /// The change history of one order, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] if the order does not exist.
    pub async fn order_history(&self, order_id: &str) -> Result<Vec<HistoryEntryDto>, OrderError> {
        let order_id = OrderId::new(order_id);
        if self.orders.find_by_id(&order_id).await?.is_none() {
            return Err(OrderError::NotFound {
                entity: "order".to_string(),
                id: order_id.to_string(),
            });
        }
        let entries = self.orders.find_history_by_order(&order_id).await?;
        Ok(entries.iter().map(HistoryEntryDto::from_entry).collect())
    }

    /// A rep's admin-modified orders, each with its unseen entry count.
    ///
    /// # Errors
    ///
    /// Returns error if the store query fails.
    pub async fn modified_orders(&self, rep: &str) -> Result<Vec<ModifiedOrderDto>, OrderError> {
        let rep = UserId::new(rep);
        let orders = self.orders.list_by_rep(&rep).await?;

        let mut result = Vec::new();
        for order in orders.into_iter().filter(|o| o.admin_modified()) {
            let unseen = self.orders.count_unseen_for_order(order.id()).await?;
            result.push(ModifiedOrderDto {
                order: OrderDto::from_order(&order),
                unseen_entries: unseen,
            });
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::{LineQuantityUpdate, UpdateOrderRequest};
    use crate::application::use_cases::UpdateOrderUseCase;
    use crate::domain::ordering::aggregate::{Order, OrderLine};
    use crate::domain::ordering::value_objects::OrderNumber;
    use crate::domain::shared::{ClientId, Money, ProductId, Quantity, VatRate};
    use crate::infrastructure::persistence::InMemoryOrderRepository;
    use rust_decimal_macros::dec;

    async fn seeded_order(repo: &InMemoryOrderRepository, rep: &str, seq: u64) -> Order {
        let line = OrderLine::create(
            ProductId::new("prod-a"),
            "Olive oil 1L".to_string(),
            Money::new(dec!(10.00)),
            Money::new(dec!(12.00)),
            VatRate::new(dec!(20)),
            Quantity::try_new(2).unwrap(),
        );
        let order = Order::create(
            OrderNumber::from_sequence(2025, seq),
            UserId::new(rep),
            ClientId::new("cli-1"),
            None,
            vec![line],
        )
        .unwrap();
        repo.insert(&order).await.unwrap();
        order
    }

    async fn bump_quantity(repo: &Arc<InMemoryOrderRepository>, order: &Order, quantity: i64) {
        UpdateOrderUseCase::new(Arc::clone(repo))
            .execute(
                order.id().as_str(),
                UpdateOrderRequest {
                    modified_by: "admin-1".to_string(),
                    lines: vec![LineQuantityUpdate {
                        line: order.lines()[0].id().to_string(),
                        quantity,
                    }],
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unseen_count_follows_admin_changes() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let order = seeded_order(&repo, "rep-1", 1).await;
        let use_case = NotificationsUseCase::new(Arc::clone(&repo));

        assert_eq!(use_case.unseen_count("rep-1").await.unwrap(), 0);

        bump_quantity(&repo, &order, 3).await;
        bump_quantity(&repo, &order, 5).await;

        assert_eq!(use_case.unseen_count("rep-1").await.unwrap(), 2);
        // A different rep sees nothing.
        assert_eq!(use_case.unseen_count("rep-2").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn mark_seen_flips_one_entry() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let order = seeded_order(&repo, "rep-1", 1).await;
        let use_case = NotificationsUseCase::new(Arc::clone(&repo));

        bump_quantity(&repo, &order, 3).await;
        bump_quantity(&repo, &order, 5).await;

        let entries = use_case.order_history(order.id().as_str()).await.unwrap();
        use_case.mark_seen(&entries[0].id).await.unwrap();

        assert_eq!(use_case.unseen_count("rep-1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn mark_seen_unknown_entry_is_not_found() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let use_case = NotificationsUseCase::new(repo);

        let result = use_case.mark_seen("hist-missing").await;
        assert!(matches!(result, Err(OrderError::NotFound { .. })));
    }

    #[tokio::test]
    async fn bulk_mark_reports_flipped_count() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let order_a = seeded_order(&repo, "rep-1", 1).await;
        let order_b = seeded_order(&repo, "rep-1", 2).await;
        let use_case = NotificationsUseCase::new(Arc::clone(&repo));

        bump_quantity(&repo, &order_a, 3).await;
        bump_quantity(&repo, &order_b, 4).await;

        assert_eq!(use_case.mark_all_seen("rep-1").await.unwrap(), 2);
        assert_eq!(use_case.unseen_count("rep-1").await.unwrap(), 0);
        // Already-seen entries are not flipped twice.
        assert_eq!(use_case.mark_all_seen("rep-1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn order_history_is_most_recent_first() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let order = seeded_order(&repo, "rep-1", 1).await;
        let use_case = NotificationsUseCase::new(Arc::clone(&repo));

        bump_quantity(&repo, &order, 3).await;
        bump_quantity(&repo, &order, 5).await;

        let entries = use_case.order_history(order.id().as_str()).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].modified_at >= entries[1].modified_at);
        assert_eq!(entries[0].old_value, "3");
        assert_eq!(entries[0].new_value, "5");
    }

    #[tokio::test]
    async fn order_history_of_missing_order_is_not_found() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let use_case = NotificationsUseCase::new(repo);

        let result = use_case.order_history("ord-missing").await;
        assert!(matches!(result, Err(OrderError::NotFound { .. })));
    }

    #[tokio::test]
    async fn modified_orders_lists_only_admin_modified_with_counts() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let touched = seeded_order(&repo, "rep-1", 1).await;
        let untouched = seeded_order(&repo, "rep-1", 2).await;
        let use_case = NotificationsUseCase::new(Arc::clone(&repo));

        bump_quantity(&repo, &touched, 3).await;

        let modified = use_case.modified_orders("rep-1").await.unwrap();
        assert_eq!(modified.len(), 1);
        assert_eq!(modified[0].order.id, touched.id().to_string());
        assert_eq!(modified[0].unseen_entries, 1);
        assert!(modified.iter().all(|m| m.order.id != untouched.id().to_string()));
    }
}
