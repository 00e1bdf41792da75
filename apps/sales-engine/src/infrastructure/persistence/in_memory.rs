//! In-memory repositories for testing and default runtime wiring.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::objectives::{ObjectiveError, ObjectiveRepository, SalesObjective};
use crate::domain::ordering::aggregate::{Order, OrderLine};
use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::history::HistoryEntry;
use crate::domain::ordering::repository::{DateCriterion, OrderRepository};
use crate::domain::ordering::value_objects::OrderNumber;
use crate::domain::shared::{DateWindow, EntryId, ObjectiveId, OrderId, Timestamp, UserId};

/// In-memory implementation of [`OrderRepository`].
///
/// Enforces the unique index on order numbers under its write lock, which is
/// what makes the regenerate-and-retry creation flow observable in tests.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<String, Order>>,
    history: RwLock<HashMap<String, HistoryEntry>>,
}

impl InMemoryOrderRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.read().unwrap().len()
    }

    /// Whether the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.read().unwrap().is_empty()
    }

    fn rep_order_ids(&self, rep: &UserId) -> HashSet<String> {
        self.orders
            .read()
            .unwrap()
            .values()
            .filter(|o| o.sales_rep() == rep)
            .map(|o| o.id().to_string())
            .collect()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, order: &Order) -> Result<(), OrderError> {
        let mut orders = self.orders.write().unwrap();

        let duplicate = orders
            .values()
            .any(|o| o.number() == order.number() && o.id() != order.id());
        if duplicate {
            return Err(OrderError::DuplicateNumber {
                number: order.number().to_string(),
            });
        }

        orders.insert(order.id().to_string(), order.clone());
        Ok(())
    }

    async fn update(&self, order: &Order) -> Result<(), OrderError> {
        let mut orders = self.orders.write().unwrap();
        if !orders.contains_key(order.id().as_str()) {
            return Err(OrderError::NotFound {
                entity: "order".to_string(),
                id: order.id().to_string(),
            });
        }
        orders.insert(order.id().to_string(), order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
        let orders = self.orders.read().unwrap();
        Ok(orders.get(id.as_str()).cloned())
    }

    async fn exists_by_number(&self, number: &OrderNumber) -> Result<bool, OrderError> {
        let orders = self.orders.read().unwrap();
        Ok(orders.values().any(|o| o.number() == number))
    }

    async fn last_number_for_year(&self, year: i32) -> Result<Option<OrderNumber>, OrderError> {
        let prefix = OrderNumber::year_prefix(year);
        let orders = self.orders.read().unwrap();
        Ok(orders
            .values()
            .map(Order::number)
            .filter(|n| n.as_str().starts_with(&prefix))
            .max_by(|a, b| a.as_str().cmp(b.as_str()))
            .cloned())
    }

    async fn find_lines(&self, order_id: &OrderId) -> Result<Vec<OrderLine>, OrderError> {
        let orders = self.orders.read().unwrap();
        orders
            .get(order_id.as_str())
            .map(|o| o.lines().to_vec())
            .ok_or_else(|| OrderError::NotFound {
                entity: "order".to_string(),
                id: order_id.to_string(),
            })
    }

    async fn update_line(&self, order_id: &OrderId, line: &OrderLine) -> Result<(), OrderError> {
        let mut orders = self.orders.write().unwrap();
        let order = orders
            .get_mut(order_id.as_str())
            .ok_or_else(|| OrderError::NotFound {
                entity: "order".to_string(),
                id: order_id.to_string(),
            })?;

        let mut lines = order.lines().to_vec();
        let slot = lines
            .iter_mut()
            .find(|l| l.id() == line.id())
            .ok_or_else(|| OrderError::NotFound {
                entity: "order line".to_string(),
                id: line.id().to_string(),
            })?;
        *slot = line.clone();

        order.replace_lines(lines);
        Ok(())
    }

    async fn list_by_rep(&self, rep: &UserId) -> Result<Vec<Order>, OrderError> {
        let orders = self.orders.read().unwrap();
        let mut result: Vec<Order> = orders
            .values()
            .filter(|o| o.sales_rep() == rep)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(result)
    }

    async fn find_validated_in_window(
        &self,
        rep: &UserId,
        window: &DateWindow,
        criterion: DateCriterion,
    ) -> Result<Vec<Order>, OrderError> {
        let orders = self.orders.read().unwrap();
        Ok(orders
            .values()
            .filter(|o| o.sales_rep() == rep && o.status().is_validated())
            .filter(|o| match criterion {
                DateCriterion::ValidationDate => {
                    o.validated_at().is_some_and(|at| window.contains(at))
                }
                DateCriterion::CreationDate => window.contains(o.created_at()),
            })
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &OrderId) -> Result<(), OrderError> {
        let mut orders = self.orders.write().unwrap();
        orders
            .remove(id.as_str())
            .ok_or_else(|| OrderError::NotFound {
                entity: "order".to_string(),
                id: id.to_string(),
            })?;

        // Cascade: an order owns its history.
        let mut history = self.history.write().unwrap();
        history.retain(|_, entry| entry.order() != id);
        Ok(())
    }

    async fn append_history(&self, entry: &HistoryEntry) -> Result<(), OrderError> {
        let mut history = self.history.write().unwrap();
        history.insert(entry.id().to_string(), entry.clone());
        Ok(())
    }

    async fn find_history_by_order(
        &self,
        order_id: &OrderId,
    ) -> Result<Vec<HistoryEntry>, OrderError> {
        let history = self.history.read().unwrap();
        let mut entries: Vec<HistoryEntry> = history
            .values()
            .filter(|e| e.order() == order_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.modified_at().cmp(&a.modified_at()));
        Ok(entries)
    }

    async fn find_history_entry(&self, id: &EntryId) -> Result<Option<HistoryEntry>, OrderError> {
        let history = self.history.read().unwrap();
        Ok(history.get(id.as_str()).cloned())
    }

    async fn mark_entry_seen(&self, id: &EntryId) -> Result<(), OrderError> {
        let mut history = self.history.write().unwrap();
        let entry = history
            .get_mut(id.as_str())
            .ok_or_else(|| OrderError::NotFound {
                entity: "notification".to_string(),
                id: id.to_string(),
            })?;
        entry.mark_seen();
        Ok(())
    }

    async fn mark_all_seen_for_rep(&self, rep: &UserId) -> Result<u64, OrderError> {
        let owned = self.rep_order_ids(rep);
        let mut history = self.history.write().unwrap();
        let mut flipped = 0;
        for entry in history.values_mut() {
            if !entry.seen_by_rep() && owned.contains(entry.order().as_str()) {
                entry.mark_seen();
                flipped += 1;
            }
        }
        Ok(flipped)
    }

    async fn count_unseen_for_rep(&self, rep: &UserId) -> Result<u64, OrderError> {
        let owned = self.rep_order_ids(rep);
        let history = self.history.read().unwrap();
        Ok(history
            .values()
            .filter(|e| !e.seen_by_rep() && owned.contains(e.order().as_str()))
            .count() as u64)
    }

    async fn count_unseen_for_order(&self, order_id: &OrderId) -> Result<u64, OrderError> {
        let history = self.history.read().unwrap();
        Ok(history
            .values()
            .filter(|e| !e.seen_by_rep() && e.order() == order_id)
            .count() as u64)
    }
}

/// In-memory implementation of [`ObjectiveRepository`].
#[derive(Debug, Default)]
pub struct InMemoryObjectiveRepository {
    objectives: RwLock<HashMap<String, SalesObjective>>,
}

impl InMemoryObjectiveRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ObjectiveRepository for InMemoryObjectiveRepository {
    async fn insert(&self, objective: &SalesObjective) -> Result<(), ObjectiveError> {
        let mut objectives = self.objectives.write().unwrap();
        objectives.insert(objective.id().to_string(), objective.clone());
        Ok(())
    }

    async fn update(&self, objective: &SalesObjective) -> Result<(), ObjectiveError> {
        let mut objectives = self.objectives.write().unwrap();
        if !objectives.contains_key(objective.id().as_str()) {
            return Err(ObjectiveError::NotFound {
                entity: "objective".to_string(),
                id: objective.id().to_string(),
            });
        }
        objectives.insert(objective.id().to_string(), objective.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ObjectiveId,
    ) -> Result<Option<SalesObjective>, ObjectiveError> {
        let objectives = self.objectives.read().unwrap();
        Ok(objectives.get(id.as_str()).cloned())
    }

    async fn list_all(&self) -> Result<Vec<SalesObjective>, ObjectiveError> {
        let objectives = self.objectives.read().unwrap();
        Ok(objectives.values().cloned().collect())
    }

    async fn list_for_rep(&self, rep: &UserId) -> Result<Vec<SalesObjective>, ObjectiveError> {
        let objectives = self.objectives.read().unwrap();
        Ok(objectives
            .values()
            .filter(|o| o.sales_rep() == Some(rep))
            .cloned()
            .collect())
    }

    async fn list_active_for_rep(
        &self,
        rep: &UserId,
        now: Timestamp,
    ) -> Result<Vec<SalesObjective>, ObjectiveError> {
        let objectives = self.objectives.read().unwrap();
        Ok(objectives
            .values()
            .filter(|o| o.sales_rep() == Some(rep) && o.is_active() && !o.is_expired(now))
            .cloned()
            .collect())
    }

    async fn list_active_global(&self) -> Result<Vec<SalesObjective>, ObjectiveError> {
        let objectives = self.objectives.read().unwrap();
        Ok(objectives
            .values()
            .filter(|o| o.is_global() && o.is_active())
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &ObjectiveId) -> Result<(), ObjectiveError> {
        let mut objectives = self.objectives.write().unwrap();
        objectives
            .remove(id.as_str())
            .ok_or_else(|| ObjectiveError::NotFound {
                entity: "objective".to_string(),
                id: id.to_string(),
            })?;
        Ok(())
    }
}
