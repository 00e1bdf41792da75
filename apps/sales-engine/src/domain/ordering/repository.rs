//! Order Repository Trait
//!
//! Defines the persistence abstraction for orders, their lines, and their
//! change history. Implemented by adapters in the infrastructure layer.
//!
//! The store enforces the unique index on order numbers; `insert` surfaces a
//! violation as [`OrderError::DuplicateNumber`] so the creation flow can
//! regenerate and retry.

use async_trait::async_trait;

use super::aggregate::{Order, OrderLine};
use super::errors::OrderError;
use super::history::HistoryEntry;
use super::value_objects::OrderNumber;
use crate::domain::shared::{DateWindow, EntryId, OrderId, UserId};

/// Which order date an objective-window query matches on.
///
/// The evaluator runs an exact pass on validation dates first and only then
/// a degraded pass on creation dates, for orders validated without a
/// recorded validation timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateCriterion {
    /// Match on the validation timestamp.
    ValidationDate,
    /// Match on the creation timestamp.
    CreationDate,
}

/// Repository trait for order persistence.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new order with its lines.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::DuplicateNumber`] if the unique index on the
    /// order number is violated.
    async fn insert(&self, order: &Order) -> Result<(), OrderError>;

    /// Persist changes to an existing order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] if the order does not exist.
    async fn update(&self, order: &Order) -> Result<(), OrderError>;

    /// Find an order (with lines) by id.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError>;

    /// Whether any order carries this number.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn exists_by_number(&self, number: &OrderNumber) -> Result<bool, OrderError>;

    /// Lexicographic maximum number carrying the given year's prefix.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn last_number_for_year(&self, year: i32) -> Result<Option<OrderNumber>, OrderError>;

    /// Read the current lines of an order back from the store.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_lines(&self, order_id: &OrderId) -> Result<Vec<OrderLine>, OrderError>;

    /// Persist a single modified line.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] if the order or line is missing.
    async fn update_line(&self, order_id: &OrderId, line: &OrderLine) -> Result<(), OrderError>;

    /// All orders owned by a sales rep, most recent first.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn list_by_rep(&self, rep: &UserId) -> Result<Vec<Order>, OrderError>;

    /// A rep's validated orders whose chosen date falls inside the window.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_validated_in_window(
        &self,
        rep: &UserId,
        window: &DateWindow,
        criterion: DateCriterion,
    ) -> Result<Vec<Order>, OrderError>;

    /// Hard-delete an order, cascading to lines and history.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] if the order does not exist.
    async fn delete(&self, id: &OrderId) -> Result<(), OrderError>;

    // ------------------------------------------------------------------
    // Change history (owned by orders, cascade on hard delete)
    // ------------------------------------------------------------------

    /// Append a history entry.
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails.
    async fn append_history(&self, entry: &HistoryEntry) -> Result<(), OrderError>;

    /// All history entries of an order, most recent first.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_history_by_order(
        &self,
        order_id: &OrderId,
    ) -> Result<Vec<HistoryEntry>, OrderError>;

    /// Find one history entry by id.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_history_entry(&self, id: &EntryId) -> Result<Option<HistoryEntry>, OrderError>;

    /// Flip the seen flag on one entry.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] if the entry does not exist.
    async fn mark_entry_seen(&self, id: &EntryId) -> Result<(), OrderError>;

    /// Flip the seen flag on every unseen entry of a rep's orders.
    ///
    /// Returns how many entries were flipped.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn mark_all_seen_for_rep(&self, rep: &UserId) -> Result<u64, OrderError>;

    /// Count unseen entries across a rep's orders.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn count_unseen_for_rep(&self, rep: &UserId) -> Result<u64, OrderError>;

    /// Count unseen entries on one order.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn count_unseen_for_order(&self, order_id: &OrderId) -> Result<u64, OrderError>;
}
