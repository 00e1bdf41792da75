//! Ordering Bounded Context
//!
//! Order creation with priced line items, unique number assignment,
//! post-creation modification with recomputation and an audit trail, and
//! the review transitions (validate / reject / delete).
//!
//! # Key Concepts
//!
//! - **Order Aggregate**: owns its lines and derived pricing aggregates
//! - **Price snapshots**: lines capture catalog prices at order time
//! - **Audit trail**: every admin change appends an unseen history entry

pub mod aggregate;
pub mod errors;
pub mod history;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use aggregate::{Order, OrderLine};
pub use errors::OrderError;
pub use history::HistoryEntry;
pub use repository::{DateCriterion, OrderRepository};
pub use services::{OrderNumberGenerator, OrderTotals};
pub use value_objects::{OrderNumber, OrderStatus};
