//! Shared Kernel
//!
//! Value objects and errors used by every bounded context.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::{
    ClientId, DateWindow, EntryId, LineId, Money, ObjectiveId, OrderId, ProductId, PromotionId,
    Quantity, Timestamp, UserId, VatRate,
};
