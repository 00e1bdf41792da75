//! Shared value objects used across bounded contexts.

mod identifiers;
mod money;
mod quantity;
mod timestamp;
mod vat_rate;

pub use identifiers::{
    ClientId, EntryId, LineId, ObjectiveId, OrderId, ProductId, PromotionId, UserId,
};
pub use money::Money;
pub use quantity::Quantity;
pub use timestamp::{DateWindow, Timestamp};
pub use vat_rate::VatRate;
