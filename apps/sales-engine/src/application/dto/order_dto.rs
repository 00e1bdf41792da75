//! Order DTOs for API boundaries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ordering::aggregate::{Order, OrderLine};
use crate::domain::ordering::history::HistoryEntry;
use crate::domain::ordering::value_objects::OrderStatus;
use crate::domain::shared::Timestamp;

/// One requested line of a new order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLineRequest {
    /// Product id to order.
    pub product: String,
    /// Requested quantity (validated strictly positive).
    pub quantity: i64,
}

/// Request to create an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Acting sales rep id.
    pub sales_rep: String,
    /// Client the order is for.
    pub client: String,
    /// Optional promotion to apply.
    #[serde(default)]
    pub promotion: Option<String>,
    /// Requested lines.
    pub lines: Vec<NewLineRequest>,
}

/// One requested quantity change on an existing line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineQuantityUpdate {
    /// Line id to change. Unknown ids are skipped silently.
    pub line: String,
    /// New quantity (validated strictly positive).
    pub quantity: i64,
}

/// Request to modify an order's line quantities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderRequest {
    /// Admin applying the change; recorded on every audit entry.
    pub modified_by: String,
    /// Requested line changes.
    pub lines: Vec<LineQuantityUpdate>,
}

/// Order line representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineDto {
    /// Line id.
    pub id: String,
    /// Product id.
    pub product: String,
    /// Product name captured at order time.
    pub product_name: String,
    /// Quantity.
    pub quantity: u32,
    /// Net unit price snapshot.
    pub unit_price: Decimal,
    /// Tax-inclusive unit price snapshot.
    pub unit_price_incl_tax: Decimal,
    /// VAT rate snapshot (percent).
    pub vat_rate: Decimal,
    /// Net line total.
    pub net_total: Decimal,
    /// Gross line total.
    pub gross_total: Decimal,
}

impl OrderLineDto {
    /// Build from a domain line.
    #[must_use]
    pub fn from_line(line: &OrderLine) -> Self {
        Self {
            id: line.id().to_string(),
            product: line.product().to_string(),
            product_name: line.product_name().to_string(),
            quantity: line.quantity().units(),
            unit_price: line.unit_price().amount(),
            unit_price_incl_tax: line.unit_price_incl_tax().amount(),
            vat_rate: line.vat_rate().percent(),
            net_total: line.net_total().amount(),
            gross_total: line.gross_total().amount(),
        }
    }
}

/// Order representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDto {
    /// Order id.
    pub id: String,
    /// Human-readable order number.
    pub number: String,
    /// Owning sales rep id.
    pub sales_rep: String,
    /// Client id.
    pub client: String,
    /// Status.
    pub status: OrderStatus,
    /// Creation timestamp.
    pub created_at: Timestamp,
    /// Validation timestamp, if validated.
    pub validated_at: Option<Timestamp>,
    /// Rejection reason, if rejected.
    pub rejection_reason: Option<String>,
    /// Applied promotion id, if any.
    pub promotion: Option<String>,
    /// Net order total.
    pub net_total: Decimal,
    /// Weighted-average VAT rate (percent).
    pub vat_rate: Decimal,
    /// Gross order total.
    pub gross_total: Decimal,
    /// Whether an admin modified the order after creation.
    pub admin_modified: bool,
    /// Lines.
    pub lines: Vec<OrderLineDto>,
}

impl OrderDto {
    /// Build from a domain order.
    #[must_use]
    pub fn from_order(order: &Order) -> Self {
        Self {
            id: order.id().to_string(),
            number: order.number().to_string(),
            sales_rep: order.sales_rep().to_string(),
            client: order.client().to_string(),
            status: order.status(),
            created_at: order.created_at(),
            validated_at: order.validated_at(),
            rejection_reason: order.rejection_reason().map(str::to_string),
            promotion: order.promotion().map(ToString::to_string),
            net_total: order.totals().net.amount(),
            vat_rate: order.totals().vat_rate.percent(),
            gross_total: order.totals().gross.amount(),
            admin_modified: order.admin_modified(),
            lines: order.lines().iter().map(OrderLineDto::from_line).collect(),
        }
    }
}

/// History entry representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntryDto {
    /// Entry id.
    pub id: String,
    /// Owning order id.
    pub order: String,
    /// Changed field label.
    pub field: String,
    /// Previous value.
    pub old_value: String,
    /// New value.
    pub new_value: String,
    /// Admin who made the change.
    pub modified_by: String,
    /// Change timestamp.
    pub modified_at: Timestamp,
    /// Whether the rep has seen the entry.
    pub seen_by_rep: bool,
}

impl HistoryEntryDto {
    /// Build from a domain entry.
    #[must_use]
    pub fn from_entry(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id().to_string(),
            order: entry.order().to_string(),
            field: entry.field().to_string(),
            old_value: entry.old_value().to_string(),
            new_value: entry.new_value().to_string(),
            modified_by: entry.modified_by().to_string(),
            modified_at: entry.modified_at(),
            seen_by_rep: entry.seen_by_rep(),
        }
    }
}

/// An admin-modified order paired with its unseen entry count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifiedOrderDto {
    /// The order.
    pub order: OrderDto,
    /// How many of its audit entries the rep has not seen.
    pub unseen_entries: u64,
}

/// Contact block for the printable summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDto {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

/// Client block for the printable summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSummaryDto {
    /// Display name.
    pub name: String,
    /// Fiscal registration code, if known.
    pub fiscal_code: Option<String>,
}

/// Promotion block for the printable summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionSummaryDto {
    /// Promotion title.
    pub title: String,
    /// Discount percentage applied.
    pub discount_percent: Decimal,
}

/// Printable order summary read model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummaryDto {
    /// Order number.
    pub number: String,
    /// Creation date.
    pub date: Timestamp,
    /// Owning sales rep.
    pub sales_rep: ContactDto,
    /// Client.
    pub client: ClientSummaryDto,
    /// Lines.
    pub lines: Vec<OrderLineDto>,
    /// Net order total.
    pub net_total: Decimal,
    /// Gross order total.
    pub gross_total: Decimal,
    /// Gross total before the promotion discount, back-computed from the
    /// promotion percentage. Equals `gross_total` without a promotion.
    pub price_before_discount: Decimal,
    /// Applied promotion, if any.
    pub promotion: Option<PromotionSummaryDto>,
}
