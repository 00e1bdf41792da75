//! Order line with price snapshot.

use serde::{Deserialize, Serialize};

use crate::domain::ordering::services::pricing;
use crate::domain::shared::{LineId, Money, ProductId, Quantity, VatRate};

/// A single priced line of an order.
///
/// Unit price, tax-inclusive unit price, and VAT rate are captured from the
/// catalog at order time; later product price changes never touch existing
/// orders. The product name is snapshotted alongside for audit labels and
/// printable summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    id: LineId,
    product: ProductId,
    product_name: String,
    quantity: Quantity,
    unit_price: Money,
    unit_price_incl_tax: Money,
    vat_rate: VatRate,
    net_total: Money,
    gross_total: Money,
}

impl OrderLine {
    /// Create a new line with a generated id and computed totals.
    #[must_use]
    pub fn create(
        product: ProductId,
        product_name: String,
        unit_price: Money,
        unit_price_incl_tax: Money,
        vat_rate: VatRate,
        quantity: Quantity,
    ) -> Self {
        let totals = pricing::line_totals(unit_price, vat_rate, quantity);
        Self {
            id: LineId::generate(),
            product,
            product_name,
            quantity,
            unit_price,
            unit_price_incl_tax,
            vat_rate,
            net_total: totals.net,
            gross_total: totals.gross,
        }
    }

    /// Get the line id.
    #[must_use]
    pub const fn id(&self) -> &LineId {
        &self.id
    }

    /// Get the product id.
    #[must_use]
    pub const fn product(&self) -> &ProductId {
        &self.product
    }

    /// Get the snapshotted product name.
    #[must_use]
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Get the quantity.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Get the snapshotted net unit price.
    #[must_use]
    pub const fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Get the snapshotted tax-inclusive unit price.
    #[must_use]
    pub const fn unit_price_incl_tax(&self) -> Money {
        self.unit_price_incl_tax
    }

    /// Get the snapshotted VAT rate.
    #[must_use]
    pub const fn vat_rate(&self) -> VatRate {
        self.vat_rate
    }

    /// Get the net line total.
    #[must_use]
    pub const fn net_total(&self) -> Money {
        self.net_total
    }

    /// Get the gross line total.
    #[must_use]
    pub const fn gross_total(&self) -> Money {
        self.gross_total
    }

    /// Change the quantity and recompute totals from the price snapshot.
    pub fn set_quantity(&mut self, quantity: Quantity) {
        let totals = pricing::line_totals(self.unit_price, self.vat_rate, quantity);
        self.quantity = quantity;
        self.net_total = totals.net;
        self.gross_total = totals.gross;
    }
}
