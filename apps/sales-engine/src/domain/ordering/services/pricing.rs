//! Line and order pricing.
//!
//! Pure computation, invoked both at creation and at modification. All
//! amounts are rounded to 2 decimal places at the line level; order
//! aggregates are sums of already-rounded line amounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ordering::aggregate::OrderLine;
use crate::domain::shared::{Money, Quantity, VatRate};

/// Totals for a single order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineTotals {
    /// Net (pre-tax) line amount.
    pub net: Money,
    /// VAT amount on the line.
    pub vat: Money,
    /// Gross (tax-inclusive) line amount.
    pub gross: Money,
}

/// Compute the totals of one line from its price snapshot.
#[must_use]
pub fn line_totals(unit_price: Money, vat_rate: VatRate, quantity: Quantity) -> LineTotals {
    let net = (unit_price * quantity.as_decimal()).round();
    let vat = vat_rate.vat_on(net);
    let gross = (net + vat).round();
    LineTotals { net, vat, gross }
}

/// Order-level pricing aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Net (pre-tax) order total.
    pub net: Money,
    /// Weighted-average VAT rate across lines.
    pub vat_rate: VatRate,
    /// Gross (tax-inclusive) order total.
    pub gross: Money,
}

impl OrderTotals {
    /// Empty totals for an order with no priced lines yet.
    pub const ZERO: Self = Self {
        net: Money::ZERO,
        vat_rate: VatRate::ZERO,
        gross: Money::ZERO,
    };

    /// The VAT amount carried by the order.
    #[must_use]
    pub fn vat_amount(&self) -> Money {
        self.gross - self.net
    }
}

/// Aggregate line totals into order totals.
///
/// The order VAT rate is derived from summed VAT amount over summed net
/// amount, a weighted average, since lines may carry different rates.
/// Never average per-line percentages.
#[must_use]
pub fn order_totals(lines: &[OrderLine]) -> OrderTotals {
    let net: Money = lines.iter().map(OrderLine::net_total).sum();
    let gross: Money = lines.iter().map(OrderLine::gross_total).sum();
    let vat = gross - net;

    let vat_rate = if net.is_positive() {
        VatRate::new((vat.amount() / net.amount() * Decimal::ONE_HUNDRED).round_dp(2))
    } else {
        VatRate::ZERO
    };

    OrderTotals {
        net: net.round(),
        vat_rate,
        gross: gross.round(),
    }
}
