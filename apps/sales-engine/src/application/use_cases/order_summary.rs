//! Order Summary Use Case
//!
//! Read model behind the printable order slip: order lines with their price
//! snapshots, rep and client contact blocks, and the pre-discount price
//! back-computed from the applied promotion's percentage.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::application::dto::{
    ClientSummaryDto, ContactDto, OrderLineDto, OrderSummaryDto, PromotionSummaryDto,
};
use crate::application::ports::{CatalogPort, DirectoryPort, Promotion};
use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::repository::OrderRepository;
use crate::domain::shared::OrderId;

/// Use case assembling the printable summary of one order.
pub struct OrderSummaryUseCase<O, C, D>
where
    O: OrderRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    orders: Arc<O>,
    catalog: Arc<C>,
    directory: Arc<D>,
}

impl<O, C, D> OrderSummaryUseCase<O, C, D>
where
    O: OrderRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    /// Create a new use case.
    pub const fn new(orders: Arc<O>, catalog: Arc<C>, directory: Arc<D>) -> Self {
        Self {
            orders,
            catalog,
            directory,
        }
    }

    /// Execute the use case.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] if the order or any referenced
    /// rep/client/promotion no longer resolves.
    pub async fn execute(&self, order_id: &str) -> Result<OrderSummaryDto, OrderError> {
        let order_id = OrderId::new(order_id);
        let order =
            self.orders
                .find_by_id(&order_id)
                .await?
                .ok_or_else(|| OrderError::NotFound {
                    entity: "order".to_string(),
                    id: order_id.to_string(),
                })?;

        let rep = self
            .directory
            .find_user(order.sales_rep())
            .await?
            .ok_or_else(|| OrderError::NotFound {
                entity: "user".to_string(),
                id: order.sales_rep().to_string(),
            })?;

        let client = self
            .directory
            .find_client(order.client())
            .await?
            .ok_or_else(|| OrderError::NotFound {
                entity: "client".to_string(),
                id: order.client().to_string(),
            })?;

        let promotion = match order.promotion() {
            Some(id) => Some(self.catalog.find_promotion(id).await?.ok_or_else(|| {
                OrderError::NotFound {
                    entity: "promotion".to_string(),
                    id: id.to_string(),
                }
            })?),
            None => None,
        };

        let gross = order.totals().gross.amount();
        Ok(OrderSummaryDto {
            number: order.number().to_string(),
            date: order.created_at(),
            sales_rep: ContactDto {
                name: format!("{} {}", rep.first_name, rep.last_name),
                email: rep.email,
            },
            client: ClientSummaryDto {
                name: match &client.first_name {
                    Some(first) => format!("{first} {}", client.name),
                    None => client.name.clone(),
                },
                fiscal_code: client.fiscal_code,
            },
            lines: order.lines().iter().map(OrderLineDto::from_line).collect(),
            net_total: order.totals().net.amount(),
            gross_total: gross,
            price_before_discount: price_before_discount(gross, promotion.as_ref()),
            promotion: promotion.map(|p| PromotionSummaryDto {
                title: p.title,
                discount_percent: p.discount_percent,
            }),
        })
    }
}

/// Back-compute the gross total before the promotion discount.
///
/// With a discount of `p` percent the stored gross is `(1 - p/100)` of the
/// original price, so the original is `gross / (1 - p/100)`. A discount of
/// 100% or more leaves the stored gross as-is rather than dividing by zero.
fn price_before_discount(gross: Decimal, promotion: Option<&Promotion>) -> Decimal {
    match promotion {
        Some(promo) if promo.discount_percent < Decimal::ONE_HUNDRED => {
            (gross / (Decimal::ONE - promo.discount_percent / Decimal::ONE_HUNDRED)).round_dp(2)
        }
        _ => gross,
    }
}
