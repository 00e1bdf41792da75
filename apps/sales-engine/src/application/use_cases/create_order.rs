//! Create Order Use Case

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::dto::{CreateOrderRequest, OrderDto};
use crate::application::ports::{CatalogPort, DirectoryPort};
use crate::domain::ordering::aggregate::{Order, OrderLine};
use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::repository::OrderRepository;
use crate::domain::ordering::services::OrderNumberGenerator;
use crate::domain::shared::{ClientId, ProductId, PromotionId, Quantity, UserId};

/// Default bound on whole-insert retries after a number conflict.
const DEFAULT_INSERT_ATTEMPTS: u32 = 3;

/// Use case for creating orders with priced lines and a unique number.
pub struct CreateOrderUseCase<O, C, D>
where
    O: OrderRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    orders: Arc<O>,
    catalog: Arc<C>,
    directory: Arc<D>,
    numbers: OrderNumberGenerator,
    insert_attempts: u32,
}

impl<O, C, D> CreateOrderUseCase<O, C, D>
where
    O: OrderRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    /// Create a new use case with default retry budgets.
    pub fn new(orders: Arc<O>, catalog: Arc<C>, directory: Arc<D>) -> Self {
        Self {
            orders,
            catalog,
            directory,
            numbers: OrderNumberGenerator::default(),
            insert_attempts: DEFAULT_INSERT_ATTEMPTS,
        }
    }

    /// Override the number generator and the insert retry budget.
    #[must_use]
    pub const fn with_budgets(mut self, numbers: OrderNumberGenerator, insert_attempts: u32) -> Self {
        self.numbers = numbers;
        self.insert_attempts = insert_attempts;
        self
    }

    /// Execute the use case.
    ///
    /// The actor's role is checked before any other lookup; validation
    /// failures are aggregated and rejected before any write.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Forbidden`] for non-rep actors,
    /// [`OrderError::NotFound`] for unresolved references,
    /// [`OrderError::Validation`] for bad input, and
    /// [`OrderError::NumberExhausted`] once the insert retry budget is spent.
    pub async fn execute(&self, request: CreateOrderRequest) -> Result<OrderDto, OrderError> {
        let rep_id = UserId::new(request.sales_rep.as_str());
        let rep = self
            .directory
            .find_user(&rep_id)
            .await?
            .ok_or_else(|| OrderError::NotFound {
                entity: "user".to_string(),
                id: rep_id.to_string(),
            })?;
        if !rep.is_sales_rep() {
            return Err(OrderError::Forbidden {
                reason: "only sales reps may create orders".to_string(),
            });
        }

        if request.lines.is_empty() {
            return Err(OrderError::Validation {
                message: "An order requires at least one line".to_string(),
            });
        }

        let mut failures = Vec::new();
        let mut quantities = Vec::with_capacity(request.lines.len());
        for line in &request.lines {
            match Quantity::try_new(line.quantity) {
                Ok(quantity) => quantities.push(quantity),
                Err(err) => failures.push(format!("product {}: {err}", line.product)),
            }
        }
        if !failures.is_empty() {
            return Err(OrderError::Validation {
                message: failures.join("; "),
            });
        }

        let client_id = ClientId::new(request.client.as_str());
        self.directory
            .find_client(&client_id)
            .await?
            .ok_or_else(|| OrderError::NotFound {
                entity: "client".to_string(),
                id: client_id.to_string(),
            })?;

        let promotion = match request.promotion {
            Some(raw) => {
                let promotion_id = PromotionId::new(raw.as_str());
                self.catalog
                    .find_promotion(&promotion_id)
                    .await?
                    .ok_or_else(|| OrderError::NotFound {
                        entity: "promotion".to_string(),
                        id: promotion_id.to_string(),
                    })?;
                Some(promotion_id)
            }
            None => None,
        };

        let mut lines = Vec::with_capacity(request.lines.len());
        for (requested, quantity) in request.lines.iter().zip(quantities) {
            let product_id = ProductId::new(requested.product.as_str());
            let product = self
                .catalog
                .find_product(&product_id)
                .await?
                .ok_or_else(|| OrderError::NotFound {
                    entity: "product".to_string(),
                    id: product_id.to_string(),
                })?;

            lines.push(OrderLine::create(
                product.id,
                product.name,
                product.unit_price,
                product.unit_price_incl_tax,
                product.vat_rate,
                quantity,
            ));
        }

        let number = self.numbers.generate(self.orders.as_ref()).await?;
        let mut order = Order::create(number, rep_id, client_id, promotion, lines)?;

        // The generate-then-check above is not atomic; the store's unique
        // index is the actual guarantee. On a conflict, regenerate and retry
        // the whole insert within a bounded budget.
        let mut attempt = 1;
        loop {
            match self.orders.insert(&order).await {
                Ok(()) => break,
                Err(OrderError::DuplicateNumber { number }) => {
                    if attempt >= self.insert_attempts {
                        return Err(OrderError::NumberExhausted {
                            attempts: self.insert_attempts,
                        });
                    }
                    warn!(number = %number, attempt, "order number conflict, regenerating");
                    order.renumber(self.numbers.generate(self.orders.as_ref()).await?);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            order = %order.id(),
            number = %order.number(),
            rep = %order.sales_rep(),
            gross = %order.totals().gross,
            "order created"
        );
        Ok(OrderDto::from_order(&order))
    }
}
