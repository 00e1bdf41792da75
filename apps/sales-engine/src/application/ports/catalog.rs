//! Catalog port: product and promotion lookups.
//!
//! The product catalog and promotion services are external collaborators;
//! the engine only reads the fields it snapshots onto orders.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PortError;
use crate::domain::shared::{Money, ProductId, PromotionId, VatRate};

/// Product read model as served by the catalog collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Net unit price.
    pub unit_price: Money,
    /// Tax-inclusive unit price.
    pub unit_price_incl_tax: Money,
    /// Applicable VAT rate.
    pub vat_rate: VatRate,
    /// Product category name, if categorized.
    pub category: Option<String>,
}

/// Promotion read model: a percentage discount applicable to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promotion {
    /// Promotion identifier.
    pub id: PromotionId,
    /// Display title.
    pub title: String,
    /// Discount percentage (e.g. `10` for 10%).
    pub discount_percent: Decimal,
}

/// Read-only access to products and promotions.
#[async_trait]
pub trait CatalogPort: Send + Sync {
    /// Look up a product by id.
    ///
    /// # Errors
    ///
    /// Returns [`PortError`] if the collaborator fails.
    async fn find_product(&self, id: &ProductId) -> Result<Option<Product>, PortError>;

    /// Look up a promotion by id.
    ///
    /// # Errors
    ///
    /// Returns [`PortError`] if the collaborator fails.
    async fn find_promotion(&self, id: &PromotionId) -> Result<Option<Promotion>, PortError>;
}
