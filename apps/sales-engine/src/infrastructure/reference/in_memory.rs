//! In-memory catalog and directory adapters.
//!
//! The real collaborators are separate services; these adapters serve
//! tests and standalone runs of the engine.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::application::ports::{
    CatalogPort, Client, DirectoryPort, PortError, Product, Promotion, User, UserRole,
};
use crate::domain::shared::{ClientId, ProductId, PromotionId, UserId};

/// In-memory implementation of [`CatalogPort`].
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<String, Product>>,
    promotions: RwLock<HashMap<String, Promotion>>,
}

impl InMemoryCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product.
    pub fn add_product(&self, product: Product) {
        let mut products = self.products.write().unwrap();
        products.insert(product.id.to_string(), product);
    }

    /// Register a promotion.
    pub fn add_promotion(&self, promotion: Promotion) {
        let mut promotions = self.promotions.write().unwrap();
        promotions.insert(promotion.id.to_string(), promotion);
    }
}

#[async_trait]
impl CatalogPort for InMemoryCatalog {
    async fn find_product(&self, id: &ProductId) -> Result<Option<Product>, PortError> {
        let products = self.products.read().unwrap();
        Ok(products.get(id.as_str()).cloned())
    }

    async fn find_promotion(&self, id: &PromotionId) -> Result<Option<Promotion>, PortError> {
        let promotions = self.promotions.read().unwrap();
        Ok(promotions.get(id.as_str()).cloned())
    }
}

/// In-memory implementation of [`DirectoryPort`].
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    users: RwLock<HashMap<String, User>>,
    clients: RwLock<HashMap<String, Client>>,
}

impl InMemoryDirectory {
    /// Create a new empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user.
    pub fn add_user(&self, user: User) {
        let mut users = self.users.write().unwrap();
        users.insert(user.id.to_string(), user);
    }

    /// Register a client.
    pub fn add_client(&self, client: Client) {
        let mut clients = self.clients.write().unwrap();
        clients.insert(client.id.to_string(), client);
    }
}

#[async_trait]
impl DirectoryPort for InMemoryDirectory {
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, PortError> {
        let users = self.users.read().unwrap();
        Ok(users.get(id.as_str()).cloned())
    }

    async fn find_client(&self, id: &ClientId) -> Result<Option<Client>, PortError> {
        let clients = self.clients.read().unwrap();
        Ok(clients.get(id.as_str()).cloned())
    }

    async fn list_active_sales_reps(&self) -> Result<Vec<User>, PortError> {
        let users = self.users.read().unwrap();
        let mut reps: Vec<User> = users
            .values()
            .filter(|u| matches!(u.role, UserRole::SalesRep) && u.active)
            .cloned()
            .collect();
        reps.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        Ok(reps)
    }
}
