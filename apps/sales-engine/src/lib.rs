// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Sales Engine - Rust Core Library
//!
//! Back-office order engine for the Comptoir system.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (aggregates, value objects, services)
//!   - `ordering`: Order aggregate, priced lines, unique numbers, audit trail
//!   - `objectives`: Sales targets and their evaluation rules
//!   - `shared`: Money, VAT rates, quantities, timestamps, typed ids
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: Interfaces to the catalog and directory collaborators
//!   - `use_cases`: Create/Update/Review orders, notifications, objectives
//!   - `dto`: Data transfer objects for API boundaries
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `persistence`: Order and objective stores (in-memory)
//!   - `reference`: Catalog and directory adapters
//!   - `http`: REST API controller
//!
//! Cross-cutting: `config` (YAML + env interpolation) and `observability`
//! (tracing initialization).

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

/// Configuration loading and validation.
pub mod config;

/// Tracing initialization.
pub mod observability;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::objectives::{ObjectiveError, SalesObjective};
pub use domain::ordering::{
    Order, OrderError, OrderLine, OrderNumber, OrderNumberGenerator, OrderStatus,
};
pub use domain::shared::{
    ClientId, Money, OrderId, ProductId, PromotionId, Quantity, Timestamp, UserId, VatRate,
};

// Application re-exports
pub use application::dto::{CreateOrderRequest, OrderDto, UpdateOrderRequest};
pub use application::ports::{CatalogPort, DirectoryPort, PortError};
pub use application::use_cases::{
    CreateOrderUseCase, ManageObjectivesUseCase, NotificationsUseCase, ObjectiveProgressUseCase,
    OrderSummaryUseCase, ReviewOrderUseCase, UpdateOrderUseCase,
};

// Infrastructure re-exports
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::persistence::{InMemoryObjectiveRepository, InMemoryOrderRepository};
pub use infrastructure::reference::{InMemoryCatalog, InMemoryDirectory};
