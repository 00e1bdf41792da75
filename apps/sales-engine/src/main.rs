//! Sales Engine Binary
//!
//! Starts the Comptoir sales engine with its HTTP API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin sales-engine [config.yaml]
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log filter (default: the configured `logging.level`)
//!
//! Configuration is read from the path given as the first argument, falling
//! back to `config.yaml` in the working directory, falling back to built-in
//! defaults. `${VAR:-default}` references inside the file are interpolated
//! from the environment.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;

use sales_engine::application::use_cases::{
    CreateOrderUseCase, ManageObjectivesUseCase, NotificationsUseCase, ObjectiveProgressUseCase,
    OrderSummaryUseCase, ReviewOrderUseCase, UpdateOrderUseCase,
};
use sales_engine::config::{Config, load_config};
use sales_engine::domain::ordering::OrderNumberGenerator;
use sales_engine::infrastructure::http::{AppState, create_router};
use sales_engine::infrastructure::persistence::{
    InMemoryObjectiveRepository, InMemoryOrderRepository,
};
use sales_engine::infrastructure::reference::{InMemoryCatalog, InMemoryDirectory};
use sales_engine::observability;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config()?;
    observability::init_tracing(&config.logging);

    tracing::info!("Starting Comptoir Sales Engine");
    tracing::info!(
        http_port = config.server.http_port,
        bind_address = %config.server.bind_address,
        number_attempts = config.ordering.number_attempts,
        insert_attempts = config.ordering.insert_attempts,
        "Configuration loaded"
    );

    let router = create_router(build_state(&config));

    let addr: SocketAddr =
        format!("{}:{}", config.server.bind_address, config.server.http_port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Sales engine ready");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Sales engine stopped");
    Ok(())
}

/// Read configuration from the CLI argument, `config.yaml`, or defaults.
fn resolve_config() -> Result<Config, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => Ok(load_config(Some(&path))?),
        None if Path::new("config.yaml").exists() => Ok(load_config(None)?),
        None => Ok(Config::default()),
    }
}

/// Wire the default runtime: in-memory stores and reference data adapters.
fn build_state(
    config: &Config,
) -> AppState<InMemoryOrderRepository, InMemoryObjectiveRepository, InMemoryCatalog, InMemoryDirectory>
{
    let orders = Arc::new(InMemoryOrderRepository::new());
    let objectives = Arc::new(InMemoryObjectiveRepository::new());
    let catalog = Arc::new(InMemoryCatalog::new());
    let directory = Arc::new(InMemoryDirectory::new());

    AppState {
        create_order: Arc::new(
            CreateOrderUseCase::new(
                Arc::clone(&orders),
                Arc::clone(&catalog),
                Arc::clone(&directory),
            )
            .with_budgets(
                OrderNumberGenerator::new(config.ordering.number_attempts),
                config.ordering.insert_attempts,
            ),
        ),
        update_order: Arc::new(UpdateOrderUseCase::new(Arc::clone(&orders))),
        review_order: Arc::new(ReviewOrderUseCase::new(Arc::clone(&orders))),
        order_summary: Arc::new(OrderSummaryUseCase::new(
            Arc::clone(&orders),
            Arc::clone(&catalog),
            Arc::clone(&directory),
        )),
        notifications: Arc::new(NotificationsUseCase::new(Arc::clone(&orders))),
        objective_progress: Arc::new(ObjectiveProgressUseCase::new(
            Arc::clone(&objectives),
            Arc::clone(&orders),
            Arc::clone(&catalog),
            Arc::clone(&directory),
        )),
        manage_objectives: Arc::new(ManageObjectivesUseCase::new(objectives, directory)),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Resolve once Ctrl-C is received.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
    }
}
