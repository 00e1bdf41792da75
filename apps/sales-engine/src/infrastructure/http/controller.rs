//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to application use cases. Error kinds
//! map onto status codes: validation and upstream failures are 400, missing
//! actors are 403, unresolved references are 404, and an exhausted
//! order-number budget surfaces as 409.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};

use crate::application::dto::{CreateObjectiveRequest, CreateOrderRequest, UpdateObjectiveRequest, UpdateOrderRequest};
use crate::application::ports::{CatalogPort, DirectoryPort};
use crate::application::use_cases::{
    CreateOrderUseCase, ManageObjectivesUseCase, NotificationsUseCase, ObjectiveProgressUseCase,
    OrderSummaryUseCase, ReviewOrderUseCase, UpdateOrderUseCase,
};
use crate::domain::objectives::{ObjectiveError, ObjectiveRepository};
use crate::domain::ordering::OrderError;
use crate::domain::ordering::repository::OrderRepository;

use super::request::{RejectOrderBody, SoftDeleteBody};
use super::response::{ErrorResponse, HealthResponse, MarkedSeenResponse, UnseenCountResponse};

/// Application state shared across handlers.
pub struct AppState<O, B, C, D>
where
    O: OrderRepository,
    B: ObjectiveRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    /// Use case for creating orders.
    pub create_order: Arc<CreateOrderUseCase<O, C, D>>,
    /// Use case for admin line edits.
    pub update_order: Arc<UpdateOrderUseCase<O>>,
    /// Use case for review transitions.
    pub review_order: Arc<ReviewOrderUseCase<O>>,
    /// Use case for the printable summary.
    pub order_summary: Arc<OrderSummaryUseCase<O, C, D>>,
    /// Use case for the notification surface.
    pub notifications: Arc<NotificationsUseCase<O>>,
    /// Use case for objective evaluation.
    pub objective_progress: Arc<ObjectiveProgressUseCase<B, O, C, D>>,
    /// Use case for objective administration.
    pub manage_objectives: Arc<ManageObjectivesUseCase<B, D>>,
    /// Application version.
    pub version: String,
}

impl<O, B, C, D> Clone for AppState<O, B, C, D>
where
    O: OrderRepository,
    B: ObjectiveRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    fn clone(&self) -> Self {
        Self {
            create_order: Arc::clone(&self.create_order),
            update_order: Arc::clone(&self.update_order),
            review_order: Arc::clone(&self.review_order),
            order_summary: Arc::clone(&self.order_summary),
            notifications: Arc::clone(&self.notifications),
            objective_progress: Arc::clone(&self.objective_progress),
            manage_objectives: Arc::clone(&self.manage_objectives),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<O, B, C, D>(state: AppState<O, B, C, D>) -> Router
where
    O: OrderRepository + 'static,
    B: ObjectiveRepository + 'static,
    C: CatalogPort + 'static,
    D: DirectoryPort + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/orders", post(create_order))
        .route("/api/v1/orders/{id}/lines", post(update_order_lines))
        .route("/api/v1/orders/{id}/validate", post(validate_order))
        .route("/api/v1/orders/{id}/reject", post(reject_order))
        .route("/api/v1/orders/{id}", delete(soft_delete_order))
        .route("/api/v1/orders/{id}/purge", delete(hard_delete_order))
        .route("/api/v1/orders/{id}/summary", get(order_summary))
        .route("/api/v1/orders/{id}/history", get(order_history))
        .route(
            "/api/v1/reps/{id}/notifications/unseen-count",
            get(unseen_count),
        )
        .route("/api/v1/notifications/{id}/seen", post(mark_seen))
        .route("/api/v1/reps/{id}/notifications/seen", post(mark_all_seen))
        .route("/api/v1/reps/{id}/orders/modified", get(modified_orders))
        .route("/api/v1/reps/{id}/objectives/progress", get(rep_progress))
        .route("/api/v1/objectives/fleet-progress", get(fleet_progress))
        .route(
            "/api/v1/objectives/category-progress",
            get(category_progress),
        )
        .route("/api/v1/objectives", get(list_objectives).post(create_objective))
        .route("/api/v1/objectives/global", post(create_global_objective))
        .route("/api/v1/objectives/{id}/toggle", post(toggle_objective))
        .route(
            "/api/v1/objectives/{id}",
            put(update_objective).delete(remove_objective),
        )
        .with_state(state)
}

/// Map an ordering error onto a status code and error payload.
fn order_error(err: &OrderError) -> Response {
    let status = match err {
        OrderError::Validation { .. } | OrderError::Upstream { .. } => StatusCode::BAD_REQUEST,
        OrderError::Forbidden { .. } => StatusCode::FORBIDDEN,
        OrderError::NotFound { .. } => StatusCode::NOT_FOUND,
        OrderError::DuplicateNumber { .. } | OrderError::NumberExhausted { .. } => {
            StatusCode::CONFLICT
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// Map an objectives error onto a status code and error payload.
fn objective_error(err: &ObjectiveError) -> Response {
    let status = match err {
        ObjectiveError::Validation { .. } | ObjectiveError::Upstream { .. } => {
            StatusCode::BAD_REQUEST
        }
        ObjectiveError::NotFound { .. } => StatusCode::NOT_FOUND,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// Health check endpoint.
async fn health_check<O, B, C, D>(State(state): State<AppState<O, B, C, D>>) -> impl IntoResponse
where
    O: OrderRepository,
    B: ObjectiveRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

/// Create an order.
async fn create_order<O, B, C, D>(
    State(state): State<AppState<O, B, C, D>>,
    Json(request): Json<CreateOrderRequest>,
) -> Response
where
    O: OrderRepository,
    B: ObjectiveRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    match state.create_order.execute(request).await {
        Ok(dto) => (StatusCode::CREATED, Json(dto)).into_response(),
        Err(err) => order_error(&err),
    }
}

/// Apply admin line edits to an order.
async fn update_order_lines<O, B, C, D>(
    State(state): State<AppState<O, B, C, D>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateOrderRequest>,
) -> Response
where
    O: OrderRepository,
    B: ObjectiveRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    match state.update_order.execute(&id, request).await {
        Ok(dto) => Json(dto).into_response(),
        Err(err) => order_error(&err),
    }
}

/// Validate an order.
async fn validate_order<O, B, C, D>(
    State(state): State<AppState<O, B, C, D>>,
    Path(id): Path<String>,
) -> Response
where
    O: OrderRepository,
    B: ObjectiveRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    match state.review_order.validate(&id).await {
        Ok(dto) => Json(dto).into_response(),
        Err(err) => order_error(&err),
    }
}

/// Reject an order with a reason.
async fn reject_order<O, B, C, D>(
    State(state): State<AppState<O, B, C, D>>,
    Path(id): Path<String>,
    Json(body): Json<RejectOrderBody>,
) -> Response
where
    O: OrderRepository,
    B: ObjectiveRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    match state.review_order.reject(&id, &body.reason).await {
        Ok(dto) => Json(dto).into_response(),
        Err(err) => order_error(&err),
    }
}

/// Soft-delete an order.
async fn soft_delete_order<O, B, C, D>(
    State(state): State<AppState<O, B, C, D>>,
    Path(id): Path<String>,
    Json(body): Json<SoftDeleteBody>,
) -> Response
where
    O: OrderRepository,
    B: ObjectiveRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    match state.review_order.soft_delete(&id, &body.acting_admin).await {
        Ok(dto) => Json(dto).into_response(),
        Err(err) => order_error(&err),
    }
}

/// Hard-delete an order.
async fn hard_delete_order<O, B, C, D>(
    State(state): State<AppState<O, B, C, D>>,
    Path(id): Path<String>,
) -> Response
where
    O: OrderRepository,
    B: ObjectiveRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    match state.review_order.hard_delete(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => order_error(&err),
    }
}

/// Printable order summary.
async fn order_summary<O, B, C, D>(
    State(state): State<AppState<O, B, C, D>>,
    Path(id): Path<String>,
) -> Response
where
    O: OrderRepository,
    B: ObjectiveRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    match state.order_summary.execute(&id).await {
        Ok(dto) => Json(dto).into_response(),
        Err(err) => order_error(&err),
    }
}

/// Change history of one order.
async fn order_history<O, B, C, D>(
    State(state): State<AppState<O, B, C, D>>,
    Path(id): Path<String>,
) -> Response
where
    O: OrderRepository,
    B: ObjectiveRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    match state.notifications.order_history(&id).await {
        Ok(entries) => Json(entries).into_response(),
        Err(err) => order_error(&err),
    }
}

/// A rep's pending notification count.
async fn unseen_count<O, B, C, D>(
    State(state): State<AppState<O, B, C, D>>,
    Path(id): Path<String>,
) -> Response
where
    O: OrderRepository,
    B: ObjectiveRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    match state.notifications.unseen_count(&id).await {
        Ok(unseen) => Json(UnseenCountResponse { unseen }).into_response(),
        Err(err) => order_error(&err),
    }
}

/// Mark one notification as seen.
async fn mark_seen<O, B, C, D>(
    State(state): State<AppState<O, B, C, D>>,
    Path(id): Path<String>,
) -> Response
where
    O: OrderRepository,
    B: ObjectiveRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    match state.notifications.mark_seen(&id).await {
        Ok(()) => Json(MarkedSeenResponse { marked: 1 }).into_response(),
        Err(err) => order_error(&err),
    }
}

/// Mark all of a rep's notifications as seen.
async fn mark_all_seen<O, B, C, D>(
    State(state): State<AppState<O, B, C, D>>,
    Path(id): Path<String>,
) -> Response
where
    O: OrderRepository,
    B: ObjectiveRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    match state.notifications.mark_all_seen(&id).await {
        Ok(marked) => Json(MarkedSeenResponse { marked }).into_response(),
        Err(err) => order_error(&err),
    }
}

/// A rep's admin-modified orders with unseen counts.
async fn modified_orders<O, B, C, D>(
    State(state): State<AppState<O, B, C, D>>,
    Path(id): Path<String>,
) -> Response
where
    O: OrderRepository,
    B: ObjectiveRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    match state.notifications.modified_orders(&id).await {
        Ok(orders) => Json(orders).into_response(),
        Err(err) => order_error(&err),
    }
}

/// Progress on a rep's own objectives.
async fn rep_progress<O, B, C, D>(
    State(state): State<AppState<O, B, C, D>>,
    Path(id): Path<String>,
) -> Response
where
    O: OrderRepository,
    B: ObjectiveRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    match state.objective_progress.rep_progress(&id).await {
        Ok(progress) => Json(progress).into_response(),
        Err(err) => objective_error(&err),
    }
}

/// Fleet-wide objective standings.
async fn fleet_progress<O, B, C, D>(State(state): State<AppState<O, B, C, D>>) -> Response
where
    O: OrderRepository,
    B: ObjectiveRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    match state.objective_progress.fleet_progress().await {
        Ok(progress) => Json(progress).into_response(),
        Err(err) => objective_error(&err),
    }
}

/// Category goal standings.
async fn category_progress<O, B, C, D>(State(state): State<AppState<O, B, C, D>>) -> Response
where
    O: OrderRepository,
    B: ObjectiveRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    match state.objective_progress.category_progress().await {
        Ok(progress) => Json(progress).into_response(),
        Err(err) => objective_error(&err),
    }
}

/// All objectives grouped by start year.
async fn list_objectives<O, B, C, D>(State(state): State<AppState<O, B, C, D>>) -> Response
where
    O: OrderRepository,
    B: ObjectiveRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    match state.manage_objectives.list_by_year().await {
        Ok(years) => Json(years).into_response(),
        Err(err) => objective_error(&err),
    }
}

/// Create an individual objective.
async fn create_objective<O, B, C, D>(
    State(state): State<AppState<O, B, C, D>>,
    Json(request): Json<CreateObjectiveRequest>,
) -> Response
where
    O: OrderRepository,
    B: ObjectiveRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    match state.manage_objectives.create_individual(request).await {
        Ok(dto) => (StatusCode::CREATED, Json(dto)).into_response(),
        Err(err) => objective_error(&err),
    }
}

/// Create a fleet-wide objective.
async fn create_global_objective<O, B, C, D>(
    State(state): State<AppState<O, B, C, D>>,
    Json(request): Json<CreateObjectiveRequest>,
) -> Response
where
    O: OrderRepository,
    B: ObjectiveRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    match state.manage_objectives.create_global(request).await {
        Ok(dto) => (StatusCode::CREATED, Json(dto)).into_response(),
        Err(err) => objective_error(&err),
    }
}

/// Flip an objective's active flag.
async fn toggle_objective<O, B, C, D>(
    State(state): State<AppState<O, B, C, D>>,
    Path(id): Path<String>,
) -> Response
where
    O: OrderRepository,
    B: ObjectiveRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    match state.manage_objectives.toggle(&id).await {
        Ok(dto) => Json(dto).into_response(),
        Err(err) => objective_error(&err),
    }
}

/// Revise an objective.
async fn update_objective<O, B, C, D>(
    State(state): State<AppState<O, B, C, D>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateObjectiveRequest>,
) -> Response
where
    O: OrderRepository,
    B: ObjectiveRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    match state.manage_objectives.update(&id, request).await {
        Ok(dto) => Json(dto).into_response(),
        Err(err) => objective_error(&err),
    }
}

/// Remove an objective.
async fn remove_objective<O, B, C, D>(
    State(state): State<AppState<O, B, C, D>>,
    Path(id): Path<String>,
) -> Response
where
    O: OrderRepository,
    B: ObjectiveRepository,
    C: CatalogPort,
    D: DirectoryPort,
{
    match state.manage_objectives.remove(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => objective_error(&err),
    }
}
